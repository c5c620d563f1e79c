//! Upload/analysis orchestration for a single report.

pub mod classify;
pub mod engine;
pub mod error;
pub mod progress;
pub mod session;

mod view;

pub use engine::{Phase, Resolution, Submission, TickOutcome, UploadOrchestrator};
pub use error::{ErrorKind, UploadError};
pub use progress::{ProgressPlan, ProgressTicker, TickerToken};
pub use session::{submit, AttemptStore, SubmitOutcome};
pub use view::{provide_upload_session, use_upload_session, AnalyzerView};
