//! Async driver sequencing one submission against an [`AnalysisService`].
//!
//! The driver owns no state: it reaches the orchestrator through an
//! [`AttemptStore`], which is a Dioxus `Signal` in the analyzer view and an
//! `Rc<RefCell<_>>` elsewhere.

use std::cell::RefCell;
use std::rc::Rc;

use api::AnalysisService;
use futures::future::{self, Either};
use futures::pin_mut;

use super::engine::{Resolution, TickOutcome, UploadOrchestrator};
use super::error::UploadError;
use super::progress::TickerToken;
use crate::core::timing;

/// Shared handle to the orchestrator of the current screen.
pub trait AttemptStore: Clone {
    fn update<R>(&mut self, f: impl FnOnce(&mut UploadOrchestrator) -> R) -> R;
}

impl AttemptStore for Rc<RefCell<UploadOrchestrator>> {
    fn update<R>(&mut self, f: impl FnOnce(&mut UploadOrchestrator) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

/// How a call to [`submit`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Succeeded,
    Failed(UploadError),
    /// A submission was already running; nothing was sent.
    AlreadyRunning,
    /// The attempt was reset or replaced before its response arrived.
    Superseded,
}

/// Run one analysis attempt to completion.
///
/// Sends exactly one request, drives the progress timer while it is in
/// flight, then plays out the reveal and progress-reset delays. Never retries.
pub async fn submit<S, A>(mut store: S, service: &A) -> SubmitOutcome
where
    S: AttemptStore,
    A: AnalysisService + ?Sized,
{
    let plan = store.update(|orchestrator| orchestrator.plan().clone());
    let submission = match store.update(UploadOrchestrator::begin_submit) {
        Ok(Some(submission)) => submission,
        Ok(None) => return SubmitOutcome::AlreadyRunning,
        Err(err) => return SubmitOutcome::Failed(err),
    };
    let attempt = submission.attempt;

    let ticks = drive_ticks(store.clone(), attempt, submission.ticker, plan.interval_ms);
    let request = service.upload(&submission.file);
    pin_mut!(ticks, request);

    let outcome = match future::select(request, ticks).await {
        Either::Left((outcome, _ticks)) => outcome,
        // Progress capped; keep waiting for the response.
        Either::Right(((), request)) => request.await,
    };

    let Some(resolution) = store.update(|orchestrator| orchestrator.resolve(attempt, outcome))
    else {
        return SubmitOutcome::Superseded;
    };

    match resolution {
        Resolution::Succeeded => {
            timing::sleep_ms(plan.reveal_delay_ms).await;
            store.update(|orchestrator| orchestrator.reveal_result(attempt));
            timing::sleep_ms(plan.settle_delay_ms.saturating_sub(plan.reveal_delay_ms)).await;
            store.update(|orchestrator| orchestrator.settle_progress(attempt));
            SubmitOutcome::Succeeded
        }
        Resolution::Failed(err) => {
            timing::sleep_ms(plan.settle_delay_ms).await;
            store.update(|orchestrator| orchestrator.settle_progress(attempt));
            SubmitOutcome::Failed(err)
        }
    }
}

async fn drive_ticks<S: AttemptStore>(
    mut store: S,
    attempt: u64,
    token: TickerToken,
    interval_ms: u64,
) {
    loop {
        timing::sleep_ms(interval_ms).await;
        if token.is_cancelled() {
            break;
        }
        match store.update(|orchestrator| orchestrator.tick(attempt)) {
            TickOutcome::Advanced(_) => {}
            TickOutcome::Capped(_) | TickOutcome::Stale => break,
        }
    }
}
