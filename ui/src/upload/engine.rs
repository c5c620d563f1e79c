//! State machine for a single report analysis attempt.
//!
//! ```text
//! Idle ──select_file──▶ Selecting ──begin_submit──▶ Submitting ──resolve──▶ Succeeded | Failed
//!   ▲                                                                           │
//!   └──────────────────────────────── reset ◀───────────────────────────────────┘
//! ```
//!
//! Every piece of deferred work (ticks, the response, the result reveal, the
//! progress reset) is tagged with the attempt it belongs to. Selecting a file,
//! submitting and resetting all move to a new attempt, so late events from an
//! older one are ignored.

use std::fmt;

use api::{AnalysisResult, ReportFile, ServiceResponse};
use time::OffsetDateTime;

use super::classify::classify_response;
use super::error::{ErrorKind, UploadError};
use super::progress::{ProgressPlan, ProgressTicker, TickerToken, PROGRESS_COMPLETE};

const LOG_TARGET: &str = "bloodreport::upload";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    Selecting,
    Submitting,
    Succeeded,
    Failed,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// Work handed to the driver when a submission starts.
#[derive(Debug)]
pub struct Submission {
    pub attempt: u64,
    pub file: ReportFile,
    pub ticker: TickerToken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Progress moved and the timer keeps running.
    Advanced(u8),
    /// Progress reached the cap; the timer has been stopped.
    Capped(u8),
    /// The tick belongs to a finished or superseded attempt.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Result decoded; it becomes visible on [`UploadOrchestrator::reveal_result`].
    Succeeded,
    Failed(UploadError),
}

pub struct UploadOrchestrator {
    plan: ProgressPlan,
    attempt: u64,
    file: Option<ReportFile>,
    phase: Phase,
    progress: u8,
    error: Option<UploadError>,
    result: Option<AnalysisResult>,
    pending_result: Option<AnalysisResult>,
    completed_at: Option<OffsetDateTime>,
    ticker: Option<ProgressTicker>,
}

impl Default for UploadOrchestrator {
    fn default() -> Self {
        Self::new(ProgressPlan::default())
    }
}

impl UploadOrchestrator {
    pub fn new(plan: ProgressPlan) -> Self {
        Self {
            plan,
            attempt: 0,
            file: None,
            phase: Phase::Idle,
            progress: 0,
            error: None,
            result: None,
            pending_result: None,
            completed_at: None,
            ticker: None,
        }
    }

    pub fn plan(&self) -> &ProgressPlan {
        &self.plan
    }

    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn file(&self) -> Option<&ReportFile> {
        self.file.as_ref()
    }

    pub fn error(&self) -> Option<&UploadError> {
        self.error.as_ref()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn completed_at(&self) -> Option<OffsetDateTime> {
        self.completed_at
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    /// Whether the periodic progress timer is still allowed to fire.
    pub fn ticker_active(&self) -> bool {
        self.ticker.as_ref().is_some_and(ProgressTicker::is_active)
    }

    /// Whether the analyze action makes sense right now.
    pub fn can_submit(&self) -> bool {
        self.file.is_some() && !self.is_submitting()
    }

    /// Pick a report for the next attempt, discarding any previous error or result.
    ///
    /// Returns `false` (and changes nothing) while a submission is in flight.
    pub fn select_file(&mut self, file: ReportFile) -> bool {
        if self.is_submitting() {
            tracing::warn!(target: LOG_TARGET, file = %file.name, "selection ignored while submitting");
            return false;
        }

        tracing::debug!(target: LOG_TARGET, file = %file.name, size = file.size(), "file selected");
        self.next_attempt();
        self.file = Some(file);
        self.phase = Phase::Selecting;
        true
    }

    /// Start submitting the selected file.
    ///
    /// `Ok(None)` when a submission is already running (no second request is
    /// made). Without a selected file the attempt fails with
    /// [`ErrorKind::NoFileSelected`].
    pub fn begin_submit(&mut self) -> Result<Option<Submission>, UploadError> {
        if self.is_submitting() {
            tracing::debug!(target: LOG_TARGET, attempt = self.attempt, "submit ignored, already running");
            return Ok(None);
        }

        let Some(file) = self.file.clone() else {
            let err = UploadError::new(ErrorKind::NoFileSelected);
            self.cancel_ticker();
            self.phase = Phase::Failed;
            self.error = Some(err.clone());
            return Err(err);
        };

        self.next_attempt();
        let ticker = ProgressTicker::start(self.attempt);
        let token = ticker.token();
        self.ticker = Some(ticker);
        self.phase = Phase::Submitting;

        tracing::info!(target: LOG_TARGET, attempt = self.attempt, file = %file.name, "submitting report");
        Ok(Some(Submission {
            attempt: self.attempt,
            file,
            ticker: token,
        }))
    }

    /// Advance the synthetic progress by one step.
    pub fn tick(&mut self, attempt: u64) -> TickOutcome {
        let live = attempt == self.attempt
            && self.is_submitting()
            && self
                .ticker
                .as_ref()
                .is_some_and(|ticker| ticker.is_active() && ticker.attempt() == attempt);
        if !live {
            return TickOutcome::Stale;
        }

        self.progress = self.plan.advance(self.progress);
        if self.progress >= self.plan.ceiling() {
            self.cancel_ticker();
            TickOutcome::Capped(self.progress)
        } else {
            TickOutcome::Advanced(self.progress)
        }
    }

    /// Settle the attempt with the outcome of its request.
    ///
    /// `outcome` is `Err` when no response was received. Returns `None` for a
    /// superseded attempt.
    pub fn resolve<E>(
        &mut self,
        attempt: u64,
        outcome: Result<ServiceResponse, E>,
    ) -> Option<Resolution>
    where
        E: fmt::Display,
    {
        if attempt != self.attempt || !self.is_submitting() {
            tracing::debug!(target: LOG_TARGET, attempt, current = self.attempt, "stale resolution dropped");
            return None;
        }

        self.cancel_ticker();

        let response = match outcome {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(target: LOG_TARGET, attempt, %err, "analysis service unreachable");
                return Some(self.fail(UploadError::new(ErrorKind::ConnectionFailed)));
            }
        };

        self.progress = PROGRESS_COMPLETE;
        match classify_response(&response) {
            Ok(result) => {
                tracing::info!(
                    target: LOG_TARGET,
                    attempt,
                    status = response.status,
                    metrics = result.metrics.len(),
                    "analysis succeeded"
                );
                self.phase = Phase::Succeeded;
                self.pending_result = Some(result);
                self.completed_at = Some(OffsetDateTime::now_utc());
                Some(Resolution::Succeeded)
            }
            Err(err) => {
                tracing::warn!(
                    target: LOG_TARGET,
                    attempt,
                    status = response.status,
                    kind = %err.kind,
                    "analysis failed"
                );
                Some(self.fail(err))
            }
        }
    }

    /// Publish the result of a succeeded attempt after the display delay.
    pub fn reveal_result(&mut self, attempt: u64) -> bool {
        if attempt != self.attempt || self.phase != Phase::Succeeded {
            return false;
        }
        match self.pending_result.take() {
            Some(result) => {
                self.result = Some(result);
                true
            }
            None => false,
        }
    }

    /// Return progress to 0 once a resolved attempt has been displayed.
    pub fn settle_progress(&mut self, attempt: u64) -> bool {
        if attempt != self.attempt || !self.phase.is_terminal() {
            return false;
        }
        self.progress = 0;
        true
    }

    /// Forget the file, result and error and go back to Idle.
    pub fn reset(&mut self) {
        tracing::debug!(target: LOG_TARGET, attempt = self.attempt, "reset");
        self.next_attempt();
        self.file = None;
        self.phase = Phase::Idle;
    }

    fn fail(&mut self, err: UploadError) -> Resolution {
        self.phase = Phase::Failed;
        self.error = Some(err.clone());
        Resolution::Failed(err)
    }

    fn cancel_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }

    /// Supersede the current attempt and clear everything derived from it.
    fn next_attempt(&mut self) {
        self.cancel_ticker();
        self.attempt = self.attempt.wrapping_add(1);
        self.progress = 0;
        self.error = None;
        self.result = None;
        self.pending_result = None;
        self.completed_at = None;
    }
}

impl fmt::Debug for UploadOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadOrchestrator")
            .field("attempt", &self.attempt)
            .field("phase", &self.phase)
            .field("progress", &self.progress)
            .field("file", &self.file)
            .field("error", &self.error)
            .field("has_result", &self.result.is_some())
            .field("ticker_active", &self.ticker_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf() -> ReportFile {
        ReportFile::from_name("labs.pdf", b"%PDF-1.7".to_vec())
    }

    fn submitting() -> (UploadOrchestrator, Submission) {
        let mut orchestrator = UploadOrchestrator::default();
        orchestrator.select_file(pdf());
        let submission = orchestrator.begin_submit().unwrap().unwrap();
        (orchestrator, submission)
    }

    #[test]
    fn select_moves_to_selecting() {
        let mut orchestrator = UploadOrchestrator::default();
        assert_eq!(orchestrator.phase(), Phase::Idle);
        assert!(!orchestrator.can_submit());

        assert!(orchestrator.select_file(pdf()));
        assert_eq!(orchestrator.phase(), Phase::Selecting);
        assert_eq!(orchestrator.file().map(|f| f.name.as_str()), Some("labs.pdf"));
        assert!(orchestrator.can_submit());
    }

    #[test]
    fn tuned_plan_still_holds_at_ninety_while_submitting() {
        let mut orchestrator = UploadOrchestrator::new(ProgressPlan {
            cap: 95,
            ..ProgressPlan::default()
        });
        orchestrator.select_file(pdf());
        let submission = orchestrator.begin_submit().unwrap().unwrap();

        for _ in 0..20 {
            orchestrator.tick(submission.attempt);
            assert!(orchestrator.progress() <= 90);
        }
        assert_eq!(orchestrator.phase(), Phase::Submitting);
        assert_eq!(orchestrator.progress(), 90);
        assert!(!orchestrator.ticker_active());
    }

    #[test]
    fn submit_without_file_fails_locally() {
        let mut orchestrator = UploadOrchestrator::default();
        let err = orchestrator.begin_submit().unwrap_err();
        assert_eq!(err.kind, ErrorKind::NoFileSelected);
        assert_eq!(orchestrator.phase(), Phase::Failed);
        assert_eq!(orchestrator.error(), Some(&err));
        assert!(!orchestrator.ticker_active());
    }

    #[test]
    fn second_submit_is_a_no_op() {
        let (mut orchestrator, submission) = submitting();
        assert!(orchestrator.begin_submit().unwrap().is_none());
        assert_eq!(orchestrator.attempt(), submission.attempt);
        assert!(orchestrator.ticker_active());
    }

    #[test]
    fn ticks_hold_at_ninety() {
        let (mut orchestrator, submission) = submitting();
        let mut outcomes = Vec::new();
        for _ in 0..12 {
            outcomes.push(orchestrator.tick(submission.attempt));
            assert!(orchestrator.progress() <= 90);
        }
        assert_eq!(outcomes[0], TickOutcome::Advanced(10));
        assert_eq!(outcomes[8], TickOutcome::Capped(90));
        assert_eq!(outcomes[9], TickOutcome::Stale);
        assert_eq!(orchestrator.progress(), 90);
        assert_eq!(orchestrator.phase(), Phase::Submitting);
        assert!(submission.ticker.is_cancelled());
    }

    #[test]
    fn success_snaps_to_complete_then_reveals_and_settles() {
        let (mut orchestrator, submission) = submitting();
        orchestrator.tick(submission.attempt);

        let body = r#"{"riskFactors":["r1"],"lifestyleAdvice":["a1"],"metrics":[]}"#;
        let resolution =
            orchestrator.resolve::<String>(submission.attempt, Ok(ServiceResponse::new(200, body)));
        assert_eq!(resolution, Some(Resolution::Succeeded));
        assert_eq!(orchestrator.phase(), Phase::Succeeded);
        assert_eq!(orchestrator.progress(), 100);
        assert!(orchestrator.result().is_none());
        assert!(orchestrator.completed_at().is_some());
        assert!(submission.ticker.is_cancelled());

        assert!(orchestrator.reveal_result(submission.attempt));
        assert_eq!(orchestrator.result().unwrap().lifestyle_advice, vec!["a1".to_string()]);

        assert!(orchestrator.settle_progress(submission.attempt));
        assert_eq!(orchestrator.progress(), 0);
    }

    #[test]
    fn connection_failure_keeps_progress_until_settled() {
        let (mut orchestrator, submission) = submitting();
        orchestrator.tick(submission.attempt);
        orchestrator.tick(submission.attempt);

        let err = match orchestrator.resolve(submission.attempt, Err("connection refused")) {
            Some(Resolution::Failed(err)) => err,
            other => panic!("expected failure, got {other:?}"),
        };
        assert_eq!(err.kind, ErrorKind::ConnectionFailed);
        assert_eq!(orchestrator.progress(), 20);
        assert!(!orchestrator.ticker_active());
        assert_eq!(orchestrator.tick(submission.attempt), TickOutcome::Stale);
        assert_eq!(orchestrator.progress(), 20);

        orchestrator.settle_progress(submission.attempt);
        assert_eq!(orchestrator.progress(), 0);
    }

    #[test]
    fn http_errors_are_classified() {
        let (mut orchestrator, submission) = submitting();
        orchestrator.resolve::<String>(
            submission.attempt,
            Ok(ServiceResponse::new(409, r#"{"message":"busy"}"#)),
        );
        assert_eq!(orchestrator.phase(), Phase::Failed);
        let err = orchestrator.error().unwrap();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(err.message, "busy");
        assert_eq!(orchestrator.progress(), 100);
    }

    #[test]
    fn reset_cancels_and_supersedes() {
        let (mut orchestrator, submission) = submitting();
        orchestrator.reset();

        assert_eq!(orchestrator.phase(), Phase::Idle);
        assert_eq!(orchestrator.progress(), 0);
        assert!(orchestrator.file().is_none());
        assert!(submission.ticker.is_cancelled());
        assert_eq!(orchestrator.tick(submission.attempt), TickOutcome::Stale);
        assert_eq!(
            orchestrator.resolve::<String>(submission.attempt, Ok(ServiceResponse::new(200, "{}"))),
            None
        );
        assert_eq!(orchestrator.phase(), Phase::Idle);
    }

    #[test]
    fn selection_during_submit_is_rejected() {
        let (mut orchestrator, _submission) = submitting();
        assert!(!orchestrator.select_file(ReportFile::from_name("other.png", vec![1])));
        assert_eq!(orchestrator.file().unwrap().name, "labs.pdf");
    }

    #[test]
    fn new_selection_clears_previous_outcome() {
        let (mut orchestrator, submission) = submitting();
        orchestrator.resolve::<String>(submission.attempt, Ok(ServiceResponse::new(500, "{}")));
        assert!(orchestrator.error().is_some());

        orchestrator.select_file(ReportFile::from_name("retake.png", vec![1]));
        assert_eq!(orchestrator.phase(), Phase::Selecting);
        assert!(orchestrator.error().is_none());
        assert!(orchestrator.result().is_none());
        // The old attempt's deferred reset no longer applies.
        assert!(!orchestrator.settle_progress(submission.attempt));
    }

    #[test]
    fn resubmitting_after_failure_starts_a_new_attempt() {
        let (mut orchestrator, first) = submitting();
        orchestrator.resolve::<String>(first.attempt, Ok(ServiceResponse::new(429, "{}")));

        let second = orchestrator.begin_submit().unwrap().unwrap();
        assert!(second.attempt > first.attempt);
        assert_eq!(orchestrator.phase(), Phase::Submitting);
        assert!(orchestrator.error().is_none());
        assert_eq!(orchestrator.progress(), 0);
    }
}
