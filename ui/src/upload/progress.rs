//! Synthetic upload progress.
//!
//! Progress is a UX approximation, not tied to transferred bytes. While a
//! request is in flight it climbs in fixed steps on a fixed interval and holds
//! at [`ProgressPlan::cap`]; only a received response takes it to 100.

use std::cell::Cell;
use std::rc::Rc;

/// Upper bound the synthetic signal may reach on its own, whatever the plan says.
pub const PROGRESS_CEILING: u8 = 90;

/// Progress value shown once a response arrives.
pub const PROGRESS_COMPLETE: u8 = 100;

/// Timing of the progress signal and the post-response display delays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressPlan {
    /// Increment applied on each tick.
    pub step: u8,
    /// Value the signal holds at until the request resolves.
    pub cap: u8,
    /// Milliseconds between ticks.
    pub interval_ms: u64,
    /// Delay between the response and revealing a successful result.
    pub reveal_delay_ms: u64,
    /// Delay between resolution and progress returning to 0.
    pub settle_delay_ms: u64,
}

impl Default for ProgressPlan {
    fn default() -> Self {
        Self {
            step: 10,
            cap: 90,
            interval_ms: 200,
            reveal_delay_ms: 300,
            settle_delay_ms: 1000,
        }
    }
}

impl ProgressPlan {
    /// Effective cap, clamped to [`PROGRESS_CEILING`].
    pub fn ceiling(&self) -> u8 {
        self.cap.min(PROGRESS_CEILING)
    }

    /// Next value after one tick from `current`.
    pub fn advance(&self, current: u8) -> u8 {
        current.saturating_add(self.step.max(1)).min(self.ceiling())
    }
}

/// Cancellable handle for the periodic progress timer of one attempt.
///
/// Owned by the orchestrator; the timer loop only holds a [`TickerToken`].
/// Dropping the handle cancels the timer.
#[derive(Debug)]
pub struct ProgressTicker {
    attempt: u64,
    cancelled: Rc<Cell<bool>>,
}

impl ProgressTicker {
    pub fn start(attempt: u64) -> Self {
        Self {
            attempt,
            cancelled: Rc::new(Cell::new(false)),
        }
    }

    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    pub fn token(&self) -> TickerToken {
        TickerToken {
            cancelled: Rc::clone(&self.cancelled),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_active(&self) -> bool {
        !self.cancelled.get()
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Read side of a [`ProgressTicker`], held by the timer loop.
#[derive(Debug, Clone)]
pub struct TickerToken {
    cancelled: Rc<Cell<bool>>,
}

impl TickerToken {
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_holds_at_cap() {
        let plan = ProgressPlan::default();
        let mut progress = 0;
        for _ in 0..20 {
            progress = plan.advance(progress);
        }
        assert_eq!(progress, 90);
    }

    #[test]
    fn tuned_cap_cannot_exceed_ninety() {
        let plan = ProgressPlan {
            step: 50,
            cap: 150,
            ..ProgressPlan::default()
        };
        assert_eq!(plan.ceiling(), 90);
        assert_eq!(plan.advance(80), 90);

        let lower = ProgressPlan {
            cap: 60,
            ..ProgressPlan::default()
        };
        assert_eq!(lower.advance(55), 60);
    }

    #[test]
    fn dropping_ticker_cancels_token() {
        let ticker = ProgressTicker::start(3);
        let token = ticker.token();
        assert!(!token.is_cancelled());
        drop(ticker);
        assert!(token.is_cancelled());
    }
}
