//! Feedback channel: user-facing outcome reporting.
//!
//! The dispatcher forwards every outcome here exactly once. Channels are
//! fire-and-forget observers: they must return promptly and never fail, so
//! a slow or broken presenter cannot stall an export operation.

use std::sync::Mutex;

use crate::dispatch::Outcome;

/// Receives the terminal outcome of each export operation.
pub trait FeedbackChannel: Send + Sync {
    fn notify(&self, outcome: &Outcome);
}

/// Swallows every outcome.
pub struct NoopFeedback;

impl FeedbackChannel for NoopFeedback {
    fn notify(&self, _outcome: &Outcome) {}
}

/// Reports outcomes through the log facade: info on success, warn on
/// failure. Message wording lives here, not in the dispatcher.
pub struct LogFeedback;

impl FeedbackChannel for LogFeedback {
    fn notify(&self, outcome: &Outcome) {
        match outcome {
            Outcome::Success { action } => log::info!("{} succeeded", action),
            Outcome::Failure { action, kind } => log::warn!("{} failed: {:?}", action, kind),
        }
    }
}

/// Records outcomes in memory so tests can assert on notifications.
#[derive(Default)]
pub struct MemoryFeedback {
    outcomes: Mutex<Vec<Outcome>>,
}

impl MemoryFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every outcome reported so far.
    pub fn outcomes(&self) -> Vec<Outcome> {
        self.outcomes.lock().unwrap().clone()
    }
}

impl FeedbackChannel for MemoryFeedback {
    fn notify(&self, outcome: &Outcome) {
        self.outcomes.lock().unwrap().push(outcome.clone());
    }
}
