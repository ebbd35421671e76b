//! Per-run summary.

use std::path::PathBuf;

use crate::error::InjectError;

use super::Action;

/// What happened to one cache slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotOutcome {
    pub url: String,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub action: Action,
    /// A previous occupant was removed.
    pub replaced: bool,
}

/// A slot that failed while running in keep-going mode.
#[derive(Debug)]
pub struct SlotFailure {
    pub url: String,
    pub error: InjectError,
}

#[derive(Debug, Default)]
pub struct InjectReport {
    pub outcomes: Vec<SlotOutcome>,
    pub failures: Vec<SlotFailure>,
}

impl InjectReport {
    /// Slots that had an occupant removed.
    pub fn removed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.replaced).count()
    }

    /// Slots that received new content.
    pub fn written(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.action != Action::Delete)
            .count()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Orders entries by URL so output does not depend on worker scheduling.
    pub(crate) fn sort(&mut self) {
        self.outcomes.sort_by(|a, b| a.url.cmp(&b.url));
        self.failures.sort_by(|a, b| a.url.cmp(&b.url));
    }
}
