//! Board and search configuration.

use std::time::{Duration, Instant};

use crate::space::AbortReason;

/// How far the graph extends towards the bottom and right edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BorderPolicy {
    /// Every walkable cell is a graph node.
    #[default]
    Full,
    /// Leave the last row and the last column out of the graph entirely:
    /// those cells are neither nodes nor neighbors. Kept for compatibility
    /// with maps authored against that behaviour.
    ClipLastRowColumn,
}

/// Settings used when building a [`Board`](crate::Board).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardConfig {
    pub border: BorderPolicy,
}

impl BoardConfig {
    pub fn with_border(mut self, border: BorderPolicy) -> Self {
        self.border = border;
        self
    }
}

/// Limits on a single search run. The default is unlimited.
///
/// The deadline is polled every [`DEADLINE_POLL`](Self::DEADLINE_POLL)
/// expansions, starting with the first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchBudget {
    /// Maximum number of node expansions.
    pub max_steps: Option<usize>,
    /// Wall-clock instant after which the search gives up.
    pub deadline: Option<Instant>,
}

impl SearchBudget {
    pub const DEADLINE_POLL: usize = 256;

    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_max_steps(mut self, steps: usize) -> Self {
        self.max_steps = Some(steps);
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Deadline `timeout` from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Why a search that has already expanded `expanded` nodes must stop,
    /// if it must.
    pub(crate) fn exhausted(&self, expanded: usize) -> Option<AbortReason> {
        if self.max_steps.is_some_and(|max| expanded >= max) {
            return Some(AbortReason::StepLimit);
        }
        if expanded % Self::DEADLINE_POLL == 0
            && self.deadline.is_some_and(|d| Instant::now() >= d)
        {
            return Some(AbortReason::Deadline);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        assert_eq!(BoardConfig::default().border, BorderPolicy::Full);
        let b = SearchBudget::default();
        assert_eq!(b, SearchBudget::unlimited());
        assert_eq!(b.exhausted(usize::MAX - 1), None);
    }

    #[test]
    fn step_limit() {
        let b = SearchBudget::unlimited().with_max_steps(3);
        assert_eq!(b.exhausted(2), None);
        assert_eq!(b.exhausted(3), Some(AbortReason::StepLimit));
    }

    #[test]
    fn past_deadline_is_seen_on_poll() {
        let b = SearchBudget::unlimited().with_deadline(Instant::now());
        assert_eq!(b.exhausted(0), Some(AbortReason::Deadline));
        assert_eq!(b.exhausted(1), None);
        assert_eq!(
            b.exhausted(SearchBudget::DEADLINE_POLL),
            Some(AbortReason::Deadline)
        );
    }

    #[test]
    fn future_deadline() {
        let b = SearchBudget::unlimited().with_timeout(Duration::from_secs(3600));
        assert_eq!(b.exhausted(0), None);
    }
}
