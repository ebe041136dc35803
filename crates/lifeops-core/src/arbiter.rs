//! Conflict resolution over pooled suggestions.
//!
//! The arbiter is a full-pool-replace model, not a priority queue:
//! every tick's candidates are ranked against each other in isolation
//! and the pool is cleared on every decision. Losing candidates are not
//! retried; a neuron must re-propose next tick if still applicable.

use tracing::{debug, info};

use crate::state::LifeState;
use crate::suggestion::{NeuronSuggestion, SuggestedAction};

/// Picks at most one winning action among pooled suggestions.
#[derive(Debug, Default)]
pub struct Arbiter {
    candidates: Vec<NeuronSuggestion>,
    /// Monotonic decision counter, folded into binding identifiers so
    /// two decisions at the same instant can never collide.
    decision_seq: u64,
}

impl Arbiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a candidate to the pool. No dedup; multiplicity unlimited.
    pub fn request(&mut self, suggestion: NeuronSuggestion) {
        debug!(
            neuron = %suggestion.neuron,
            kind = %suggestion.kind,
            priority = ?suggestion.priority,
            confidence = suggestion.confidence,
            "candidate pooled"
        );
        self.candidates.push(suggestion);
    }

    /// Number of candidates awaiting the next decision.
    pub fn pending(&self) -> usize {
        self.candidates.len()
    }

    /// Rank the pool by `(priority, confidence)` descending and return
    /// the winner bound to a fresh decision identifier. The entire pool
    /// is cleared, winners and losers alike. Empty pool means no
    /// decision -- a normal outcome, not an error.
    ///
    /// Ties on the composite key resolve to earliest insertion (stable
    /// sort), keeping decisions deterministic.
    pub fn decide(&mut self, state: &LifeState) -> Option<SuggestedAction> {
        if self.candidates.is_empty() {
            return None;
        }

        let mut pool = std::mem::take(&mut self.candidates);
        pool.sort_by(|a, b| {
            b.priority
                .rank()
                .cmp(&a.priority.rank())
                .then(b.confidence.total_cmp(&a.confidence))
        });
        let best = pool.remove(0);

        self.decision_seq += 1;
        let binding_id = format!(
            "{:04}-{}-{}",
            self.decision_seq,
            state.timestamp.timestamp_millis(),
            best.kind
        );

        info!(
            binding_id = %binding_id,
            winner = %best.neuron,
            kind = %best.kind,
            dropped = pool.len(),
            "arbiter decision"
        );

        Some(SuggestedAction {
            binding_id,
            suggestion: best,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggestion::Priority;
    use chrono::{TimeZone, Utc};

    fn state() -> LifeState {
        LifeState::new("tyler", Utc.with_ymd_and_hms(2026, 3, 14, 14, 0, 0).unwrap())
    }

    fn suggestion(neuron: &str, priority: Priority, confidence: f64) -> NeuronSuggestion {
        NeuronSuggestion::new(
            neuron,
            priority,
            "focus_block",
            "do the thing",
            25,
            None,
            confidence,
        )
    }

    #[test]
    fn test_empty_pool_decides_nothing() {
        let mut arbiter = Arbiter::new();
        assert!(arbiter.decide(&state()).is_none());
        assert_eq!(arbiter.pending(), 0);
    }

    #[test]
    fn test_priority_beats_confidence() {
        let mut arbiter = Arbiter::new();
        arbiter.request(suggestion("a", Priority::Low, 0.9));
        arbiter.request(suggestion("b", Priority::High, 0.1));
        let action = arbiter.decide(&state()).unwrap();
        assert_eq!(action.suggestion.neuron, "b");
    }

    #[test]
    fn test_confidence_breaks_equal_priority() {
        let mut arbiter = Arbiter::new();
        arbiter.request(suggestion("a", Priority::High, 0.8));
        arbiter.request(suggestion("b", Priority::High, 0.9));
        let action = arbiter.decide(&state()).unwrap();
        assert_eq!(action.suggestion.neuron, "b");
    }

    #[test]
    fn test_full_tie_resolves_to_insertion_order() {
        let mut arbiter = Arbiter::new();
        arbiter.request(suggestion("first", Priority::Medium, 0.5));
        arbiter.request(suggestion("second", Priority::Medium, 0.5));
        let action = arbiter.decide(&state()).unwrap();
        assert_eq!(action.suggestion.neuron, "first");
    }

    #[test]
    fn test_decide_clears_entire_pool() {
        let mut arbiter = Arbiter::new();
        arbiter.request(suggestion("a", Priority::High, 0.8));
        arbiter.request(suggestion("b", Priority::Low, 0.2));
        assert_eq!(arbiter.pending(), 2);
        assert!(arbiter.decide(&state()).is_some());
        assert_eq!(arbiter.pending(), 0);
        // Losers are gone too; an immediate second decide yields nothing.
        assert!(arbiter.decide(&state()).is_none());
    }

    #[test]
    fn test_binding_ids_unique_at_same_instant() {
        let mut arbiter = Arbiter::new();
        let state = state();
        arbiter.request(suggestion("a", Priority::High, 0.8));
        let first = arbiter.decide(&state).unwrap();
        arbiter.request(suggestion("a", Priority::High, 0.8));
        let second = arbiter.decide(&state).unwrap();
        assert_ne!(first.binding_id, second.binding_id);
    }

    #[test]
    fn test_binding_id_names_the_kind() {
        let mut arbiter = Arbiter::new();
        arbiter.request(suggestion("a", Priority::High, 0.8));
        let action = arbiter.decide(&state()).unwrap();
        assert!(action.binding_id.ends_with("focus_block"));
    }
}
