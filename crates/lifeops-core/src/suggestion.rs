//! Candidate suggestions and arbiter decisions.

use serde::{Deserialize, Serialize};

/// How strongly a neuron wants its suggestion acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Numeric rank used by the arbiter's composite sort key.
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }
}

/// Generic suggestion object that every neuron can emit.
/// The arbiter compares these; immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeuronSuggestion {
    /// Name of the neuron that produced it.
    pub neuron: String,
    pub priority: Priority,
    /// Suggestion kind tag, e.g. "focus_block", "loop_sweep".
    pub kind: String,
    /// Human-facing description.
    pub text: String,
    pub expected_duration_min: u32,
    pub project: Option<String>,
    /// 0.0-1.0, for arbiter sorting.
    pub confidence: f64,
}

impl NeuronSuggestion {
    /// Build a suggestion, clamping confidence into [0.0, 1.0].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        neuron: impl Into<String>,
        priority: Priority,
        kind: impl Into<String>,
        text: impl Into<String>,
        expected_duration_min: u32,
        project: Option<String>,
        confidence: f64,
    ) -> Self {
        Self {
            neuron: neuron.into(),
            priority,
            kind: kind.into(),
            text: text.into(),
            expected_duration_min,
            project,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

/// A winning suggestion bound to a unique decision identifier.
///
/// Created by one `decide` call, consumed by the orchestrator to drive
/// presentation and acceptance, then discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestedAction {
    pub binding_id: String,
    pub suggestion: NeuronSuggestion,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_rank_ordering() {
        assert!(Priority::High.rank() > Priority::Medium.rank());
        assert!(Priority::Medium.rank() > Priority::Low.rank());
    }

    #[test]
    fn test_priority_serde_tags_are_uppercase() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"HIGH\"");
        let parsed: Priority = serde_json::from_str("\"MEDIUM\"").unwrap();
        assert_eq!(parsed, Priority::Medium);
    }

    #[test]
    fn test_confidence_is_clamped() {
        let s = NeuronSuggestion::new("focus", Priority::High, "focus_block", "x", 25, None, 1.7);
        assert_eq!(s.confidence, 1.0);
        let s = NeuronSuggestion::new("focus", Priority::High, "focus_block", "x", 25, None, -0.2);
        assert_eq!(s.confidence, 0.0);
    }
}
