//! Open-loop neuron: nudges toward the most urgent open commitment.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::focus::DEEP_WORK_MODE;
use super::Neuron;
use crate::state::LifeState;
use crate::suggestion::{NeuronSuggestion, Priority};

/// Suggestion kind emitted by the open-loop neuron.
pub const LOOP_SWEEP_KIND: &str = "loop_sweep";

/// Deadline horizon and block length for loop sweeps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenLoopConfig {
    /// Only loops due within this many hours are considered.
    #[serde(default = "default_horizon_hours")]
    pub horizon_hours: i64,
    /// Loops due within this many hours (or overdue) get high priority.
    #[serde(default = "default_urgent_hours")]
    pub urgent_hours: i64,
    /// Suggested sweep length (minutes).
    #[serde(default = "default_sweep_block_min")]
    pub sweep_block_min: u32,
}

fn default_horizon_hours() -> i64 {
    24
}

fn default_urgent_hours() -> i64 {
    2
}

fn default_sweep_block_min() -> u32 {
    10
}

impl Default for OpenLoopConfig {
    fn default() -> Self {
        Self {
            horizon_hours: default_horizon_hours(),
            urgent_hours: default_urgent_hours(),
            sweep_block_min: default_sweep_block_min(),
        }
    }
}

/// Proposes clearing the open loop with the nearest deadline.
///
/// Stays quiet in deep-work mode so it never competes with focus
/// blocks; loops without a deadline are left to the user.
#[derive(Debug, Clone, Default)]
pub struct OpenLoopNeuron {
    config: OpenLoopConfig,
}

impl OpenLoopNeuron {
    pub fn new(config: OpenLoopConfig) -> Self {
        Self { config }
    }
}

impl Neuron for OpenLoopNeuron {
    fn name(&self) -> &str {
        "open_loop"
    }

    fn propose(&self, state: &LifeState) -> Option<NeuronSuggestion> {
        if state.mode == DEEP_WORK_MODE {
            return None;
        }

        let horizon = state.timestamp + Duration::hours(self.config.horizon_hours);
        let urgent_cutoff = state.timestamp + Duration::hours(self.config.urgent_hours);

        let next_loop = state
            .open_loops
            .iter()
            .filter(|l| l.due_by.is_some_and(|due| due <= horizon))
            .min_by_key(|l| l.due_by)?;

        // filter above guarantees a deadline
        let due = next_loop.due_by?;
        let (priority, confidence) = if due <= urgent_cutoff {
            (Priority::High, 0.75)
        } else {
            (Priority::Medium, 0.60)
        };

        let block_min = self.config.sweep_block_min;
        let text = format!(
            "Clear '{}' before it slips: give it {block_min} minutes now.",
            next_loop.label
        );

        Some(NeuronSuggestion::new(
            self.name(),
            priority,
            LOOP_SWEEP_KIND,
            text,
            block_min,
            next_loop.project.clone(),
            confidence,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::OpenLoop;
    use chrono::{DateTime, TimeZone, Utc};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 14, 0, 0).unwrap()
    }

    fn loop_due_in(hours: i64, label: &str) -> OpenLoop {
        OpenLoop {
            kind: "email_reply".to_string(),
            label: label.to_string(),
            project: None,
            due_by: Some(t0() + Duration::hours(hours)),
        }
    }

    #[test]
    fn test_quiet_in_deep_work_mode() {
        let mut state = LifeState::new("tyler", t0());
        state.mode = "work_deep".to_string();
        state.open_loops.push(loop_due_in(1, "Reply to Client A"));
        assert!(OpenLoopNeuron::default().propose(&state).is_none());
    }

    #[test]
    fn test_no_loops_no_suggestion() {
        let state = LifeState::new("tyler", t0());
        assert!(OpenLoopNeuron::default().propose(&state).is_none());
    }

    #[test]
    fn test_loops_without_deadline_are_skipped() {
        let mut state = LifeState::new("tyler", t0());
        state.open_loops.push(OpenLoop {
            kind: "outline_section".to_string(),
            label: "Draft intro".to_string(),
            project: None,
            due_by: None,
        });
        assert!(OpenLoopNeuron::default().propose(&state).is_none());
    }

    #[test]
    fn test_beyond_horizon_is_ignored() {
        let mut state = LifeState::new("tyler", t0());
        state.open_loops.push(loop_due_in(48, "Renew passport"));
        assert!(OpenLoopNeuron::default().propose(&state).is_none());
    }

    #[test]
    fn test_picks_earliest_deadline() {
        let mut state = LifeState::new("tyler", t0());
        state.open_loops.push(loop_due_in(20, "Reply to Client A"));
        state.open_loops.push(loop_due_in(6, "Submit expense report"));
        let s = OpenLoopNeuron::default().propose(&state).unwrap();
        assert!(s.text.contains("Submit expense report"));
        assert_eq!(s.priority, Priority::Medium);
        assert_eq!(s.confidence, 0.60);
        assert_eq!(s.kind, LOOP_SWEEP_KIND);
    }

    #[test]
    fn test_imminent_deadline_is_high_priority() {
        let mut state = LifeState::new("tyler", t0());
        state.open_loops.push(loop_due_in(1, "Reply to Client A"));
        let s = OpenLoopNeuron::default().propose(&state).unwrap();
        assert_eq!(s.priority, Priority::High);
        assert_eq!(s.confidence, 0.75);
    }

    #[test]
    fn test_overdue_loop_is_high_priority() {
        let mut state = LifeState::new("tyler", t0());
        state.open_loops.push(loop_due_in(-3, "Pay invoice"));
        let s = OpenLoopNeuron::default().propose(&state).unwrap();
        assert_eq!(s.priority, Priority::High);
    }
}
