//! Focus neuron: suggests what to work on in deep-work mode.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Neuron;
use crate::state::{EnergyHint, LifeState};
use crate::suggestion::{NeuronSuggestion, Priority};

/// Mode tag in which the focus neuron operates.
pub const DEEP_WORK_MODE: &str = "work_deep";

/// Session type recorded for completed focus blocks.
pub const FOCUS_SESSION: &str = "focus";

/// Suggestion kind emitted by the focus neuron.
pub const FOCUS_BLOCK_KIND: &str = "focus_block";

/// Block lengths and spacing for the focus neuron.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusConfig {
    /// Full block, used at high/unknown energy (minutes).
    #[serde(default = "default_block_min")]
    pub default_block_min: u32,
    /// Shorter block for medium energy (minutes).
    #[serde(default = "default_short_block_min")]
    pub short_block_min: u32,
    /// Micro block for low energy (minutes).
    #[serde(default = "default_micro_block_min")]
    pub micro_block_min: u32,
    /// Minimum gap after a finished focus session before suggesting
    /// another (minutes).
    #[serde(default = "default_min_gap_min")]
    pub min_gap_between_focus_min: u32,
}

fn default_block_min() -> u32 {
    25
}

fn default_short_block_min() -> u32 {
    15
}

fn default_micro_block_min() -> u32 {
    5
}

fn default_min_gap_min() -> u32 {
    15
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            default_block_min: default_block_min(),
            short_block_min: default_short_block_min(),
            micro_block_min: default_micro_block_min(),
            min_gap_between_focus_min: default_min_gap_min(),
        }
    }
}

/// Suggests a focus block when the user is in deep-work mode with a
/// primary project and hasn't just finished one.
///
/// Block length, priority, confidence, and phrasing all follow the
/// current energy hint.
#[derive(Debug, Clone, Default)]
pub struct FocusNeuron {
    config: FocusConfig,
}

impl FocusNeuron {
    pub fn new(config: FocusConfig) -> Self {
        Self { config }
    }
}

impl Neuron for FocusNeuron {
    fn name(&self) -> &str {
        "focus"
    }

    fn propose(&self, state: &LifeState) -> Option<NeuronSuggestion> {
        if state.mode != DEEP_WORK_MODE {
            return None;
        }
        let project = state.primary_project.as_deref()?;

        // Don't nag right after a finished focus session.
        if let Some(gap) = state.minutes_since_last_session(FOCUS_SESSION) {
            if gap < self.config.min_gap_between_focus_min as i64 {
                debug!(gap_min = gap, "focus gap too short, holding back");
                return None;
            }
        }

        let (block_min, priority, confidence, verb) = match state.energy_hint {
            EnergyHint::Low => (
                self.config.micro_block_min,
                Priority::Medium,
                0.70,
                "Take a small bite out of",
            ),
            EnergyHint::Medium => (
                self.config.short_block_min,
                Priority::High,
                0.80,
                "Make solid progress on",
            ),
            EnergyHint::High | EnergyHint::Unknown => (
                self.config.default_block_min,
                Priority::High,
                0.85,
                "Push forward on",
            ),
        };

        let text = format!(
            "{verb} {project}: pick one small concrete subtask and work on it for {block_min} minutes."
        );

        Some(NeuronSuggestion::new(
            self.name(),
            priority,
            FOCUS_BLOCK_KIND,
            text,
            block_min,
            Some(project.to_string()),
            confidence,
        ))
    }
}
