//! Suggestion neurons.
//!
//! A neuron inspects the current [`LifeState`] and optionally proposes
//! one action. Additional neurons plug in behind the same trait without
//! any arbiter changes.

mod focus;
mod open_loop;

pub use focus::{FocusConfig, FocusNeuron};
pub use open_loop::{OpenLoopConfig, OpenLoopNeuron};

use crate::state::LifeState;
use crate::suggestion::NeuronSuggestion;

/// Every suggestion generator implements this trait.
///
/// Contract: `propose` is a pure function of the given state snapshot
/// (fixed configuration aside), returns `None` whenever its
/// preconditions are unmet -- including missing optional fields, which
/// are valid inputs rather than errors -- never panics on a well-formed
/// state, and is fast enough to run once per tick without blocking.
pub trait Neuron: Send + Sync {
    /// Unique identifier (e.g. "focus").
    fn name(&self) -> &str;

    /// Read the state, optionally emit one candidate suggestion.
    fn propose(&self, state: &LifeState) -> Option<NeuronSuggestion>;
}
