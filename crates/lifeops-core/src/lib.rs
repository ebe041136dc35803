//! # LifeOps Core Library
//!
//! This library provides the core logic for LifeOps -- a tick-driven
//! engine that models a user's current "life state" and arbitrates
//! between competing behavioral suggestions to decide a single next
//! action per cycle.
//!
//! ## Architecture
//!
//! - **State Model**: A single mutable [`LifeState`] snapshot per user,
//!   owned exclusively by the orchestrator and re-stamped every tick
//! - **Neurons**: Plug-in suggestion generators behind the [`Neuron`]
//!   trait -- each reads the state and optionally proposes one action
//! - **Arbiter**: Collects candidate suggestions and picks at most one
//!   winner per tick by `(priority, confidence)` ranking
//! - **Orchestrator**: A wall-clock-driven cycle that requires the
//!   caller to invoke `tick()` periodically, tracks one in-progress
//!   action, and records completions back into state
//!
//! External collaborators (calendar, scene detection, HUD) are narrow
//! traits in [`collaborators`]; processes wire in real or mock
//! implementations at startup.
//!
//! ## Key Components
//!
//! - [`LifeState`]: The per-user context snapshot
//! - [`Neuron`]: Trait for suggestion generators
//! - [`Arbiter`]: Conflict resolution over pooled suggestions
//! - [`Orchestrator`]: Tick-cycle driver
//! - [`Config`]: TOML-based tuning knobs

pub mod arbiter;
pub mod collaborators;
pub mod config;
pub mod error;
pub mod neurons;
pub mod orchestrator;
pub mod state;
pub mod suggestion;

pub use arbiter::Arbiter;
pub use collaborators::{CalendarBlock, CalendarSource, Hud, SceneSource};
pub use config::Config;
pub use error::{ConfigError, CoreError, StartupError};
pub use neurons::{FocusConfig, FocusNeuron, Neuron, OpenLoopConfig, OpenLoopNeuron};
pub use orchestrator::{ActiveBlock, Orchestrator, RunSummary, TickReport};
pub use state::{
    EnergyHint, LifeState, OpenLoop, PeoplePresence, SceneState, SessionRecord, TimeBlock,
};
pub use suggestion::{NeuronSuggestion, Priority, SuggestedAction};
