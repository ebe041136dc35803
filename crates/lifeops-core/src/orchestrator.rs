//! Tick-cycle orchestration.
//!
//! The orchestrator is a wall-clock-driven state machine. It does not
//! use internal threads -- the caller is responsible for calling
//! `tick()` periodically (or letting [`Orchestrator::run_for`] drive it
//! against the system clock).
//!
//! Per tick:
//!
//! 1. Re-stamp the state's timestamp (never backwards)
//! 2. If no block is active, collect proposals from every neuron
//! 3. Ask the arbiter for a decision; present and confirm it via the HUD
//! 4. If a block is active and its duration has elapsed, notify,
//!    record the completed session, and go idle
//!
//! Everything runs sequentially on one thread; the only suspension
//! point is the inter-tick sleep in `run_for`.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::arbiter::Arbiter;
use crate::collaborators::{CalendarSource, Hud, SceneSource};
use crate::error::{Result, StartupError};
use crate::neurons::Neuron;
use crate::state::{EnergyHint, LifeState, SessionRecord};

/// The single cross-tick variable: one accepted block being worked on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveBlock {
    pub binding_id: String,
    /// Suggestion kind that was accepted (e.g. "focus_block").
    pub kind: String,
    pub project: Option<String>,
    pub duration_min: u32,
    pub started_at: DateTime<Utc>,
}

/// What one tick did. Returned so callers and tests can observe the
/// cycle without parsing logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TickReport {
    /// Nothing proposed and nothing running.
    Idle { at: DateTime<Utc> },
    /// A decision was shown and accepted; its block is now active.
    Accepted {
        binding_id: String,
        kind: String,
        duration_min: u32,
        at: DateTime<Utc>,
    },
    /// A decision was shown and declined. Not retried this tick.
    Rejected {
        binding_id: String,
        kind: String,
        at: DateTime<Utc>,
    },
    /// A block is running and hasn't reached its duration yet.
    InProgress {
        kind: String,
        elapsed_min: i64,
        duration_min: u32,
        at: DateTime<Utc>,
    },
    /// The active block finished and was recorded into state.
    Completed {
        kind: String,
        project: Option<String>,
        duration_min: u32,
        at: DateTime<Utc>,
    },
}

/// End-of-run digest derived from the session history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub counts_by_kind: BTreeMap<String, usize>,
    pub completed: Vec<SessionRecord>,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Ticks run: {}", self.ticks)?;
        writeln!(f, "Completed sessions: {}", self.completed.len())?;
        for (kind, count) in &self.counts_by_kind {
            writeln!(f, "  {kind}: {count}")?;
        }
        for (i, s) in self.completed.iter().enumerate() {
            writeln!(
                f,
                "  #{}: type={}, project={}, duration={} min, ended_at={}",
                i + 1,
                s.kind,
                s.project.as_deref().unwrap_or("none"),
                s.duration_min,
                s.ended_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
            )?;
        }
        Ok(())
    }
}

/// Suggestion kinds use the `<type>_block` convention; session records
/// store the bare type ("focus_block" -> "focus").
fn session_kind(suggestion_kind: &str) -> &str {
    suggestion_kind
        .strip_suffix("_block")
        .unwrap_or(suggestion_kind)
}

/// Owns the one live [`LifeState`], the neuron list, and the arbiter,
/// and drives the per-tick cycle.
pub struct Orchestrator {
    state: LifeState,
    neurons: Vec<Box<dyn Neuron>>,
    arbiter: Arbiter,
    hud: Box<dyn Hud>,
    active: Option<ActiveBlock>,
    ticks: u64,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("state", &self.state)
            .field("neurons", &self.neurons.len())
            .field("active", &self.active)
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    /// Wrap an already-seeded state. Neurons are registered separately,
    /// in presentation order.
    pub fn new(state: LifeState, hud: Box<dyn Hud>) -> Self {
        Self {
            state,
            neurons: Vec::new(),
            arbiter: Arbiter::new(),
            hud,
            active: None,
            ticks: 0,
        }
    }

    /// Seed startup state from the collaborator snapshots. Collaborator
    /// failure here is fatal -- it aborts before the first tick.
    pub fn bootstrap(
        user_id: impl Into<String>,
        calendar: &dyn CalendarSource,
        scene: &dyn SceneSource,
        hud: Box<dyn Hud>,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let block = calendar
            .current_block()
            .map_err(|e| StartupError::CalendarUnavailable(e.to_string()))?;
        let scene = scene
            .detect()
            .map_err(|e| StartupError::SceneUnavailable(e.to_string()))?;
        let state = LifeState::from_snapshots(user_id, now, &block, scene);
        info!("{}", state.describe_context());
        Ok(Self::new(state, hud))
    }

    /// Add a neuron to the end of the polling order.
    pub fn register(&mut self, neuron: Box<dyn Neuron>) {
        self.neurons.push(neuron);
    }

    pub fn state(&self) -> &LifeState {
        &self.state
    }

    pub fn active_block(&self) -> Option<&ActiveBlock> {
        self.active.as_ref()
    }

    /// Update the advisory energy signal between ticks.
    pub fn set_energy_hint(&mut self, hint: EnergyHint) {
        self.state.energy_hint = hint;
    }

    /// Run one full cycle at `now`.
    pub fn tick(&mut self, now: DateTime<Utc>) -> TickReport {
        self.ticks += 1;
        self.state.touch(now);
        // After clamping; all tick-local arithmetic uses this.
        let now = self.state.timestamp;

        // Solicit proposals only while idle.
        if self.active.is_none() {
            for neuron in &self.neurons {
                if let Some(suggestion) = neuron.propose(&self.state) {
                    debug!(neuron = %suggestion.neuron, "proposal");
                    self.arbiter.request(suggestion);
                }
            }
        }

        let decision = self.arbiter.decide(&self.state);

        let mut report: Option<TickReport> = None;
        if self.active.is_none() {
            if let Some(action) = decision {
                self.hud.show(&action.suggestion.text);
                if self.hud.confirm("Accept this suggestion?") {
                    info!(
                        binding_id = %action.binding_id,
                        duration_min = action.suggestion.expected_duration_min,
                        "suggestion accepted, block started"
                    );
                    self.active = Some(ActiveBlock {
                        binding_id: action.binding_id.clone(),
                        kind: action.suggestion.kind.clone(),
                        project: action.suggestion.project.clone(),
                        duration_min: action.suggestion.expected_duration_min,
                        started_at: now,
                    });
                    report = Some(TickReport::Accepted {
                        binding_id: action.binding_id,
                        kind: action.suggestion.kind,
                        duration_min: action.suggestion.expected_duration_min,
                        at: now,
                    });
                } else {
                    info!(binding_id = %action.binding_id, "suggestion rejected");
                    report = Some(TickReport::Rejected {
                        binding_id: action.binding_id,
                        kind: action.suggestion.kind,
                        at: now,
                    });
                }
            }
        }

        if let Some(block) = self.active.clone() {
            let elapsed_min = (now - block.started_at).num_minutes();
            if elapsed_min >= block.duration_min as i64 {
                self.active = None;
                let kind = session_kind(&block.kind).to_string();
                self.hud.notify(&format!(
                    "{} session complete ({} min).",
                    kind, block.duration_min
                ));
                info!(binding_id = %block.binding_id, kind = %kind, "block completed");
                self.state.record_session(SessionRecord::completed(
                    kind.clone(),
                    block.project.clone(),
                    block.duration_min,
                    now,
                ));
                report = Some(TickReport::Completed {
                    kind,
                    project: block.project,
                    duration_min: block.duration_min,
                    at: now,
                });
            } else if report.is_none() {
                report = Some(TickReport::InProgress {
                    kind: block.kind.clone(),
                    elapsed_min,
                    duration_min: block.duration_min,
                    at: now,
                });
            }
        }

        report.unwrap_or(TickReport::Idle { at: now })
    }

    /// Drive ticks against the system clock until `run_duration` has
    /// elapsed, sleeping `tick_interval` between cycles, then halt and
    /// return the summary.
    pub fn run_for(
        &mut self,
        run_duration: Duration,
        tick_interval: std::time::Duration,
    ) -> RunSummary {
        let deadline = Utc::now() + run_duration;
        while Utc::now() < deadline {
            let report = self.tick(Utc::now());
            debug!(?report, "tick");
            std::thread::sleep(tick_interval);
        }
        self.summary()
    }

    /// Digest of completed sessions so far, by type.
    pub fn summary(&self) -> RunSummary {
        let completed: Vec<SessionRecord> = self
            .state
            .recent_sessions()
            .iter()
            .filter(|s| s.completed)
            .cloned()
            .collect();
        let mut counts_by_kind: BTreeMap<String, usize> = BTreeMap::new();
        for s in &completed {
            *counts_by_kind.entry(s.kind.clone()).or_default() += 1;
        }
        RunSummary {
            ticks: self.ticks,
            counts_by_kind,
            completed,
        }
    }
}
