//! The mutable life-state model.
//!
//! One [`LifeState`] instance exists per user per process. The
//! orchestrator owns it exclusively and is the only writer; neurons
//! receive a shared borrow and therefore a read-only view. State
//! advances by re-stamping the timestamp each tick and appending
//! session records on completion events -- past records are never
//! edited.

mod scene;
mod session;

pub use scene::{PeoplePresence, SceneState};
pub use session::{OpenLoop, SessionRecord};

use std::collections::HashMap;

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::collaborators::CalendarBlock;

/// Coarse slice of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeBlock {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeBlock {
    /// Map an hour-of-day (0-23) to its block.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => Self::Morning,
            12..=16 => Self::Afternoon,
            17..=21 => Self::Evening,
            _ => Self::Night,
        }
    }
}

/// Advisory energy signal from external input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyHint {
    Low,
    Medium,
    High,
    #[default]
    Unknown,
}

impl std::str::FromStr for EnergyHint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "unknown" => Ok(Self::Unknown),
            other => Err(format!("unknown energy hint '{other}'")),
        }
    }
}

/// The full per-user context snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifeState {
    pub user_id: String,
    /// Monotonically non-decreasing across ticks; see [`LifeState::touch`].
    pub timestamp: DateTime<Utc>,

    // High-level mode & context
    /// e.g. "work_deep", "walking", "gym", "home_evening"
    pub mode: String,
    pub time_block: TimeBlock,
    /// e.g. "home_office", "living_room", "gym"
    pub location_hint: String,

    // Perception
    pub scene: SceneState,

    // Projects & work
    pub primary_project: Option<String>,
    pub secondary_projects: Vec<String>,
    pub open_loops: Vec<OpenLoop>,
    recent_sessions: Vec<SessionRecord>,

    // Internal signals
    pub energy_hint: EnergyHint,
    /// Free-form settings, opaque to the core. Neurons may read
    /// specific keys by convention (e.g. "nudges_per_hour_max").
    pub preference_profile: HashMap<String, serde_json::Value>,
}

impl LifeState {
    /// A bare state for the given user at `now`. The time block is
    /// derived from the clock; everything else starts empty/unknown.
    pub fn new(user_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.into(),
            timestamp: now,
            mode: "unknown".to_string(),
            time_block: TimeBlock::from_hour(now.hour()),
            location_hint: "unknown".to_string(),
            scene: SceneState::default(),
            primary_project: None,
            secondary_projects: Vec::new(),
            open_loops: Vec::new(),
            recent_sessions: Vec::new(),
            energy_hint: EnergyHint::Unknown,
            preference_profile: HashMap::new(),
        }
    }

    /// Seed startup state from the external collaborator snapshots.
    pub fn from_snapshots(
        user_id: impl Into<String>,
        now: DateTime<Utc>,
        block: &CalendarBlock,
        scene: SceneState,
    ) -> Self {
        let mut state = Self::new(user_id, now);
        state.mode = block.mode.clone();
        state.time_block = block.time_block;
        state.location_hint = block.location_hint.clone();
        state.primary_project = block.primary_project.clone();
        state.scene = scene;
        state
    }

    /// Re-stamp the snapshot for a new tick. The timestamp never moves
    /// backwards; a stale `now` leaves it unchanged.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        if now > self.timestamp {
            self.timestamp = now;
        }
    }

    /// Completed and ongoing session history, oldest first.
    pub fn recent_sessions(&self) -> &[SessionRecord] {
        &self.recent_sessions
    }

    /// Append a session record. History is append-only; records are
    /// immutable once added.
    pub fn record_session(&mut self, record: SessionRecord) {
        self.recent_sessions.push(record);
    }

    /// The session of the given type with the latest end timestamp.
    /// Sessions that haven't ended are ignored.
    pub fn last_session_of_type(&self, kind: &str) -> Option<&SessionRecord> {
        self.recent_sessions
            .iter()
            .filter(|s| s.kind == kind && s.ended_at.is_some())
            .max_by_key(|s| s.ended_at)
    }

    /// Whole minutes since the last session of the given type ended,
    /// or `None` if no session of that type has a defined end.
    pub fn minutes_since_last_session(&self, kind: &str) -> Option<i64> {
        let last = self.last_session_of_type(kind)?;
        let ended_at = last.ended_at?;
        Some((self.timestamp - ended_at).num_minutes())
    }

    /// One-line summary of what is going on right now. Used for logs
    /// and debugging.
    pub fn describe_context(&self) -> String {
        format!(
            "[{}] mode={}, location={}, scene={}, primary_project={}, time_block={:?}, energy={:?}, open_loops={}",
            self.timestamp.to_rfc3339(),
            self.mode,
            self.location_hint,
            self.scene.describe(),
            self.primary_project.as_deref().unwrap_or("none"),
            self.time_block,
            self.energy_hint,
            self.open_loops.len(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 14, 0, 0).unwrap()
    }

    #[test]
    fn test_touch_is_monotonic() {
        let mut state = LifeState::new("tyler", t0());
        state.touch(t0() + Duration::seconds(30));
        assert_eq!(state.timestamp, t0() + Duration::seconds(30));
        // An earlier stamp must not rewind the clock.
        state.touch(t0());
        assert_eq!(state.timestamp, t0() + Duration::seconds(30));
    }

    #[test]
    fn test_minutes_since_none_without_history() {
        let state = LifeState::new("tyler", t0());
        assert_eq!(state.minutes_since_last_session("focus"), None);
    }

    #[test]
    fn test_minutes_since_ignores_sessions_without_end() {
        let mut state = LifeState::new("tyler", t0());
        state.record_session(SessionRecord {
            id: uuid::Uuid::new_v4(),
            kind: "focus".to_string(),
            project: None,
            duration_min: 25,
            completed: false,
            ended_at: None,
        });
        assert_eq!(state.minutes_since_last_session("focus"), None);
    }

    #[test]
    fn test_minutes_since_uses_latest_end() {
        let mut state = LifeState::new("tyler", t0());
        state.record_session(SessionRecord::completed(
            "focus",
            None,
            25,
            t0() - Duration::minutes(90),
        ));
        state.record_session(SessionRecord::completed(
            "focus",
            None,
            15,
            t0() - Duration::minutes(40),
        ));
        state.record_session(SessionRecord::completed(
            "walk",
            None,
            10,
            t0() - Duration::minutes(5),
        ));
        assert_eq!(state.minutes_since_last_session("focus"), Some(40));
        assert_eq!(state.minutes_since_last_session("walk"), Some(5));
    }

    #[test]
    fn test_minutes_since_floors_to_whole_minutes() {
        let mut state = LifeState::new("tyler", t0());
        state.record_session(SessionRecord::completed(
            "focus",
            None,
            25,
            t0() - Duration::seconds(119),
        ));
        assert_eq!(state.minutes_since_last_session("focus"), Some(1));
    }

    #[test]
    fn test_time_block_from_hour() {
        assert_eq!(TimeBlock::from_hour(6), TimeBlock::Morning);
        assert_eq!(TimeBlock::from_hour(14), TimeBlock::Afternoon);
        assert_eq!(TimeBlock::from_hour(19), TimeBlock::Evening);
        assert_eq!(TimeBlock::from_hour(2), TimeBlock::Night);
        assert_eq!(TimeBlock::from_hour(23), TimeBlock::Night);
    }

    #[test]
    fn test_energy_hint_parses() {
        assert_eq!("HIGH".parse::<EnergyHint>(), Ok(EnergyHint::High));
        assert!("jittery".parse::<EnergyHint>().is_err());
    }

    #[test]
    fn test_describe_context_mentions_project_and_mode() {
        let mut state = LifeState::new("tyler", t0());
        state.mode = "work_deep".to_string();
        state.primary_project = Some("Project Horizon".to_string());
        let desc = state.describe_context();
        assert!(desc.contains("mode=work_deep"));
        assert!(desc.contains("primary_project=Project Horizon"));
    }

    proptest! {
        /// Elapsed minutes are never negative as long as the state
        /// clock is at or past the session end.
        #[test]
        fn prop_minutes_since_never_negative(gap_secs in 0i64..1_000_000) {
            let mut state = LifeState::new("tyler", t0());
            state.record_session(SessionRecord::completed(
                "focus",
                None,
                25,
                t0() - Duration::seconds(gap_secs),
            ));
            let minutes = state.minutes_since_last_session("focus").unwrap();
            prop_assert!(minutes >= 0);
            prop_assert_eq!(minutes, gap_secs / 60);
        }
    }
}
