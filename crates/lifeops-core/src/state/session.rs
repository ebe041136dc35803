//! Session history and open-commitment submodels.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An unresolved commitment or task that matters.
///
/// Open loops are tracked in state for neurons that care about them;
/// the arbiter and orchestrator never read them directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenLoop {
    /// e.g. "email_reply", "outline_section"
    #[serde(rename = "type")]
    pub kind: String,
    /// Human label: "Reply to Client A"
    pub label: String,
    /// Which project it's attached to, if any
    pub project: Option<String>,
    /// Soft/hard deadline
    pub due_by: Option<DateTime<Utc>>,
}

/// A structured block of time the user spent (focus block, workout, ...).
///
/// Records are immutable once appended to the state's history; used to
/// avoid over-scheduling and to understand recent effort.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: Uuid,
    /// "focus", "workout", "walk", ...
    #[serde(rename = "type")]
    pub kind: String,
    pub project: Option<String>,
    pub duration_min: u32,
    pub completed: bool,
    /// Absent while the session is still ongoing.
    pub ended_at: Option<DateTime<Utc>>,
}

impl SessionRecord {
    /// A completed session that ended at `ended_at`.
    pub fn completed(
        kind: impl Into<String>,
        project: Option<String>,
        duration_min: u32,
        ended_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: kind.into(),
            project,
            duration_min,
            completed: true,
            ended_at: Some(ended_at),
        }
    }
}
