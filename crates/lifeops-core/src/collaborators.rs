//! External collaborator interfaces.
//!
//! Calendar data, scene perception, and the HUD are out of scope for
//! the core; they appear only as the narrow traits below. Real device
//! integrations and the in-process mocks both plug in here.

use crate::state::{SceneState, TimeBlock};

/// Boxed error for collaborator calls. The core only ever reports
/// these, never inspects them.
pub type CollabError = Box<dyn std::error::Error + Send + Sync>;

/// One-shot calendar context used to seed startup state.
#[derive(Debug, Clone)]
pub struct CalendarBlock {
    pub title: String,
    pub mode: String,
    pub primary_project: Option<String>,
    pub time_block: TimeBlock,
    pub location_hint: String,
}

/// Supplies the current calendar block at startup.
pub trait CalendarSource {
    fn current_block(&self) -> Result<CalendarBlock, CollabError>;
}

/// Supplies a perception snapshot at startup.
pub trait SceneSource {
    fn detect(&self) -> Result<SceneState, CollabError>;
}

/// User-facing surface: presentation, acceptance, notification.
///
/// `confirm` is synchronous and blocks the current tick; a device-backed
/// implementation that times out waiting for input should answer
/// `false`, which the orchestrator treats as an ordinary rejection.
pub trait Hud {
    /// Display a suggestion's text. Fire-and-forget.
    fn show(&self, text: &str);

    /// Synchronous yes/no prompt.
    fn confirm(&self, prompt: &str) -> bool;

    /// Fire-and-forget completion announcement.
    fn notify(&self, text: &str);
}

/// In-process stand-ins for the real collaborators, used by the CLI's
/// test mode and by integration tests.
pub mod mock {
    use super::*;
    use crate::state::PeoplePresence;

    /// Fixed deep-work calendar block.
    #[derive(Debug, Clone, Default)]
    pub struct MockCalendar;

    impl CalendarSource for MockCalendar {
        fn current_block(&self) -> Result<CalendarBlock, CollabError> {
            Ok(CalendarBlock {
                title: "Deep Work - Project Horizon".to_string(),
                mode: "work_deep".to_string(),
                primary_project: Some("Project Horizon".to_string()),
                time_block: TimeBlock::Afternoon,
                location_hint: "home_office".to_string(),
            })
        }
    }

    /// Hard-coded "home office" scene.
    #[derive(Debug, Clone, Default)]
    pub struct MockScene;

    impl SceneSource for MockScene {
        fn detect(&self) -> Result<SceneState, CollabError> {
            Ok(SceneState {
                scene_type: "home_office".to_string(),
                objects: vec![
                    "laptop".to_string(),
                    "notebook".to_string(),
                    "coffee_mug".to_string(),
                ],
                people_present: PeoplePresence::Solo,
                text_snippets: Vec::new(),
                risk_flags: vec!["indoors".to_string(), "not_driving".to_string()],
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::{MockCalendar, MockScene};
    use super::*;

    #[test]
    fn test_mock_calendar_block() {
        let block = MockCalendar.current_block().unwrap();
        assert_eq!(block.mode, "work_deep");
        assert_eq!(block.primary_project.as_deref(), Some("Project Horizon"));
    }

    #[test]
    fn test_mock_scene_snapshot() {
        let scene = MockScene.detect().unwrap();
        assert_eq!(scene.scene_type, "home_office");
        assert!(scene.risk_flags.contains(&"not_driving".to_string()));
    }
}
