//! Perception snapshot submodel.

use serde::{Deserialize, Serialize};

/// How many people the perception layer believes are around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeoplePresence {
    Solo,
    SmallGroup,
    Crowd,
    #[default]
    Unknown,
}

/// High-level description of what the glasses/phone currently see.
///
/// Everything here is advisory input from an external perception
/// source -- the core never validates it and neurons must tolerate
/// any combination of values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneState {
    /// e.g. "home_office", "kitchen", "gym", "outdoors"
    pub scene_type: String,
    /// Detected objects: "laptop", "notebook", "barbell", ...
    pub objects: Vec<String>,
    pub people_present: PeoplePresence,
    /// OCR-style text fragments picked up in the scene
    pub text_snippets: Vec<String>,
    /// e.g. "indoors", "not_driving"
    pub risk_flags: Vec<String>,
}

impl Default for SceneState {
    fn default() -> Self {
        Self {
            scene_type: "unknown".to_string(),
            objects: Vec::new(),
            people_present: PeoplePresence::Unknown,
            text_snippets: Vec::new(),
            risk_flags: Vec::new(),
        }
    }
}

impl SceneState {
    /// Short scene description for log lines.
    pub fn describe(&self) -> String {
        let mut desc = self.scene_type.clone();
        if !self.objects.is_empty() {
            let shown: Vec<&str> = self.objects.iter().take(3).map(String::as_str).collect();
            desc.push_str(&format!(" with {}", shown.join(", ")));
            if self.objects.len() > 3 {
                desc.push_str(", ...");
            }
        }
        desc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scene_is_unknown() {
        let scene = SceneState::default();
        assert_eq!(scene.scene_type, "unknown");
        assert_eq!(scene.people_present, PeoplePresence::Unknown);
        assert!(scene.objects.is_empty());
    }

    #[test]
    fn test_describe_truncates_object_list() {
        let scene = SceneState {
            scene_type: "home_office".to_string(),
            objects: vec![
                "laptop".to_string(),
                "notebook".to_string(),
                "coffee_mug".to_string(),
                "monitor".to_string(),
            ],
            ..Default::default()
        };
        assert_eq!(
            scene.describe(),
            "home_office with laptop, notebook, coffee_mug, ..."
        );
    }

    #[test]
    fn test_people_presence_serde_tags() {
        let json = serde_json::to_string(&PeoplePresence::SmallGroup).unwrap();
        assert_eq!(json, "\"small_group\"");
    }
}
