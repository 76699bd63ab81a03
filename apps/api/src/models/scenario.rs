use serde::{Deserialize, Serialize};

/// Number of scenarios generated for every occupation.
pub const SCENARIO_COUNT: usize = 5;

/// The kind of practice exercise. Drives the icon shown next to a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioKind {
    Email,
    Phone,
    Problem,
}

/// A generated practice exercise for one occupation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(rename = "type")]
    pub kind: ScenarioKind,
    pub title: String,
    pub prompt: String,
    pub tips: Vec<String>,
    /// Model answer demonstrating good practice.
    pub example: String,
    pub criteria: Vec<String>,
}

impl Scenario {
    /// Returns a description of the first empty required field, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.title.trim().is_empty() {
            Some("title")
        } else if self.prompt.trim().is_empty() {
            Some("prompt")
        } else if self.example.trim().is_empty() {
            Some("example")
        } else if self.tips.iter().all(|t| t.trim().is_empty()) {
            Some("tips")
        } else if self.criteria.iter().all(|c| c.trim().is_empty()) {
            Some("criteria")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Scenario {
        Scenario {
            kind: ScenarioKind::Phone,
            title: "Price check call".to_string(),
            prompt: "A customer calls asking about a price.".to_string(),
            tips: vec!["Greet the caller".to_string()],
            example: "Hello, thanks for calling...".to_string(),
            criteria: vec!["Polite greeting".to_string()],
        }
    }

    #[test]
    fn test_scenario_kind_uses_type_key_and_lowercase() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["type"], "phone");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn test_unknown_scenario_type_is_rejected() {
        let json = r#"{"type": "meeting", "title": "t", "prompt": "p",
            "tips": ["a"], "example": "e", "criteria": ["c"]}"#;
        assert!(serde_json::from_str::<Scenario>(json).is_err());
    }

    #[test]
    fn test_missing_field_reports_blank_values() {
        assert_eq!(sample().missing_field(), None);

        let mut blank_example = sample();
        blank_example.example = "   ".to_string();
        assert_eq!(blank_example.missing_field(), Some("example"));

        let mut no_criteria = sample();
        no_criteria.criteria.clear();
        assert_eq!(no_criteria.missing_field(), Some("criteria"));
    }
}
