//! Agent invocation input mapping
//!
//! `AgentInput` is the stable contract handed to every invocation: the course
//! request fields flattened individually, the formatted conversation history,
//! the last user message when one exists, and the two static framework
//! references passed through unchanged.

use serde_json::{Map, Value, json};
use tracing::debug;

use crate::domain::CourseRequest;
use crate::frameworks;

/// Input mapping for one agent invocation
#[derive(Debug, Clone, Default)]
pub struct AgentInput {
    entries: Map<String, Value>,
}

impl AgentInput {
    /// Build the standard mapping for a session snapshot
    pub fn new(request: &CourseRequest, conversation_history: &str, last_user_message: Option<&str>) -> Self {
        debug!(
            title = %request.course_title,
            history_len = conversation_history.len(),
            has_last_message = last_user_message.is_some(),
            "new: building agent input"
        );
        let mut entries = Map::new();
        entries.insert(
            "course_request".to_string(),
            serde_json::to_value(request).unwrap_or(Value::Null),
        );
        entries.insert("course_title".to_string(), json!(request.course_title));
        entries.insert("course_description".to_string(), json!(request.course_description));
        entries.insert("course_credits".to_string(), json!(request.course_credits));
        entries.insert("course_duration_weeks".to_string(), json!(request.course_duration_weeks));
        entries.insert("course_level".to_string(), json!(request.course_level));
        entries.insert("course_expectations".to_string(), json!(request.course_expectations));
        entries.insert("conversation_history".to_string(), json!(conversation_history));
        if let Some(last) = last_user_message {
            entries.insert("last_user_message".to_string(), json!(last));
        }
        entries.insert("kdka_framework".to_string(), frameworks::kdka().clone());
        entries.insert("prrr_framework".to_string(), frameworks::prrr().clone());
        Self { entries }
    }

    /// Add or replace one entry
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn entries(&self) -> &Map<String, Value> {
        &self.entries
    }

    /// Template view of the mapping
    ///
    /// Strings pass through; any other value is pretty-printed JSON so the
    /// framework references render legibly inside prompts.
    pub fn render_data(&self) -> Map<String, Value> {
        self.entries
            .iter()
            .map(|(key, value)| {
                let rendered = match value {
                    Value::String(_) => value.clone(),
                    other => Value::String(serde_json::to_string_pretty(other).unwrap_or_default()),
                };
                (key.clone(), rendered)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CourseRequestDraft;

    fn request() -> CourseRequest {
        CourseRequestDraft {
            course_title: "Introduction to AI".to_string(),
            course_description: "A survey of core AI concepts.".to_string(),
            course_credits: "3".to_string(),
            course_duration_weeks: "16".to_string(),
            course_level: "Undergraduate".to_string(),
            course_expectations: "Build working projects.".to_string(),
            course_modules: Vec::new(),
        }
        .validate()
        .expect("draft should be valid")
    }

    #[test]
    fn test_input_contains_flattened_fields_and_frameworks() {
        let input = AgentInput::new(&request(), "assistant: Welcome!", None);
        assert_eq!(input.get("course_title"), Some(&json!("Introduction to AI")));
        assert_eq!(input.get("course_credits"), Some(&json!(3)));
        assert_eq!(input.get("conversation_history"), Some(&json!("assistant: Welcome!")));
        assert!(input.get("last_user_message").is_none());
        assert!(input.get("kdka_framework").is_some());
        assert!(input.get("prrr_framework").is_some());
    }

    #[test]
    fn test_last_user_message_present_when_supplied() {
        let input = AgentInput::new(&request(), "", Some("make it 4 credits"));
        assert_eq!(input.get("last_user_message"), Some(&json!("make it 4 credits")));
    }

    #[test]
    fn test_render_data_stringifies_structured_values() {
        let input = AgentInput::new(&request(), "", None);
        let data = input.render_data();
        let kdka = data.get("kdka_framework").expect("framework should be present");
        assert!(kdka.is_string());
        assert!(kdka.as_str().unwrap_or_default().contains("dimensions"));
        // plain strings pass through untouched
        assert_eq!(data.get("course_title"), Some(&json!("Introduction to AI")));
    }
}
