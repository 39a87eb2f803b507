//! Agent prompt definitions and rendering
//!
//! Every agent is an [`AgentSpec`]: a role/goal/backstory identity plus a
//! handlebars task template over the standard input mapping. Definitions are
//! compiled into the binary; the engine renders them per invocation.

use std::sync::LazyLock;

use handlebars::Handlebars;

use crate::engine::AgentInput;

pub mod embedded;

/// One agent definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentSpec {
    /// Stable identifier, also the template registry key
    pub id: &'static str,
    pub role: &'static str,
    pub goal: &'static str,
    pub backstory: &'static str,

    /// Handlebars template rendered against the input mapping
    pub task_template: &'static str,
}

impl AgentSpec {
    /// System prompt assembled from the agent's identity
    pub fn system_prompt(&self) -> String {
        format!("You are {}.\n\nGoal: {}\n\n{}", self.role, self.goal, self.backstory)
    }
}

/// Shared registry with every embedded task template pre-registered
static REGISTRY: LazyLock<Handlebars<'static>> = LazyLock::new(|| {
    let mut hb = Handlebars::new();
    hb.register_escape_fn(handlebars::no_escape);
    for spec in embedded::ALL {
        hb.register_template_string(spec.id, spec.task_template)
            .expect("embedded template is valid");
    }
    hb
});

/// Render an agent's task prompt against an input mapping
pub fn render_task(spec: &AgentSpec, input: &AgentInput) -> Result<String, handlebars::RenderError> {
    REGISTRY.render(spec.id, &input.render_data())
}

/// The refinement coordinator
pub fn coordinator() -> &'static AgentSpec {
    &embedded::COORDINATOR
}

/// Look an agent up by id
pub fn by_id(id: &str) -> Option<&'static AgentSpec> {
    embedded::ALL.iter().copied().find(|spec| spec.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CourseRequest, CourseRequestDraft};

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
    fn test_by_id_finds_every_embedded_agent() {
        for spec in embedded::ALL {
            assert_eq!(by_id(spec.id).map(|s| s.id), Some(spec.id));
        }
        assert!(by_id("unknown_agent").is_none());
    }

    #[test]
    fn test_coordinator_id() {
        assert_eq!(coordinator().id, "coordinator");
    }

    #[test]
    fn test_render_task_substitutes_request_fields() {
        let input = AgentInput::new(&request(), "assistant: Welcome!", Some("make it 4 credits"));
        let rendered = render_task(coordinator(), &input).expect("coordinator template should render");
        assert!(rendered.contains("Introduction to AI"));
        assert!(rendered.contains("assistant: Welcome!"));
        assert!(rendered.contains("make it 4 credits"));
    }

    #[test]
    fn test_render_task_omits_absent_last_message() {
        let input = AgentInput::new(&request(), "", None);
        let rendered = render_task(coordinator(), &input).expect("coordinator template should render");
        assert!(!rendered.contains("Latest educator message"));
    }

    #[test]
    fn test_system_prompt_includes_identity() {
        let prompt = coordinator().system_prompt();
        assert!(prompt.contains(coordinator().role));
        assert!(prompt.contains(coordinator().goal));
    }
}
