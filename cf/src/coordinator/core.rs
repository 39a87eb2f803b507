//! Refinement controller
//!
//! Drives the turn-by-turn coordinator dialogue: validates the initial form
//! submission, invokes the refinement agent, merges extracted updates into
//! the course request, and detects the approval trigger. Owns the session
//! state exclusively for the life of the conversation, so a second turn can
//! never begin while a merge is pending.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::{CourseRequest, CourseRequestDraft, Message, ValidationError};
use crate::engine::{AgentEngine, AgentInput, EngineError};
use crate::extract;
use crate::prompts;
use crate::state::SessionState;

/// Keyword that ends the refinement phase (matched trimmed, case-insensitive)
pub const APPROVAL_KEYWORD: &str = "approve";

/// Fixed acknowledgement appended when approval is requested
pub const APPROVAL_ACK: &str = "Approved! Handing your refined course request to the design pipeline.";

/// Errors surfaced by refinement operations
///
/// All of them are scoped to one turn; the conversation stays resumable.
#[derive(Debug, Error)]
pub enum CoordinatorError {
    /// The form submission violated field constraints; no agent action taken
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A turn was attempted before any form submission
    #[error("no course request yet - submit the course form first")]
    SessionNotInitialized,

    /// The agent execution collaborator failed for this turn
    #[error("refinement agent invocation failed: {0}")]
    Engine(#[from] EngineError),
}

/// Outcome of one refinement turn
#[derive(Debug, Clone)]
pub struct TurnReply {
    /// Assistant text with any structured-update block stripped
    pub display_text: String,

    /// Set when an extracted update failed to merge; the request is unchanged
    pub merge_warning: Option<String>,

    /// True when this turn was the approval trigger
    pub approval_requested: bool,
}

/// Drives the coordinator dialogue over one owned session
pub struct RefinementController {
    engine: Arc<dyn AgentEngine>,
    session: SessionState,
}

impl RefinementController {
    pub fn new(engine: Arc<dyn AgentEngine>) -> Self {
        Self {
            engine,
            session: SessionState::new(),
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Exclusive access to the session, used at the pipeline boundary
    pub fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    /// Validate a form submission and open a refinement conversation
    ///
    /// On any violation the session is untouched and no agent action is
    /// taken. On success the session is reset (discarding any in-flight
    /// conversation), the request is set, and the coordinator produces the
    /// opening assistant message. Returns the initial transcript.
    pub async fn submit_form(&mut self, draft: &CourseRequestDraft) -> Result<Vec<Message>, CoordinatorError> {
        let request = draft.validate()?;
        info!(title = %request.course_title, "submit_form: form accepted, opening session");

        self.session.reset();
        self.session.set_request(request.clone());

        let input = AgentInput::new(&request, "", None);
        let raw = self.engine.invoke(prompts::coordinator(), &input).await?;
        let (_, warning) = self.absorb_reply(&request, &raw);
        if let Some(warning) = warning {
            warn!(%warning, "submit_form: opening reply carried an unmergeable update");
        }

        Ok(self.session.transcript().to_vec())
    }

    /// Run one refinement turn
    ///
    /// The approval keyword short-circuits: the user message and a fixed
    /// acknowledgement are appended with no agent invocation, and the caller
    /// is signalled to start the pipeline. An ordinary turn stages the
    /// transcript, invokes the coordinator, and only commits session
    /// mutations (user message, merge, assistant message) once the
    /// invocation has succeeded - an engine failure leaves no trace.
    pub async fn send_message(&mut self, text: &str) -> Result<TurnReply, CoordinatorError> {
        let Some(request) = self.session.request().cloned() else {
            return Err(CoordinatorError::SessionNotInitialized);
        };

        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case(APPROVAL_KEYWORD) {
            debug!("send_message: approval keyword, skipping agent invocation");
            self.session.add_user_message(text);
            self.session.add_assistant_message(APPROVAL_ACK);
            return Ok(TurnReply {
                display_text: APPROVAL_ACK.to_string(),
                merge_warning: None,
                approval_requested: true,
            });
        }

        let history = self.session.log().format_with_pending(text);
        let input = AgentInput::new(&request, &history, Some(text));
        let raw = self.engine.invoke(prompts::coordinator(), &input).await?;

        self.session.add_user_message(text);
        let (display_text, merge_warning) = self.absorb_reply(&request, &raw);

        Ok(TurnReply {
            display_text,
            merge_warning,
            approval_requested: false,
        })
    }

    /// Extract any structured update from a raw reply, merge it, and append
    /// the display text as the assistant message
    ///
    /// A failed merge leaves the request unchanged and comes back as a
    /// warning; the conversation continues either way.
    fn absorb_reply(&mut self, request: &CourseRequest, raw: &str) -> (String, Option<String>) {
        let extract::Extraction { display_text, update } = extract::extract(raw);

        let warning = match update {
            Some(update) if !update.is_empty() => match request.apply(&update) {
                Ok(merged) => {
                    info!(fields = ?update.touched_fields(), "absorb_reply: merged structured update");
                    self.session.set_request(merged);
                    None
                }
                Err(err) => {
                    warn!(%err, "absorb_reply: update failed validation, request unchanged");
                    Some(format!("Proposed update was not applied: {err}"))
                }
            },
            _ => None,
        };

        self.session.add_assistant_message(&display_text);
        (display_text, warning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::engine::client::mock::MockAgentEngine;

    fn valid_draft() -> CourseRequestDraft {
        CourseRequestDraft {
            course_title: "Introduction to AI".to_string(),
            course_description: "A survey of core AI concepts.".to_string(),
            course_credits: "3".to_string(),
            course_duration_weeks: "16".to_string(),
            course_level: "Undergraduate".to_string(),
            course_expectations: "Build working projects.".to_string(),
            course_modules: Vec::new(),
        }
    }

    async fn submitted_controller(replies: Vec<String>) -> (RefinementController, Arc<MockAgentEngine>) {
        let engine = Arc::new(MockAgentEngine::new(replies));
        let mut controller = RefinementController::new(engine.clone());
        controller
            .submit_form(&valid_draft())
            .await
            .expect("submission should succeed");
        (controller, engine)
    }

    #[tokio::test]
    async fn test_submit_form_rejects_invalid_draft_without_agent_action() {
        let engine = Arc::new(MockAgentEngine::new(vec!["unused".to_string()]));
        let mut controller = RefinementController::new(engine.clone());

        let mut draft = valid_draft();
        draft.course_description = "".to_string();
        let err = controller.submit_form(&draft).await.expect_err("draft should be rejected");

        match err {
            CoordinatorError::Validation(e) => {
                assert!(e.messages().iter().any(|m| m.contains("at least 15 characters")));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(engine.call_count(), 0);
        assert!(controller.session().request().is_none());
    }

    #[tokio::test]
    async fn test_submit_form_opens_conversation() {
        let (controller, engine) =
            submitted_controller(vec!["Welcome! Let's go over the details.".to_string()]).await;

        let transcript = controller.session().transcript();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0].role, Role::Assistant);
        assert_eq!(transcript[0].content, "Welcome! Let's go over the details.");
        assert_eq!(engine.call_count(), 1);
        assert_eq!(engine.invoked_agents(), vec!["coordinator".to_string()]);
    }

    #[tokio::test]
    async fn test_submit_form_merges_update_from_opening_reply() {
        let (controller, _) = submitted_controller(vec![
            "Welcome!\n```json\n{\"course_credits\": 4}\n```".to_string(),
        ])
        .await;

        let request = controller.session().request().expect("request should be set");
        assert_eq!(request.course_credits, 4);
        assert_eq!(controller.session().transcript()[0].content, "Welcome!");
    }

    #[tokio::test]
    async fn test_send_message_without_session_is_rejected() {
        let engine = Arc::new(MockAgentEngine::new(vec!["unused".to_string()]));
        let mut controller = RefinementController::new(engine.clone());

        let err = controller.send_message("hello").await.expect_err("turn should be rejected");
        assert!(matches!(err, CoordinatorError::SessionNotInitialized));
        assert_eq!(engine.call_count(), 0);
        assert!(controller.session().transcript().is_empty());
    }

    #[tokio::test]
    async fn test_approval_turn_skips_agent_and_appends_fixed_ack() {
        let (mut controller, engine) = submitted_controller(vec!["Welcome!".to_string()]).await;
        let before = controller.session().transcript().len();

        let reply = controller.send_message("  APPROVE  ").await.expect("approval turn should succeed");
        assert!(reply.approval_requested);
        assert_eq!(reply.display_text, APPROVAL_ACK);

        let transcript = controller.session().transcript();
        assert_eq!(transcript.len(), before + 2);
        assert_eq!(transcript[before].role, Role::User);
        assert_eq!(transcript[before + 1].content, APPROVAL_ACK);
        // only the submission invoked the agent
        assert_eq!(engine.call_count(), 1);
    }

    #[tokio::test]
    async fn test_ordinary_turn_merges_extracted_update() {
        let (mut controller, engine) = submitted_controller(vec![
            "Welcome!".to_string(),
            "Great idea!\n```json\n{\"course_credits\": 4}\n```".to_string(),
        ])
        .await;

        let reply = controller.send_message("make it 4 credits").await.expect("turn should succeed");
        assert_eq!(reply.display_text, "Great idea!");
        assert!(reply.merge_warning.is_none());
        assert!(!reply.approval_requested);

        let request = controller.session().request().expect("request should be set");
        assert_eq!(request.course_credits, 4);
        assert_eq!(controller.session().last_user_message(), Some("make it 4 credits"));
        assert_eq!(engine.call_count(), 2);
    }

    #[tokio::test]
    async fn test_unmergeable_update_warns_and_keeps_request() {
        let (mut controller, _) = submitted_controller(vec![
            "Welcome!".to_string(),
            "Sure.\n```json\n{\"course_credits\": 0}\n```".to_string(),
        ])
        .await;

        let reply = controller.send_message("zero credits please").await.expect("turn should succeed");
        assert_eq!(reply.display_text, "Sure.");
        let warning = reply.merge_warning.expect("merge warning should surface");
        assert!(warning.contains("not applied"));

        let request = controller.session().request().expect("request should be set");
        assert_eq!(request.course_credits, 3);
    }

    #[tokio::test]
    async fn test_malformed_block_passes_through_silently() {
        let raw = "Hmm.\n```json\n{\"course_credits\": }\n```";
        let (mut controller, _) = submitted_controller(vec!["Welcome!".to_string(), raw.to_string()]).await;

        let reply = controller.send_message("thoughts?").await.expect("turn should succeed");
        assert_eq!(reply.display_text, raw);
        assert!(reply.merge_warning.is_none());
    }

    #[tokio::test]
    async fn test_engine_failure_leaves_session_untouched() {
        let (mut controller, _) = submitted_controller(vec!["Welcome!".to_string()]).await;
        let transcript_before = controller.session().transcript().to_vec();
        let request_before = controller.session().request().cloned();

        let err = controller.send_message("another turn").await.expect_err("engine is out of replies");
        assert!(matches!(err, CoordinatorError::Engine(_)));

        assert_eq!(controller.session().transcript(), transcript_before.as_slice());
        assert_eq!(controller.session().request().cloned(), request_before);
        assert_eq!(controller.session().last_user_message(), None);
    }

    #[tokio::test]
    async fn test_resubmission_resets_session() {
        let (mut controller, engine) = submitted_controller(vec![
            "Welcome!".to_string(),
            "Noted.".to_string(),
            "Fresh start!".to_string(),
        ])
        .await;

        controller.send_message("tweak something").await.expect("turn should succeed");
        assert_eq!(controller.session().transcript().len(), 3);

        let mut draft = valid_draft();
        draft.course_title = "Data Analytics Foundations".to_string();
        let transcript = controller.submit_form(&draft).await.expect("resubmission should succeed");

        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0].content, "Fresh start!");
        let request = controller.session().request().expect("request should be set");
        assert_eq!(request.course_title, "Data Analytics Foundations");
        assert_eq!(engine.call_count(), 3);
    }
}
