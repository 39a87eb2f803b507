//! SessionState - canonical state for one course design session
//!
//! Owns the course request, the conversation log, the separately tracked last
//! user message, and the monotonic approval flag. Controllers mutate it
//! through `&mut`, so two turns can never race on the same request.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::domain::{ConversationLog, CourseRequest, Message};

/// Invalid session lifecycle transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    /// Approval was requested before any course request was set
    #[error("cannot approve a session without a course request")]
    InvalidTransition,
}

/// State for one session, created once and reset on each new form submission
#[derive(Debug, Clone)]
pub struct SessionState {
    id: String,
    course_request: Option<CourseRequest>,
    log: ConversationLog,
    last_user_message: Option<String>,
    approved: bool,
    created_at: DateTime<Utc>,
}

impl SessionState {
    pub fn new() -> Self {
        let id = Uuid::now_v7().to_string();
        debug!(%id, "new: creating session");
        Self {
            id,
            course_request: None,
            log: ConversationLog::default(),
            last_user_message: None,
            approved: false,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Clear request, log, last message, and approval flag
    ///
    /// Idempotent; used when a new form submission discards an in-flight
    /// conversation.
    pub fn reset(&mut self) {
        debug!(id = %self.id, "reset: clearing session state");
        self.course_request = None;
        self.log.clear();
        self.last_user_message = None;
        self.approved = false;
    }

    /// Replace the current course request
    pub fn set_request(&mut self, request: CourseRequest) {
        debug!(title = %request.course_title, "set_request: called");
        self.course_request = Some(request);
    }

    pub fn request(&self) -> Option<&CourseRequest> {
        self.course_request.as_ref()
    }

    /// Record a user message and track it as the most recent one
    pub fn add_user_message(&mut self, content: &str) {
        self.last_user_message = Some(content.to_string());
        self.log.push(Message::user(content));
    }

    /// Record an assistant message
    pub fn add_assistant_message(&mut self, content: &str) {
        self.log.push(Message::assistant(content));
    }

    pub fn last_user_message(&self) -> Option<&str> {
        self.last_user_message.as_deref()
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    /// Messages in insertion order
    pub fn transcript(&self) -> &[Message] {
        self.log.messages()
    }

    /// Conversation rendered as `role: content` lines
    pub fn formatted_history(&self) -> String {
        self.log.format()
    }

    /// Mark the session approved
    ///
    /// Fails when no request is set. The flag transition is monotonic: a
    /// second call on an approved session is a no-op.
    pub fn mark_approved(&mut self) -> Result<(), StateError> {
        if self.course_request.is_none() {
            return Err(StateError::InvalidTransition);
        }
        if self.approved {
            debug!(id = %self.id, "mark_approved: already approved, no-op");
            return Ok(());
        }
        debug!(id = %self.id, "mark_approved: session approved");
        self.approved = true;
        Ok(())
    }

    pub fn is_approved(&self) -> bool {
        self.approved
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
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
    fn test_reset_then_set_request_yields_empty_then_one_message_history() {
        let mut session = SessionState::new();
        session.add_user_message("stale");
        session.reset();
        assert_eq!(session.formatted_history(), "");

        session.set_request(request());
        session.add_assistant_message("Welcome! Let's refine your course.");
        assert_eq!(session.formatted_history(), "assistant: Welcome! Let's refine your course.");
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = SessionState::new();
        session.set_request(request());
        session.add_user_message("hello");
        session.mark_approved().expect("approval should succeed");

        session.reset();
        assert!(session.request().is_none());
        assert!(session.transcript().is_empty());
        assert!(session.last_user_message().is_none());
        assert!(!session.is_approved());
    }

    #[test]
    fn test_user_message_tracks_last() {
        let mut session = SessionState::new();
        session.add_user_message("first");
        session.add_assistant_message("reply");
        session.add_user_message("second");
        assert_eq!(session.last_user_message(), Some("second"));
        assert_eq!(session.transcript().len(), 3);
    }

    #[test]
    fn test_mark_approved_requires_request() {
        let mut session = SessionState::new();
        assert_eq!(session.mark_approved(), Err(StateError::InvalidTransition));
        assert!(!session.is_approved());
    }

    #[test]
    fn test_mark_approved_is_idempotent() {
        let mut session = SessionState::new();
        session.set_request(request());
        session.mark_approved().expect("first approval should succeed");
        session.mark_approved().expect("second approval should be a no-op");
        assert!(session.is_approved());
    }

    #[test]
    fn test_sessions_have_distinct_ids() {
        let a = SessionState::new();
        let b = SessionState::new();
        assert_ne!(a.id(), b.id());
    }
}
