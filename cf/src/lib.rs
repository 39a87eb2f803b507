//! CourseForge - Multi-Agent Course Design Orchestrator
//!
//! CourseForge drives a two-phase course design workflow. An educator submits
//! a course request; a coordinator agent refines it over a multi-turn
//! conversation, merging structured edits embedded in its replies back into
//! the canonical request. Once the educator approves, a fixed chain of
//! specialist agents (instructional planner, content author, technical
//! designer, content reviewer, ethics auditor, resource curator) each
//! transform the same shared context into one part of the finished design
//! package.
//!
//! # Core Concepts
//!
//! - **One session, one owner**: `SessionState` is passed by `&mut` through
//!   the controllers; no ambient globals, no racing turns
//! - **Total extraction**: structured-update parsing never raises; malformed
//!   blocks fall through as plain text
//! - **Partial results**: a failing pipeline stage stops the chain but keeps
//!   every output that already completed
//!
//! # Modules
//!
//! - [`domain`] - course requests, conversation messages, stage output contracts
//! - [`state`] - per-session state and its lifecycle
//! - [`extract`] - structured-update extraction from agent replies
//! - [`coordinator`] - the refinement conversation controller
//! - [`pipeline`] - the approved design pipeline
//! - [`engine`] - the agent execution seam and its Anthropic implementation
//! - [`prompts`] - embedded agent definitions
//! - [`frameworks`] - static pedagogical reference objects
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod cli;
pub mod config;
pub mod coordinator;
pub mod domain;
pub mod engine;
pub mod extract;
pub mod frameworks;
pub mod pipeline;
pub mod prompts;
pub mod state;

// Re-export commonly used types
pub use config::{Config, EngineConfig, PipelineConfig};
pub use coordinator::{APPROVAL_ACK, APPROVAL_KEYWORD, CoordinatorError, RefinementController, TurnReply};
pub use domain::{
    ConversationLog, CourseModule, CourseRequest, CourseRequestDraft, CourseRequestUpdate, Message, Role,
    ValidationError, Violation,
};
pub use engine::{AgentEngine, AgentInput, AnthropicEngine, EngineError, create_engine};
pub use extract::{Extraction, extract};
pub use pipeline::{PipelineController, PipelineReport, StageError, StageFailure, StageKind, StageOutput, StageResult};
pub use prompts::AgentSpec;
pub use state::{SessionState, StateError};
