//! AgentEngine trait definition

use async_trait::async_trait;

use super::{AgentInput, EngineError};
use crate::prompts::AgentSpec;

/// Opaque agent execution capability
///
/// Given an agent definition and a structured input mapping, produces the
/// agent's raw free-form reply. Prompt construction, model choice, and
/// retries live behind this seam. Callers keep one invocation in flight per
/// session and treat it as blocking-with-timeout: a failure is recoverable
/// for that turn or stage, never fatal to the session.
#[async_trait]
pub trait AgentEngine: Send + Sync {
    async fn invoke(&self, agent: &AgentSpec, input: &AgentInput) -> Result<String, EngineError>;
}
