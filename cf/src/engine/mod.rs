//! Agent execution engine
//!
//! The [`AgentEngine`] trait is the seam between the coordination core and
//! the language-model collaborator: an agent definition plus an input mapping
//! go in, a raw free-form reply comes out.

use std::sync::Arc;

use tracing::debug;

mod anthropic;
pub mod client;
mod error;
mod types;

pub use anthropic::AnthropicEngine;
pub use client::AgentEngine;
pub use error::EngineError;
pub use types::AgentInput;

use crate::config::EngineConfig;

/// Create an engine from the provider named in config
///
/// Currently supports "anthropic".
pub fn create_engine(config: &EngineConfig) -> Result<Arc<dyn AgentEngine>, EngineError> {
    debug!(provider = %config.provider, model = %config.model, "create_engine: called");
    match config.provider.as_str() {
        "anthropic" => Ok(Arc::new(AnthropicEngine::from_config(config)?)),
        other => Err(EngineError::Config(format!(
            "Unknown agent provider: '{}'. Supported: anthropic",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_engine_rejects_unknown_provider() {
        let config = EngineConfig {
            provider: "carrier-pigeon".to_string(),
            ..Default::default()
        };
        let err = create_engine(&config).err().expect("unknown provider should fail");
        assert!(matches!(err, EngineError::Config(_)));
    }
}
