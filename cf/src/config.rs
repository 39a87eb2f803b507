//! CourseForge configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Agent engine configuration
    pub engine: EngineConfig,

    /// Design pipeline configuration
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Call this early in startup so a missing API key fails with a clear
    /// message instead of on the first agent invocation.
    pub fn validate(&self) -> Result<()> {
        if std::env::var(&self.engine.api_key_env).is_err() {
            return Err(eyre::eyre!(
                "API key not found. Set the {} environment variable.",
                self.engine.api_key_env
            ));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // Explicit config path is never silently skipped
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Project-local config: .courseforge.yml
        let local_config = PathBuf::from(".courseforge.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // User config: ~/.config/courseforge/courseforge.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("courseforge").join("courseforge.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Agent engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Provider name (currently only "anthropic" supported)
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum tokens per reply
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            provider: "anthropic".to_string(),
            model: "claude-sonnet-4-20250514".to_string(),
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            max_tokens: 4096,
            timeout_ms: 120_000,
        }
    }
}

/// Design pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Target LMS platform handed to the technical design stage
    #[serde(rename = "lms-platform")]
    pub lms_platform: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            lms_platform: "To be determined".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.engine.provider, "anthropic");
        assert_eq!(config.engine.api_key_env, "ANTHROPIC_API_KEY");
        assert_eq!(config.engine.max_tokens, 4096);
        assert_eq!(config.pipeline.lms_platform, "To be determined");
    }

    #[test]
    fn test_load_from_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "engine:\n  model: test-model\n  max-tokens: 512\npipeline:\n  lms-platform: Canvas\n"
        )
        .expect("write config");

        let path = file.path().to_path_buf();
        let config = Config::load(Some(&path)).expect("config should load");
        assert_eq!(config.engine.model, "test-model");
        assert_eq!(config.engine.max_tokens, 512);
        // unspecified fields fall back to defaults
        assert_eq!(config.engine.provider, "anthropic");
        assert_eq!(config.pipeline.lms_platform, "Canvas");
    }

    #[test]
    fn test_load_rejects_bad_yaml_at_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "engine: [not, a, mapping").expect("write config");
        let path = file.path().to_path_buf();
        assert!(Config::load(Some(&path)).is_err());
    }
}
