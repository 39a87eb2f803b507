//! Sequential design pipeline controller
//!
//! On approval, assembles one shared context from the session and threads it
//! through the fixed specialist chain. Stages are independent transformations
//! over the same input: none sees another's output. Ordering is strictly
//! sequential for reproducibility and simple failure attribution.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{info, warn};

use super::stage::{PipelineReport, StageError, StageFailure, StageKind, StageOutput, StageResult};
use crate::engine::{AgentEngine, AgentInput};
use crate::extract;
use crate::prompts;
use crate::state::{SessionState, StateError};

/// Drives the approved design pipeline
pub struct PipelineController {
    engine: Arc<dyn AgentEngine>,
    lms_platform: String,
}

impl PipelineController {
    pub fn new(engine: Arc<dyn AgentEngine>) -> Self {
        Self {
            engine,
            lms_platform: "To be determined".to_string(),
        }
    }

    /// Override the LMS platform handed to the technical design stage
    pub fn with_lms_platform(mut self, lms_platform: impl Into<String>) -> Self {
        self.lms_platform = lms_platform.into();
        self
    }

    /// Mark the session approved and run the full specialist chain
    ///
    /// Fails with [`StateError::InvalidTransition`] when the session holds no
    /// request. A stage failure stops the chain; outputs completed so far are
    /// returned alongside the identity and cause of the failing stage.
    pub async fn run(&self, session: &mut SessionState) -> Result<PipelineReport, StateError> {
        session.mark_approved()?;
        let Some(request) = session.request().cloned() else {
            // mark_approved already guarantees a request
            return Err(StateError::InvalidTransition);
        };

        info!(session = %session.id(), title = %request.course_title, "run: starting design pipeline");

        let mut input = AgentInput::new(&request, &session.formatted_history(), session.last_user_message());
        input.insert("lms_platform", json!(self.lms_platform));

        let mut outputs = Vec::new();
        for stage in StageKind::ORDER {
            info!(stage = %stage, "run: invoking stage");
            match self.run_stage(stage, &input).await {
                Ok(output) => outputs.push(StageResult { stage, output }),
                Err(error) => {
                    warn!(stage = %stage, %error, "run: pipeline stopped");
                    return Ok(PipelineReport {
                        outputs,
                        failure: Some(StageFailure { stage, error }),
                    });
                }
            }
        }

        info!(stages = outputs.len(), "run: pipeline complete");
        Ok(PipelineReport { outputs, failure: None })
    }

    async fn run_stage(&self, stage: StageKind, input: &AgentInput) -> Result<StageOutput, StageError> {
        let Some(spec) = prompts::by_id(stage.agent_id()) else {
            return Err(StageError::Shape(format!("no agent definition for {stage}")));
        };
        let raw = self.engine.invoke(spec, input).await?;
        decode_stage_output(stage, &raw)
    }
}

/// Decode a stage reply into its typed output
fn decode_stage_output(stage: StageKind, raw: &str) -> Result<StageOutput, StageError> {
    match stage {
        StageKind::InstructionalPlanning => Ok(StageOutput::Foundation(decode_payload(raw)?)),
        StageKind::ContentAuthoring => Ok(StageOutput::Content(decode_payload(raw)?)),
        StageKind::TechnicalDesign => Ok(StageOutput::TechnicalDesign(decode_payload(raw)?)),
        StageKind::ContentReview => Ok(StageOutput::ContentReview(decode_payload(raw)?)),
        StageKind::EthicalAudit => Ok(StageOutput::AuditReport(decode_payload(raw)?)),
        StageKind::ResourceCuration => Ok(StageOutput::SearchReport(decode_payload(raw)?)),
    }
}

/// Parse a reply as bare JSON, falling back to its first fenced block
fn decode_payload<T: DeserializeOwned>(raw: &str) -> Result<T, StageError> {
    match serde_json::from_str(raw.trim()) {
        Ok(value) => Ok(value),
        Err(direct_err) => match extract::first_json_block(raw) {
            Some(block) => serde_json::from_str(block).map_err(|err| StageError::Shape(err.to_string())),
            None => Err(StageError::Shape(direct_err.to_string())),
        },
    }
}
