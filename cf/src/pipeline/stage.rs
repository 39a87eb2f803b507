//! Pipeline stage definitions and typed outputs

use serde::{Serialize, Serializer, ser::SerializeStruct};
use thiserror::Error;

use crate::domain::{
    CourseAuditReport, CourseContent, CourseContentReview, CourseFoundation, CourseSearchReport, CourseTechnicalDesign,
};
use crate::engine::EngineError;

/// One specialist transformation in the approved design pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    InstructionalPlanning,
    ContentAuthoring,
    TechnicalDesign,
    ContentReview,
    EthicalAudit,
    ResourceCuration,
}

impl StageKind {
    /// Fixed execution order of the design pipeline
    pub const ORDER: [StageKind; 6] = [
        StageKind::InstructionalPlanning,
        StageKind::ContentAuthoring,
        StageKind::TechnicalDesign,
        StageKind::ContentReview,
        StageKind::EthicalAudit,
        StageKind::ResourceCuration,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::InstructionalPlanning => "instructional_planning",
            Self::ContentAuthoring => "content_authoring",
            Self::TechnicalDesign => "technical_design",
            Self::ContentReview => "content_review",
            Self::EthicalAudit => "ethical_audit",
            Self::ResourceCuration => "resource_curation",
        }
    }

    /// Id of the agent definition that runs this stage
    pub fn agent_id(&self) -> &'static str {
        match self {
            Self::InstructionalPlanning => "instructional_planner",
            Self::ContentAuthoring => "content_author",
            Self::TechnicalDesign => "technical_designer",
            Self::ContentReview => "content_reviewer",
            Self::EthicalAudit => "ethics_auditor",
            Self::ResourceCuration => "resource_curator",
        }
    }
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Typed output of one stage
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageOutput {
    Foundation(CourseFoundation),
    Content(CourseContent),
    TechnicalDesign(CourseTechnicalDesign),
    ContentReview(CourseContentReview),
    AuditReport(CourseAuditReport),
    SearchReport(CourseSearchReport),
}

/// Completed output of one stage, tagged with its stage
#[derive(Debug, Clone, Serialize)]
pub struct StageResult {
    pub stage: StageKind,
    pub output: StageOutput,
}

/// Why a stage failed
#[derive(Debug, Error)]
pub enum StageError {
    /// The agent invocation itself failed
    #[error("agent invocation failed: {0}")]
    Engine(#[from] EngineError),

    /// The reply did not decode into the stage's output contract
    #[error("stage output did not match the expected shape: {0}")]
    Shape(String),
}

/// Identity of the failing stage plus its cause
#[derive(Debug, Error)]
#[error("stage {stage} failed: {error}")]
pub struct StageFailure {
    pub stage: StageKind,
    pub error: StageError,
}

impl Serialize for StageFailure {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("StageFailure", 2)?;
        state.serialize_field("stage", &self.stage)?;
        state.serialize_field("error", &self.error.to_string())?;
        state.end()
    }
}

/// Outcome of one pipeline run
///
/// Outputs completed before a failure are always retained.
#[derive(Debug, Serialize)]
pub struct PipelineReport {
    pub outputs: Vec<StageResult>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<StageFailure>,
}

impl PipelineReport {
    /// True when every stage completed
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }

    /// Stages that produced an output, in execution order
    pub fn completed_stages(&self) -> Vec<StageKind> {
        self.outputs.iter().map(|r| r.stage).collect()
    }
}
