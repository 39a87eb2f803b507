//! Stage output data contracts
//!
//! Each specialist stage of the design pipeline produces one of these shapes.
//! They are plain data: the pipeline decodes agent replies into them and
//! returns them to the caller untouched. Optional fields default rather than
//! fail so partially filled replies still decode.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Learning objective, optionally tagged with its Bloom's taxonomy level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningObjective {
    pub statement: String,

    /// Remember / Understand / Apply / Analyze / Evaluate / Create
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bloom_level: Option<String>,
}

/// Resource associated with a course module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleResource {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// reading, video, dataset, tool, ...
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "type")]
    pub kind: Option<String>,
}

/// Knowledge / Delivery / Context / Assessment alignment for one module
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KdkaAlignment {
    pub knowledge: Vec<String>,
    pub delivery: Vec<String>,
    pub context: Vec<String>,
    pub assessment: Vec<String>,
}

/// Personal / Relatable / Relative / Real-world signals for one module
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrrrSignals {
    pub personal: Option<String>,
    pub relatable: Option<String>,
    pub relative: Option<String>,
    pub real_world: Option<String>,
}

/// Module as laid out by the instructional planner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundationModule {
    pub title: String,
    pub description: String,

    #[serde(default)]
    pub learning_objectives: Vec<LearningObjective>,
}

/// Course foundation produced by the instructional planning stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseFoundation {
    pub course_title: String,
    pub course_description: String,
    pub credits: u32,
    pub duration_weeks: u32,
    pub level: String,
    pub expectations: String,

    #[serde(default)]
    pub modules: Vec<FoundationModule>,
}

/// Detailed weekly module produced by the content authoring stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyModule {
    pub week_number: u32,
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,

    #[serde(default)]
    pub learning_objectives: Vec<LearningObjective>,

    #[serde(default)]
    pub activities: Vec<String>,

    #[serde(default)]
    pub assessments: Vec<String>,

    #[serde(default)]
    pub resources: Vec<ModuleResource>,

    #[serde(default)]
    pub kdka: KdkaAlignment,

    #[serde(default)]
    pub prrr: PrrrSignals,
}

/// Full course content produced by the content authoring stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseContent {
    pub course_title: String,
    pub course_description: String,
    pub duration_weeks: u32,
    pub level: String,

    /// Terminal learning objectives
    #[serde(default)]
    pub tlos: Vec<LearningObjective>,

    /// Enabling learning objectives grouped by terminal objective
    #[serde(default)]
    pub elos_by_tlo: HashMap<String, Vec<LearningObjective>>,

    #[serde(default)]
    pub weekly_modules: Vec<WeeklyModule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syllabus_markdown: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kdka_overview: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prrr_overview: Option<String>,
}

/// LMS integration details
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LmsIntegration {
    pub lms_platform: Option<String>,
    pub navigation_structure: Vec<String>,

    /// quizzes, discussions, gradebook, ...
    pub feature_mapping: HashMap<String, serde_json::Value>,

    /// SCORM / LTI / external tools
    pub integrations: Vec<String>,
    pub accessibility_notes: Option<String>,
}

/// Technical design produced by the LMS design stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseTechnicalDesign {
    pub course_title: String,
    pub implementation_plan_markdown: String,

    #[serde(default)]
    pub lms: LmsIntegration,

    #[serde(default)]
    pub timeline_weeks: Vec<String>,
}

/// Single finding from the editorial review stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditFinding {
    /// Clarity, Tone, Accessibility, Consistency, Grammar, ...
    pub area: String,
    pub issue: String,
    pub recommendation: String,
}

/// Editorial review produced by the content review stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseContentReview {
    pub udl_compliance: bool,
    pub accessibility_passed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_markdown: Option<String>,

    #[serde(default)]
    pub findings: Vec<EditFinding>,

    #[serde(default)]
    pub accessibility_checks: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blooms_alignment_notes: Option<String>,
}

/// Ethical audit report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseAuditReport {
    /// Privacy, bias, and fairness compliance
    pub ethical_compliance: bool,
    pub notes: String,
}

/// One hit from the resource curation stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance_reason: Option<String>,
}

/// Curated resource report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseSearchReport {
    pub query: Option<String>,
    pub resources: Vec<SearchHit>,
    pub curation_notes: Option<String>,
}
