//! Domain types for CourseForge
//!
//! Course requests and their validation rules, conversation messages, and the
//! typed output contracts of the design pipeline stages.

mod message;
pub mod outputs;
mod request;

pub use message::{ConversationLog, Message, Role};
pub use outputs::{
    CourseAuditReport, CourseContent, CourseContentReview, CourseFoundation, CourseSearchReport, CourseTechnicalDesign,
    EditFinding, FoundationModule, KdkaAlignment, LearningObjective, LmsIntegration, ModuleResource, PrrrSignals,
    SearchHit, WeeklyModule,
};
pub use request::{
    CourseModule, CourseRequest, CourseRequestDraft, CourseRequestUpdate, MIN_DESCRIPTION_LEN, MIN_EXPECTATIONS_LEN,
    MIN_TITLE_LEN, ValidationError, Violation,
};
