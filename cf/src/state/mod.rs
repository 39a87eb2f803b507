//! Session state
//!
//! SessionState is the single source of truth for one refinement-and-design
//! session, consumed by both the refinement controller and the pipeline
//! controller.

mod session;

pub use session::{SessionState, StateError};
