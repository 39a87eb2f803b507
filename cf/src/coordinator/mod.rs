//! Refinement coordinator
//!
//! The controller for the pre-approval phase: form validation, the
//! coordinator dialogue, structured-update merging, and approval detection.

mod core;

pub use core::{APPROVAL_ACK, APPROVAL_KEYWORD, CoordinatorError, RefinementController, TurnReply};
