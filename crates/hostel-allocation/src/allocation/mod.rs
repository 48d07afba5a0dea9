//! Assignment orchestration: the one place a student, a room, and
//! (optionally) an application must move together.

pub mod router;
pub mod service;


pub use service::{AllocationService, AssignmentOutcome, AssignmentRequest, ReleaseOutcome};
