pub(crate) mod approval_service;

pub use approval_service::{ApprovalOutcome, ApprovalService};
