//! Submission sink for validated registrations

mod local;
mod traits;

pub use local::{LocalSink, DEFAULT_RESERVED_USER_NAMES};
pub use traits::SubmissionSink;

#[cfg(test)]
pub use traits::{MockSubmissionSink, SinkError, SubmissionReceipt};
