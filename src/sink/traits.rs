//! Trait abstraction for the submission sink to enable mocking in tests

use crate::state::FormValues;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Proof that a registration was accepted
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub id: Uuid,
    pub user_name: String,
    pub accepted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    #[error("Registration rejected: {0}")]
    Rejected(String),
    #[error("Registration service unavailable")]
    Unavailable,
}

/// Receives validated registrations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    /// Accept one validated payload
    async fn submit(&self, values: FormValues) -> Result<SubmissionReceipt, SinkError>;
}
