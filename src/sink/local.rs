//! In-process submission sink
//!
//! Accepts registrations without persisting or transmitting them. Only the
//! user name and email are ever logged.

use super::traits::{SinkError, SubmissionReceipt, SubmissionSink};
use crate::state::FormValues;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

/// User names taken by the service itself
pub const DEFAULT_RESERVED_USER_NAMES: &[&str] = &["system", "support", "codetikki"];

/// Sink that accepts locally and hands back a receipt
#[derive(Debug, Clone)]
pub struct LocalSink {
    reserved_user_names: Vec<String>,
    open: bool,
}

impl LocalSink {
    pub fn new(reserved_user_names: Vec<String>, open: bool) -> Self {
        Self {
            reserved_user_names,
            open,
        }
    }

    fn is_reserved(&self, user_name: &str) -> bool {
        self.reserved_user_names
            .iter()
            .any(|reserved| reserved.eq_ignore_ascii_case(user_name))
    }
}

impl Default for LocalSink {
    fn default() -> Self {
        Self::new(
            DEFAULT_RESERVED_USER_NAMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            true,
        )
    }
}

#[async_trait]
impl SubmissionSink for LocalSink {
    async fn submit(&self, values: FormValues) -> Result<SubmissionReceipt, SinkError> {
        if !self.open {
            tracing::warn!("registration attempted while registrations are closed");
            return Err(SinkError::Unavailable);
        }

        if self.is_reserved(&values.user_name) {
            tracing::info!(user_name = %values.user_name, "reserved user name rejected");
            return Err(SinkError::Rejected(format!(
                "the user name \"{}\" is reserved",
                values.user_name
            )));
        }

        let receipt = SubmissionReceipt {
            id: Uuid::new_v4(),
            user_name: values.user_name,
            accepted_at: Utc::now(),
        };
        tracing::info!(
            id = %receipt.id,
            user_name = %receipt.user_name,
            email = %values.email,
            "registration accepted"
        );
        Ok(receipt)
    }
}
