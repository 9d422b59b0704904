use serde::Serialize;

use crate::api::models::{DeliveryFailure, SendResult};

use super::state::ComposeState;

/// Interpretation of a delivery result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SendOutcome {
    Delivered {
        successful: usize,
        total: usize,
    },
    PartialFailure {
        successful: usize,
        total: usize,
        failures: Vec<DeliveryFailure>,
    },
    Failed {
        total: usize,
        failures: Vec<DeliveryFailure>,
    },
}

impl SendOutcome {
    pub fn classify(result: SendResult) -> Self {
        if !result.is_consistent() {
            tracing::warn!(
                total = result.total_recipients,
                successful = result.successful,
                failures = result.failures.len(),
                "delivery result counts exceed total recipients"
            );
        }

        let SendResult {
            total_recipients: total,
            successful,
            failures,
        } = result;

        // successful == 0 with no failures listed still counts as total failure
        if successful == 0 {
            return SendOutcome::Failed { total, failures };
        }

        if failures.is_empty() {
            SendOutcome::Delivered { successful, total }
        } else {
            SendOutcome::PartialFailure {
                successful,
                total,
                failures,
            }
        }
    }

    pub fn state(&self) -> ComposeState {
        match self {
            SendOutcome::Delivered { .. } => ComposeState::Sent,
            SendOutcome::PartialFailure { .. } => ComposeState::PartialFailure,
            SendOutcome::Failed { .. } => ComposeState::Failed,
        }
    }

    pub fn failures(&self) -> &[DeliveryFailure] {
        match self {
            SendOutcome::Delivered { .. } => &[],
            SendOutcome::PartialFailure { failures, .. } | SendOutcome::Failed { failures, .. } => {
                failures
            }
        }
    }

    pub fn summary(&self) -> String {
        match self {
            SendOutcome::Delivered { successful, total } => {
                format!("email sent to {successful} of {total} recipients")
            }
            SendOutcome::PartialFailure {
                successful,
                total,
                failures,
            } => format!(
                "email sent to {successful} of {total} recipients; {} failed",
                failures.len()
            ),
            SendOutcome::Failed { total, .. } => {
                format!("failed to send email to any of {total} recipients")
            }
        }
    }

    /// Summary followed by one line per failed recipient.
    pub fn report_lines(&self) -> Vec<String> {
        let mut lines = vec![self.summary()];
        lines.extend(self.failures().iter().map(|failure| {
            if failure.reason.is_empty() {
                format!("  {}", failure.address)
            } else {
                format!("  {}: {}", failure.address, failure.reason)
            }
        }));
        lines
    }
}
