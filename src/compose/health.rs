use std::fmt;

use serde::Serialize;

use crate::api::gateway::Gateway;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    #[default]
    Unknown,
    Available,
    Unavailable,
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HealthStatus::Unknown => "unknown",
            HealthStatus::Available => "available",
            HealthStatus::Unavailable => "unavailable",
        };
        f.write_str(label)
    }
}

/// Gate in front of the compose workflow. Probed once at startup and again
/// only when the user asks for a retry.
#[derive(Debug, Clone, Default)]
pub struct HealthProbe {
    status: HealthStatus,
    last_error: Option<String>,
}

impl HealthProbe {
    pub fn status(&self) -> HealthStatus {
        self.status
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_available(&self) -> bool {
        self.status == HealthStatus::Available
    }

    pub async fn start<G: Gateway>(&mut self, gateway: &G) -> HealthStatus {
        if self.status != HealthStatus::Unknown {
            return self.status;
        }
        self.probe(gateway).await
    }

    pub async fn retry<G: Gateway>(&mut self, gateway: &G) -> HealthStatus {
        self.probe(gateway).await
    }

    pub fn ensure_available(&self) -> AppResult<()> {
        match self.status {
            HealthStatus::Available => Ok(()),
            HealthStatus::Unknown => Err(AppError::Unavailable(
                "backend health has not been checked yet".to_string(),
            )),
            HealthStatus::Unavailable => Err(AppError::Unavailable(
                self.last_error
                    .clone()
                    .unwrap_or_else(|| "backend server is not responding".to_string()),
            )),
        }
    }

    async fn probe<G: Gateway>(&mut self, gateway: &G) -> HealthStatus {
        match gateway.health().await {
            Ok(()) => {
                self.status = HealthStatus::Available;
                self.last_error = None;
                tracing::info!("backend is available");
            }
            Err(err) => {
                self.status = HealthStatus::Unavailable;
                tracing::warn!(error = %err, "backend is unavailable");
                self.last_error = Some(err.to_string());
            }
        }
        self.status
    }
}
