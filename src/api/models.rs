use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub use crate::compose::validate::AddressValidation;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Tone {
    #[default]
    Professional,
    Casual,
    Formal,
    Friendly,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum EmailType {
    #[default]
    General,
    Business,
    Marketing,
    FollowUp,
    Invitation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub prompt: String,
    pub recipients: Vec<String>,
    pub tone: Tone,
    pub email_type: EmailType,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            recipients: Vec::new(),
            tone: Tone::default(),
            email_type: EmailType::default(),
        }
    }

    pub fn with_recipients(mut self, recipients: Vec<String>) -> Self {
        self.recipients = recipients;
        self
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn with_type(mut self, email_type: EmailType) -> Self {
        self.email_type = email_type;
        self
    }
}

/// What the generation service hands back. Anything besides subject and body
/// (token counts, model names) is dropped at deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneratedEmail {
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendRequest {
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: String,
    pub sender_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendResult {
    pub total_recipients: usize,
    pub successful: usize,
    #[serde(default)]
    pub failures: Vec<DeliveryFailure>,
}

impl SendResult {
    pub fn is_consistent(&self) -> bool {
        self.successful
            .checked_add(self.failures.len())
            .is_some_and(|sum| sum <= self.total_recipients)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryFailure {
    #[serde(alias = "email")]
    pub address: String,
    #[serde(alias = "error", default)]
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    pub email_service: EmailServiceStatus,
    pub ai_service: AiServiceStatus,
    pub server: ServerStatus,
}

impl ServiceStatus {
    pub fn is_ready(&self) -> bool {
        self.email_service.configured && self.ai_service.configured
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailServiceStatus {
    pub configured: bool,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiServiceStatus {
    pub configured: bool,
    #[serde(default)]
    pub provider: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerStatus {
    #[serde(default)]
    pub environment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionCheck {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}
