use crate::error::AppResult;

use super::models::{
    AddressValidation, GenerateRequest, GeneratedEmail, SendRequest, SendResult, ServiceStatus,
};

/// Backend capabilities the compose engine depends on.
///
/// Implementations normalize every failure into `AppError::Service` with a
/// human readable message before returning.
#[allow(async_fn_in_trait)]
pub trait Gateway {
    async fn generate(&self, request: &GenerateRequest) -> AppResult<GeneratedEmail>;

    async fn send(&self, request: &SendRequest) -> AppResult<SendResult>;

    async fn validate_remote(&self, addresses: &[String]) -> AppResult<AddressValidation>;

    async fn status(&self) -> AppResult<ServiceStatus>;

    async fn health(&self) -> AppResult<()>;
}
