use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{AppError, AppResult};

use super::endpoints;
use super::gateway::Gateway;
use super::models::{
    AddressValidation, ConnectionCheck, GenerateRequest, GeneratedEmail, SendRequest, SendResult,
    ServiceStatus,
};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into();
        Url::parse(&base_url)?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn test_connection(&self) -> AppResult<ConnectionCheck> {
        self.get_json(endpoints::test_connection_endpoint())
            .await
            .map_err(|err| err.into_service("failed to test email connection"))
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> AppResult<T> {
        let url = self.endpoint_url(endpoint)?;
        tracing::debug!(%url, "GET");
        let response = self.http.get(url).send().await?;
        self.parse_json_response(response).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> AppResult<T> {
        let url = self.endpoint_url(endpoint)?;
        tracing::debug!(%url, "POST");
        let response = self.http.post(url).json(body).send().await?;
        self.parse_json_response(response).await
    }

    fn endpoint_url(&self, endpoint: &str) -> AppResult<Url> {
        let mut url = Url::parse(&self.base_url)?;
        let path = join_path(url.path(), endpoint);
        url.set_path(&path);
        Ok(url)
    }

    async fn parse_json_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> AppResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        Err(map_api_error(status, &body))
    }
}

impl Gateway for BackendClient {
    async fn generate(&self, request: &GenerateRequest) -> AppResult<GeneratedEmail> {
        let envelope: DataEnvelope<GeneratedEmail> = self
            .post_json(endpoints::generate_endpoint(), request)
            .await
            .map_err(|err| err.into_service("failed to generate email"))?;
        Ok(envelope.data)
    }

    async fn send(&self, request: &SendRequest) -> AppResult<SendResult> {
        let envelope: DataEnvelope<SendResult> = self
            .post_json(endpoints::send_endpoint(), request)
            .await
            .map_err(|err| err.into_service("failed to send email"))?;
        Ok(envelope.data)
    }

    async fn validate_remote(&self, addresses: &[String]) -> AppResult<AddressValidation> {
        let body = ValidateRequest { emails: addresses };
        let envelope: DataEnvelope<AddressValidation> = self
            .post_json(endpoints::validate_endpoint(), &body)
            .await
            .map_err(|err| err.into_service("failed to validate emails"))?;
        Ok(envelope.data)
    }

    async fn status(&self) -> AppResult<ServiceStatus> {
        let envelope: DataEnvelope<ServiceStatus> = self
            .get_json(endpoints::status_endpoint())
            .await
            .map_err(|err| err.into_service("failed to get service status"))?;
        Ok(envelope.data)
    }

    async fn health(&self) -> AppResult<()> {
        let url = self
            .endpoint_url(endpoints::health_endpoint())
            .map_err(|err| err.into_service("health check failed"))?;
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| AppError::from(err).into_service("health check failed"))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(map_api_error(status, &body).into_service("health check failed"))
    }
}

#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Debug, Serialize)]
struct ValidateRequest<'a> {
    emails: &'a [String],
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    error: Option<String>,
}

fn join_path(base: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

fn map_api_error(status: StatusCode, body: &str) -> AppError {
    let message = parse_api_error_message(body).unwrap_or_else(|| {
        let body = body.trim();
        if body.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("an unexpected error occurred")
                .to_string()
        } else {
            body.to_string()
        }
    });

    AppError::Api(message)
}

fn parse_api_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<ApiErrorBody>(body).ok()?;
    parsed
        .message
        .or(parsed.error)
        .map(|message| message.trim().to_string())
        .filter(|message| !message.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_message_field_from_error_body() {
        let error = map_api_error(
            StatusCode::BAD_REQUEST,
            r#"{"success":false,"message":"Prompt is required","error":"ValidationError"}"#,
        );

        match error {
            AppError::Api(message) => assert_eq!(message, "Prompt is required"),
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[test]
    fn falls_back_to_raw_body_then_reason() {
        let error = map_api_error(StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(error.to_string(), "api error: upstream down");

        let error = map_api_error(StatusCode::SERVICE_UNAVAILABLE, "");
        assert_eq!(error.to_string(), "api error: Service Unavailable");
    }

    #[test]
    fn joins_endpoint_onto_base_path() {
        assert_eq!(join_path("/", "/health"), "/health");
        assert_eq!(join_path("/api/", "/email/send"), "/api/email/send");
    }
}
