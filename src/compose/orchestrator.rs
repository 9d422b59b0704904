use crate::api::gateway::Gateway;
use crate::api::models::{SendRequest, SendResult};
use crate::error::{AppError, AppResult};

use super::draft::EmailDraft;
use super::recipients::RecipientSet;

/// Guard-and-call wrapper around the delivery service. The result is passed
/// through untouched; `SendOutcome::classify` interprets it.
#[derive(Debug)]
pub struct SendOrchestrator<'a, G> {
    gateway: &'a G,
}

impl<'a, G: Gateway> SendOrchestrator<'a, G> {
    pub fn new(gateway: &'a G) -> Self {
        Self { gateway }
    }

    pub async fn submit(&self, request: &SendRequest) -> AppResult<SendResult> {
        tracing::debug!(recipients = request.recipients.len(), "dispatching email");
        self.gateway
            .send(request)
            .await
            .map_err(|err| err.into_service("failed to send email"))
    }

    pub async fn send(
        &self,
        draft: Option<&EmailDraft>,
        recipients: &RecipientSet,
        sender_label: &str,
    ) -> AppResult<SendResult> {
        let request = prepare_send(draft, recipients, sender_label)?;
        self.submit(&request).await
    }
}

/// Refuses to build a request unless there is something to send and somebody
/// to send it to.
pub fn prepare_send(
    draft: Option<&EmailDraft>,
    recipients: &RecipientSet,
    sender_label: &str,
) -> AppResult<SendRequest> {
    let Some(draft) = draft.filter(|draft| draft.is_complete()) else {
        return Err(AppError::Validation(
            "generate an email with a subject and body before sending".to_string(),
        ));
    };

    if recipients.is_empty() {
        return Err(AppError::Validation(
            "add at least one recipient before sending".to_string(),
        ));
    }

    Ok(SendRequest {
        recipients: recipients.to_vec(),
        subject: draft.subject.clone(),
        body: draft.body.clone(),
        sender_name: sender_label.to_string(),
    })
}
