use serde::Serialize;

use crate::api::gateway::Gateway;
use crate::api::models::{GenerateRequest, GeneratedEmail, SendRequest, SendResult};
use crate::error::{AppError, AppResult};

use super::draft::{DraftStore, EmailDraft};
use super::health::{HealthProbe, HealthStatus};
use super::orchestrator::{SendOrchestrator, prepare_send};
use super::outcome::SendOutcome;
use super::recipients::RecipientSet;
use super::state::ComposeState;
use super::validate::{self, AddressValidation};

/// Identifies one generate or send dispatch. Only the most recently issued
/// token may apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion<T> {
    Applied(T),
    /// A newer request was dispatched or the session stopped waiting.
    Stale,
}

#[derive(Debug)]
enum Pending {
    Generate {
        token: RequestToken,
        seed_recipients: Vec<String>,
    },
    Send {
        token: RequestToken,
    },
}

/// One compose session: the draft, its recipients and where the workflow is.
#[derive(Debug)]
pub struct ComposeSession {
    state: ComposeState,
    drafts: DraftStore,
    recipients: RecipientSet,
    health: HealthProbe,
    sender_label: String,
    issued: u64,
    pending: Option<Pending>,
    last_outcome: Option<SendOutcome>,
    last_error: Option<String>,
}

impl ComposeSession {
    pub fn new(sender_label: impl Into<String>) -> Self {
        Self {
            state: ComposeState::Empty,
            drafts: DraftStore::default(),
            recipients: RecipientSet::new(),
            health: HealthProbe::default(),
            sender_label: sender_label.into(),
            issued: 0,
            pending: None,
            last_outcome: None,
            last_error: None,
        }
    }

    pub fn state(&self) -> ComposeState {
        self.state
    }

    pub fn draft(&self) -> Option<&EmailDraft> {
        self.drafts.current()
    }

    pub fn edit_buffer(&self) -> Option<&EmailDraft> {
        self.drafts.buffer()
    }

    pub fn edit_buffer_mut(&mut self) -> AppResult<&mut EmailDraft> {
        self.require(ComposeState::Editing, "change the edit buffer")?;
        self.drafts.buffer_mut().ok_or(AppError::InvalidState {
            state: self.state,
            action: "change the edit buffer",
        })
    }

    pub fn recipients(&self) -> &RecipientSet {
        &self.recipients
    }

    pub fn health(&self) -> &HealthProbe {
        &self.health
    }

    pub fn sender_label(&self) -> &str {
        &self.sender_label
    }

    pub fn last_outcome(&self) -> Option<&SendOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub async fn start<G: Gateway>(&mut self, gateway: &G) -> HealthStatus {
        self.health.start(gateway).await
    }

    pub async fn retry_health<G: Gateway>(&mut self, gateway: &G) -> HealthStatus {
        self.health.retry(gateway).await
    }

    pub fn add_recipients<I, S>(&mut self, addresses: I) -> AppResult<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.health.ensure_available()?;
        Ok(self.recipients.add(addresses))
    }

    /// Validates a comma/semicolon/newline separated list and adds the valid
    /// part. The full validation report is returned so the caller can show the
    /// rejected tokens.
    pub fn add_recipient_list(&mut self, raw: &str) -> AppResult<AddressValidation> {
        self.health.ensure_available()?;
        let report = validate::validate_address_list(raw);
        let added = self.recipients.add(&report.valid);
        tracing::debug!(added, rejected = report.invalid.len(), "recipients updated");
        Ok(report)
    }

    pub fn remove_recipient(&mut self, address: &str) -> AppResult<bool> {
        self.health.ensure_available()?;
        Ok(self.recipients.remove(address))
    }

    pub fn clear_recipients(&mut self) -> AppResult<()> {
        self.health.ensure_available()?;
        self.recipients.clear();
        Ok(())
    }

    pub fn begin_generate(&mut self, request: &GenerateRequest) -> AppResult<RequestToken> {
        self.health.ensure_available()?;
        if !self.state.can_generate() {
            return Err(AppError::InvalidState {
                state: self.state,
                action: "generate",
            });
        }

        let prompt = validate::validate_prompt(&request.prompt);
        if let Some(message) = prompt.first_error() {
            return Err(AppError::Validation(message.to_string()));
        }

        let token = self.issue_token();
        self.pending = Some(Pending::Generate {
            token,
            seed_recipients: request.recipients.clone(),
        });
        self.last_outcome = None;
        self.last_error = None;
        self.transition(ComposeState::Generating);
        tracing::debug!(
            token = token.value(),
            tone = ?request.tone,
            kind = ?request.email_type,
            "generation dispatched"
        );
        Ok(token)
    }

    pub fn complete_generate(
        &mut self,
        token: RequestToken,
        result: AppResult<GeneratedEmail>,
    ) -> AppResult<Completion<ComposeState>> {
        let seed_recipients = match self.pending.take() {
            Some(Pending::Generate {
                token: expected,
                seed_recipients,
            }) if expected == token => seed_recipients,
            other => {
                self.pending = other;
                tracing::warn!(token = token.value(), "ignoring stale generation result");
                return Ok(Completion::Stale);
            }
        };

        match result {
            Ok(generated) => {
                self.drafts
                    .replace(EmailDraft::new(generated.subject, generated.body));
                if !seed_recipients.is_empty() {
                    self.recipients.add(&seed_recipients);
                }
                self.transition(ComposeState::Drafted);
                Ok(Completion::Applied(self.state))
            }
            Err(err) => Err(self.fail(err.into_service("failed to generate email"))),
        }
    }

    pub async fn generate<G: Gateway>(
        &mut self,
        gateway: &G,
        request: GenerateRequest,
    ) -> AppResult<ComposeState> {
        let token = self.begin_generate(&request)?;
        let result = gateway.generate(&request).await;
        match self.complete_generate(token, result)? {
            Completion::Applied(state) => Ok(state),
            Completion::Stale => Ok(self.state),
        }
    }

    /// Drafted enters editing with a fresh copy of the draft; editing leaves
    /// it again without saving.
    pub fn toggle_edit(&mut self) -> AppResult<()> {
        self.health.ensure_available()?;
        match self.state {
            ComposeState::Drafted => {
                if !self.drafts.begin_edit() {
                    return Err(AppError::Validation("there is no draft to edit".to_string()));
                }
                self.transition(ComposeState::Editing);
                Ok(())
            }
            ComposeState::Editing => self.cancel(),
            state => Err(AppError::InvalidState {
                state,
                action: "edit",
            }),
        }
    }

    pub fn save(&mut self, subject: impl Into<String>, body: impl Into<String>) -> AppResult<()> {
        self.health.ensure_available()?;
        self.require(ComposeState::Editing, "save")?;

        let subject = subject.into();
        let body = body.into();
        if subject.trim().is_empty() || body.trim().is_empty() {
            return Err(AppError::Validation(
                "subject and body must not be empty".to_string(),
            ));
        }

        self.drafts.commit(subject, body);
        self.transition(ComposeState::Drafted);
        Ok(())
    }

    pub fn cancel(&mut self) -> AppResult<()> {
        self.health.ensure_available()?;
        self.require(ComposeState::Editing, "cancel editing")?;
        self.drafts.discard();
        self.transition(ComposeState::Drafted);
        Ok(())
    }

    pub fn begin_send(&mut self) -> AppResult<(RequestToken, SendRequest)> {
        self.health.ensure_available()?;
        self.require(ComposeState::Drafted, "send")?;

        let request = prepare_send(self.drafts.current(), &self.recipients, &self.sender_label)?;
        let token = self.issue_token();
        self.pending = Some(Pending::Send { token });
        self.last_outcome = None;
        self.last_error = None;
        self.transition(ComposeState::Sending);
        Ok((token, request))
    }

    pub fn complete_send(
        &mut self,
        token: RequestToken,
        result: AppResult<SendResult>,
    ) -> AppResult<Completion<SendOutcome>> {
        match self.pending.take() {
            Some(Pending::Send { token: expected }) if expected == token => {}
            other => {
                self.pending = other;
                tracing::warn!(token = token.value(), "ignoring stale delivery result");
                return Ok(Completion::Stale);
            }
        }

        match result {
            Ok(result) => {
                let outcome = SendOutcome::classify(result);
                if matches!(outcome, SendOutcome::Failed { .. }) {
                    self.last_error = Some(outcome.summary());
                }
                self.last_outcome = Some(outcome.clone());
                self.transition(outcome.state());
                Ok(Completion::Applied(outcome))
            }
            Err(err) => Err(self.fail(err.into_service("failed to send email"))),
        }
    }

    pub async fn send<G: Gateway>(&mut self, gateway: &G) -> AppResult<SendOutcome> {
        let (token, request) = self.begin_send()?;
        let result = SendOrchestrator::new(gateway).submit(&request).await;
        match self.complete_send(token, result)? {
            Completion::Applied(outcome) => Ok(outcome),
            Completion::Stale => Err(AppError::Service(
                "delivery result was superseded by a newer request".to_string(),
            )),
        }
    }

    /// Acknowledges a finished send or a failure and goes back to the draft.
    pub fn dismiss(&mut self) -> AppResult<ComposeState> {
        self.health.ensure_available()?;
        if !self.state.is_settled() {
            return Err(AppError::InvalidState {
                state: self.state,
                action: "dismiss",
            });
        }

        self.last_outcome = None;
        self.last_error = None;
        let next = if self.drafts.current().is_some() {
            ComposeState::Drafted
        } else {
            ComposeState::Empty
        };
        self.transition(next);
        Ok(next)
    }

    fn require(&self, expected: ComposeState, action: &'static str) -> AppResult<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(AppError::InvalidState {
                state: self.state,
                action,
            })
        }
    }

    fn issue_token(&mut self) -> RequestToken {
        self.issued += 1;
        RequestToken(self.issued)
    }

    fn fail(&mut self, err: AppError) -> AppError {
        self.last_error = Some(err.to_string());
        self.transition(ComposeState::Failed);
        err
    }

    fn transition(&mut self, next: ComposeState) {
        tracing::info!(from = %self.state, to = %next, "compose state changed");
        self.state = next;
    }
}
