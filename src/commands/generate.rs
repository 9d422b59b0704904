use serde::Serialize;

use crate::api::models::GenerateRequest;
use crate::cli::GenerateArgs;
use crate::compose::validate::validate_address_list;
use crate::compose::{ComposeSession, EmailDraft, RecipientSet, SendOutcome};
use crate::context::AppContext;
use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize)]
struct GenerateReport<'a> {
    draft: Option<&'a EmailDraft>,
    recipients: &'a RecipientSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    delivery: Option<&'a SendOutcome>,
}

pub async fn run(ctx: &AppContext, args: GenerateArgs) -> AppResult<()> {
    let seeds = match args.to.as_deref() {
        Some(raw) => seed_recipients(raw)?,
        None => Vec::new(),
    };

    let backend = ctx.backend()?;
    let mut session = ComposeSession::new(ctx.sender_label(args.sender.as_deref()));
    session.start(&backend).await;
    session.health().ensure_available()?;

    let request = GenerateRequest::new(args.prompt.trim())
        .with_recipients(seeds)
        .with_tone(args.tone)
        .with_type(args.email_type);
    session.generate(&backend, request).await?;

    let mut lines = draft_lines(session.draft(), session.recipients());
    if !args.send {
        let report = GenerateReport {
            draft: session.draft(),
            recipients: session.recipients(),
            delivery: None,
        };
        return ctx.output.emit_report(&lines, &report);
    }

    let outcome = session.send(&backend).await?;
    lines.push(String::new());
    lines.extend(outcome.report_lines());

    let report = GenerateReport {
        draft: session.draft(),
        recipients: session.recipients(),
        delivery: Some(&outcome),
    };
    ctx.output.emit_report(&lines, &report)?;

    match outcome {
        SendOutcome::Failed { .. } => Err(AppError::Service(outcome.summary())),
        _ => Ok(()),
    }
}

/// Recipients given up front must all be well formed.
fn seed_recipients(raw: &str) -> AppResult<Vec<String>> {
    let report = validate_address_list(raw);
    match report.errors.into_iter().next() {
        Some(first) => Err(AppError::Validation(first)),
        None => Ok(report.valid),
    }
}

pub(crate) fn draft_lines(draft: Option<&EmailDraft>, recipients: &RecipientSet) -> Vec<String> {
    let Some(draft) = draft else {
        return vec!["no draft yet; use `generate <prompt>`".to_string()];
    };

    let to = if recipients.is_empty() {
        "(none)".to_string()
    } else {
        recipients.iter().collect::<Vec<_>>().join(", ")
    };

    let mut lines = vec![format!("To: {to}")];
    lines.extend(draft.to_clipboard_text().lines().map(ToOwned::to_owned));
    lines
}
