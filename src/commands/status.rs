use serde::Serialize;

use crate::api::Gateway;
use crate::api::models::{ConnectionCheck, ServiceStatus};
use crate::cli::StatusArgs;
use crate::context::AppContext;
use crate::error::AppResult;

#[derive(Debug, Serialize)]
struct StatusReport {
    #[serde(flatten)]
    status: ServiceStatus,
    ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    connection: Option<ConnectionCheck>,
}

pub async fn run(ctx: &AppContext, args: StatusArgs) -> AppResult<()> {
    let backend = ctx.backend()?;
    let status = backend.status().await?;
    let connection = if args.check_connection {
        Some(backend.test_connection().await?)
    } else {
        None
    };

    let mut lines = describe_status(&status);
    if let Some(check) = &connection {
        lines.push(describe_connection(check));
    }

    let report = StatusReport {
        ready: status.is_ready(),
        status,
        connection,
    };
    ctx.output.emit_report(&lines, &report)
}

fn describe_status(status: &ServiceStatus) -> Vec<String> {
    let email = if status.email_service.configured {
        let host = status.email_service.host.as_deref().unwrap_or("(unknown host)");
        match status.email_service.user.as_deref() {
            Some(user) => format!("email service: {host} ({user})"),
            None => format!("email service: {host}"),
        }
    } else {
        "email service: not configured".to_string()
    };

    let ai = if status.ai_service.configured {
        let provider = status.ai_service.provider.as_deref().unwrap_or("unknown");
        format!("ai service: {provider} api")
    } else {
        "ai service: not configured".to_string()
    };

    let environment = if status.server.environment.is_empty() {
        "unknown"
    } else {
        status.server.environment.as_str()
    };

    let mut lines = vec![email, ai, format!("server environment: {environment}")];

    if status.is_ready() {
        lines.push("all services are configured and ready".to_string());
        return lines;
    }

    lines.push("some services need configuration:".to_string());
    if !status.email_service.configured {
        lines.push("  - configure mail settings in the backend environment".to_string());
    }
    if !status.ai_service.configured {
        lines.push("  - add an ai provider api key to the backend environment".to_string());
    }
    lines
}

fn describe_connection(check: &ConnectionCheck) -> String {
    let verdict = if check.success { "ok" } else { "failed" };
    match check.message.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
        Some(message) => format!("mail server connection: {verdict} ({message})"),
        None => format!("mail server connection: {verdict}"),
    }
}
