use serde::Serialize;

use crate::compose::{HealthProbe, HealthStatus};
use crate::context::AppContext;
use crate::error::AppResult;
use crate::output::OutputMode;

#[derive(Debug, Serialize)]
struct HealthReport<'a> {
    api: &'a str,
    status: HealthStatus,
    error: Option<&'a str>,
}

pub async fn run(ctx: &AppContext) -> AppResult<()> {
    let backend = ctx.backend()?;
    let mut probe = HealthProbe::default();
    let status = probe.start(&backend).await;
    let api = backend.base_url();

    if status == HealthStatus::Available {
        let report = HealthReport {
            api,
            status,
            error: None,
        };
        return ctx.output.emit(&format!("backend at {api} is available"), &report);
    }

    if ctx.output.mode() == OutputMode::Json {
        let report = HealthReport {
            api,
            status,
            error: probe.last_error(),
        };
        ctx.output.emit("", &report)?;
    }

    probe.ensure_available()
}
