use crate::api::Gateway;
use crate::cli::ValidateArgs;
use crate::compose::validate::{self, AddressValidation};
use crate::context::AppContext;
use crate::error::{AppError, AppResult};

pub async fn run(ctx: &AppContext, args: ValidateArgs) -> AppResult<()> {
    let report = if args.remote {
        check_remote(&ctx.backend()?, &args.addresses).await?
    } else {
        validate::validate_address_list(&args.addresses)
    };

    ctx.output.emit_report(&describe(&report), &report)?;

    if report.is_clean() {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "{} problem(s) in address list",
            report.errors.len()
        )))
    }
}

/// Empty input never reaches the backend; it gets the local "no addresses" report.
async fn check_remote<G: Gateway>(gateway: &G, raw: &str) -> AppResult<AddressValidation> {
    let tokens = validate::split_address_list(raw);
    if tokens.is_empty() {
        return Ok(validate::validate_address_list(raw));
    }
    gateway.validate_remote(&tokens).await
}

pub(crate) fn describe(report: &AddressValidation) -> Vec<String> {
    let mut lines = Vec::new();

    if !report.valid.is_empty() {
        lines.push(format!("{} valid address(es) found", report.valid.len()));
        lines.extend(report.valid.iter().map(|address| format!("  {address}")));
    }

    lines.extend(report.errors.iter().cloned());
    lines
}
