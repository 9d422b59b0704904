use serde::Serialize;

use crate::api::client::DEFAULT_TIMEOUT;
use crate::cli::{ConfigCommand, ConfigSetArgs};
use crate::config::{self, Settings};
use crate::context::AppContext;
use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize)]
struct EffectiveSettings {
    profile: String,
    api_base_url: String,
    sender_label: String,
    timeout_secs: u64,
}

pub fn run(ctx: &AppContext, command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Show => show(ctx, &ctx.settings),
        ConfigCommand::Set(args) => set(ctx, args),
    }
}

fn show(ctx: &AppContext, settings: &Settings) -> AppResult<()> {
    let effective = effective(&ctx.profile, settings);

    let lines = vec![
        format!("profile: {}", effective.profile),
        format!("api url: {}", effective.api_base_url),
        format!("sender: {}", effective.sender_label),
        format!("timeout: {}s", effective.timeout_secs),
        format!(
            "settings file: {}",
            ctx.paths.settings_file(&ctx.profile).display()
        ),
    ];
    ctx.output.emit_report(&lines, &effective)
}

/// Reports stored values as-is; a bad timeout is shown so it can be fixed.
fn effective(profile: &str, settings: &Settings) -> EffectiveSettings {
    EffectiveSettings {
        profile: profile.to_string(),
        api_base_url: settings.api_base_url(),
        sender_label: settings.sender_label().to_string(),
        timeout_secs: settings
            .timeout_secs
            .unwrap_or(DEFAULT_TIMEOUT.as_secs()),
    }
}

fn set(ctx: &AppContext, args: ConfigSetArgs) -> AppResult<()> {
    if args.api_url.is_none() && args.sender.is_none() && args.timeout_secs.is_none() {
        return Err(AppError::InvalidInput(
            "nothing to set; pass --api-url, --sender or --timeout-secs".to_string(),
        ));
    }

    let mut settings = ctx.settings.clone();
    if let Some(api_url) = args.api_url {
        url::Url::parse(api_url.trim())?;
        settings.api_base_url = Some(api_url.trim().to_string());
    }
    if let Some(sender) = args.sender {
        settings.sender_label = Some(sender.trim().to_string());
    }
    if let Some(timeout_secs) = args.timeout_secs {
        settings.timeout_secs = Some(timeout_secs);
    }
    settings.timeout()?;

    config::save_settings(&ctx.paths, &ctx.profile, &settings)?;
    tracing::info!(profile = %ctx.profile, dir = %ctx.paths.config_dir().display(), "settings saved");
    show(ctx, &settings)
}
