use crate::api::BackendClient;
use crate::config::{self, AppPaths, Settings};
use crate::error::AppResult;
use crate::output::Output;

#[derive(Debug)]
pub struct AppContext {
    pub profile: String,
    pub verbose: u8,
    pub paths: AppPaths,
    pub settings: Settings,
    pub output: Output,
}

impl AppContext {
    pub fn bootstrap(profile: String, json: bool, verbose: u8) -> AppResult<Self> {
        Self::load(AppPaths::discover()?, &profile, json, verbose)
    }

    /// Loads the profile without touching the network settings, so `config`
    /// keeps working when those are broken.
    pub fn load(paths: AppPaths, profile: &str, json: bool, verbose: u8) -> AppResult<Self> {
        let (profile, settings) = config::load_profile(&paths, profile)?;
        tracing::debug!(%profile, "context ready");

        Ok(Self {
            profile,
            verbose,
            paths,
            settings,
            output: Output::new(json),
        })
    }

    pub fn backend(&self) -> AppResult<BackendClient> {
        let backend = BackendClient::new(self.settings.api_base_url(), self.settings.timeout()?)?;
        tracing::debug!(api = backend.base_url(), "backend client ready");
        Ok(backend)
    }

    pub fn sender_label(&self, requested: Option<&str>) -> String {
        requested
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| self.settings.sender_label())
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn scratch_paths(name: &str) -> AppPaths {
        AppPaths::rooted_at(
            std::env::temp_dir().join(format!("mailgen-context-{}-{name}", std::process::id())),
        )
    }

    #[test]
    fn broken_timeout_only_fails_when_the_backend_is_needed() {
        let paths = scratch_paths("timeout");
        let settings = Settings {
            timeout_secs: Some(0),
            ..Settings::default()
        };
        config::save_settings(&paths, "default", &settings).expect("save settings");

        let ctx = AppContext::load(paths, "default", false, 0).expect("context loads");
        assert_eq!(ctx.settings.timeout_secs, Some(0));
        assert!(matches!(ctx.backend(), Err(AppError::Config(_))));
    }

    #[test]
    fn sender_label_prefers_a_non_blank_override() {
        let ctx = AppContext::load(scratch_paths("sender"), "default", false, 0)
            .expect("context loads");
        assert_eq!(ctx.sender_label(Some("  Sales ")), "Sales");
        assert_eq!(ctx.sender_label(Some("   ")), "AI Email Sender");
        assert_eq!(ctx.sender_label(None), "AI Email Sender");
    }
}
