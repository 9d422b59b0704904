pub mod paths;
pub mod profile;
pub mod settings;

pub use paths::AppPaths;
pub use profile::resolve_profile;
pub use settings::Settings;

use crate::error::AppResult;

/// Resolves the requested profile name and loads its settings.
pub fn load_profile(paths: &AppPaths, requested: &str) -> AppResult<(String, Settings)> {
    let profile = resolve_profile(requested)?;
    let settings = settings::load(paths.settings_file(&profile))?;
    Ok((profile, settings))
}

pub fn save_settings(paths: &AppPaths, profile: &str, settings: &Settings) -> AppResult<()> {
    settings::save(paths.settings_file(profile), settings)
}
