use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

const APP_DIR: &str = "mailgen";

#[derive(Debug, Clone)]
pub struct AppPaths {
    config_dir: PathBuf,
    profiles_dir: PathBuf,
}

impl AppPaths {
    pub fn discover() -> AppResult<Self> {
        let config_root = dirs::config_dir()
            .ok_or_else(|| AppError::Config("unable to resolve config directory".to_string()))?;

        let paths = Self::rooted_at(config_root.join(APP_DIR));
        fs::create_dir_all(&paths.profiles_dir)?;
        Ok(paths)
    }

    pub fn rooted_at(config_dir: PathBuf) -> Self {
        let profiles_dir = config_dir.join("profiles");
        Self {
            config_dir,
            profiles_dir,
        }
    }

    pub fn settings_file(&self, profile: &str) -> PathBuf {
        self.profiles_dir.join(format!("{profile}.json"))
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }
}
