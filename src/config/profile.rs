use crate::error::{AppError, AppResult};

const DEFAULT_PROFILE: &str = "default";

/// Profile names double as settings file names.
pub fn resolve_profile(requested: &str) -> AppResult<String> {
    let trimmed = requested.trim();
    if trimmed.is_empty() {
        return Ok(DEFAULT_PROFILE.to_string());
    }

    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.');
    if trimmed.starts_with('.') || !trimmed.chars().all(allowed) {
        return Err(AppError::InvalidInput(format!(
            "profile name `{trimmed}` may only contain letters, digits, `-`, `_` and `.`"
        )));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_profile_falls_back_to_default() {
        assert_eq!(resolve_profile("  ").expect("blank"), "default");
        assert_eq!(resolve_profile(" work ").expect("plain"), "work");
    }

    #[test]
    fn rejects_path_like_names() {
        assert!(resolve_profile("../secrets").is_err());
        assert!(resolve_profile("a/b").is_err());
        assert!(resolve_profile(".hidden").is_err());
    }
}
