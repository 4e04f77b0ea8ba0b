// src/config.rs

use std::{env, fs, path::PathBuf};

use serde::Deserialize;

use crate::constants::{
    CONFIG_DIR, DEFAULT_FLAIR, DEFAULT_REACTION_TIMEOUT_SECS, SETTINGS_FILENAME,
};

/// User-tunable settings for the shell.
///
/// Values come from `~/.config/finterm/finterm.toml` when it exists, with
/// `FINTERM_*` environment variables taking precedence over the file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Prompt flair shown before the menu location.
    pub flair: String,
    /// Whether the interactive prompt offers tab-completion.
    pub use_completion: bool,
    /// Bounded wait, in seconds, for reaction-style selection prompts.
    pub reaction_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            flair: DEFAULT_FLAIR.to_string(),
            use_completion: true,
            reaction_timeout_secs: DEFAULT_REACTION_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    /// Loads settings from the default config location, then applies
    /// environment overrides. Any failure falls back to defaults; a broken
    /// settings file must never prevent the terminal from starting.
    pub fn load() -> Self {
        let mut settings = default_settings_path()
            .and_then(|path| Self::from_file(&path).ok())
            .unwrap_or_default();
        settings.apply_env(|key| env::var(key).ok());
        settings
    }

    /// Reads and parses a settings file.
    pub fn from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Applies `FINTERM_*` overrides from the given lookup. Unparseable
    /// values are ignored and logged.
    pub fn apply_env(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(flair) = get("FINTERM_FLAIR") {
            self.flair = flair;
        }
        if let Some(raw) = get("FINTERM_USE_COMPLETION") {
            match raw.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.use_completion = true,
                "0" | "false" | "no" => self.use_completion = false,
                other => log::warn!("ignoring FINTERM_USE_COMPLETION={other}"),
            }
        }
        if let Some(raw) = get("FINTERM_REACTION_TIMEOUT_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) => self.reaction_timeout_secs = secs,
                Err(_) => log::warn!("ignoring FINTERM_REACTION_TIMEOUT_SECS={raw}"),
            }
        }
    }
}

/// Path of the settings file under the user's config directory, if resolvable.
fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(SETTINGS_FILENAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_sane() {
        let settings = Settings::default();
        assert_eq!(settings.flair, DEFAULT_FLAIR);
        assert!(settings.use_completion);
        assert_eq!(settings.reaction_timeout_secs, DEFAULT_REACTION_TIMEOUT_SECS);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "flair = \"$\"\nreaction_timeout_secs = 5").unwrap();
        let settings = Settings::from_file(&file.path().to_path_buf()).unwrap();
        assert_eq!(settings.flair, "$");
        assert_eq!(settings.reaction_timeout_secs, 5);
        // Unspecified keys keep their defaults.
        assert!(settings.use_completion);
    }

    #[test]
    fn broken_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "flair = [not toml").unwrap();
        assert!(Settings::from_file(&file.path().to_path_buf()).is_err());
    }

    #[test]
    fn env_overrides_beat_file_values() {
        let mut settings = Settings {
            flair: "$".to_string(),
            use_completion: true,
            reaction_timeout_secs: 5,
        };
        settings.apply_env(|key| match key {
            "FINTERM_FLAIR" => Some("ft".to_string()),
            "FINTERM_USE_COMPLETION" => Some("false".to_string()),
            "FINTERM_REACTION_TIMEOUT_SECS" => Some("9".to_string()),
            _ => None,
        });
        assert_eq!(settings.flair, "ft");
        assert!(!settings.use_completion);
        assert_eq!(settings.reaction_timeout_secs, 9);
    }

    #[test]
    fn bad_env_values_are_ignored() {
        let mut settings = Settings::default();
        settings.apply_env(|key| match key {
            "FINTERM_USE_COMPLETION" => Some("maybe".to_string()),
            "FINTERM_REACTION_TIMEOUT_SECS" => Some("soon".to_string()),
            _ => None,
        });
        assert_eq!(settings, Settings::default());
    }
}
