// Keyintent Settings Module
// Startup configuration: which platform profile the classifier runs with

#![cfg(feature = "settings")]

use std::path::{Path, PathBuf};

use crate::profile::{PlatformProfile, ProfileSelector};

/// Settings loaded once at startup.
///
/// These are read from a TOML file (default: ~/.config/keyintent/settings.toml):
///
/// ```toml
/// [platform]
/// profile = "auto"   # "default", "mac" or "auto"
/// ```
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// Platform profile selection
    profile: ProfileSelector,

    /// Path to the settings file
    source_path: Option<PathBuf>,
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid setting value: {0}")]
    InvalidValue(String),
}

/// TOML representation for deserializing settings
#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct SettingsToml {
    #[serde(default)]
    platform: Option<PlatformSettings>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct PlatformSettings {
    #[serde(default)]
    profile: Option<String>,
}

impl Settings {
    /// Create settings with the profile resolved from the host
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings pinned to one profile
    pub fn with_profile(profile: PlatformProfile) -> Self {
        Self {
            profile: ProfileSelector::Fixed(profile),
            source_path: None,
        }
    }

    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(&path)?;
        let mut settings = Self::from_toml(&content)?;
        settings.source_path = Some(path.as_ref().to_path_buf());
        Ok(settings)
    }

    /// Load settings from TOML string
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let toml_settings: SettingsToml =
            toml::from_str(content).map_err(|e| SettingsError::TomlParse(e.to_string()))?;

        let mut settings = Self::new();

        if let Some(profile) = toml_settings.platform.and_then(|p| p.profile) {
            settings.profile = profile
                .parse()
                .map_err(SettingsError::InvalidValue)?;
        }

        Ok(settings)
    }

    /// Get the default settings path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("keyintent").join("settings.toml"))
    }

    /// Load from default location (~/.config/keyintent/settings.toml)
    pub fn load_default() -> Result<Self, SettingsError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_file(path);
            }
        }
        log::debug!("no settings file found, using defaults");
        Ok(Self::new())
    }

    /// The configured selector, before host resolution
    pub fn profile_selector(&self) -> ProfileSelector {
        self.profile
    }

    /// Override the profile selection (e.g. from a command line flag)
    pub fn set_profile(&mut self, selector: ProfileSelector) {
        self.profile = selector;
    }

    /// The profile to configure the classifier with
    pub fn profile(&self) -> PlatformProfile {
        self.profile.resolve()
    }

    /// File these settings were read from, if any
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }
}

/// Create default settings content for a new installation
pub fn default_settings_content() -> &'static str {
    r#"# Keyintent Settings
# Place this file at: ~/.config/keyintent/settings.toml

[platform]
# Which modifier acts as the primary shortcut modifier:
#   "default" - Control
#   "mac"     - Meta (Command), adds the Cmd-Shift-{ / } tab shortcuts
#   "auto"    - pick from the platform keyintent was built for
profile = "auto"
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = Settings::new();
        assert_eq!(settings.profile_selector(), ProfileSelector::Auto);
        assert_eq!(settings.profile(), PlatformProfile::host());
        assert!(settings.source_path().is_none());
    }

    #[test]
    fn test_settings_from_toml() {
        let toml = r#"
[platform]
profile = "mac"
"#;
        let settings = Settings::from_toml(toml).unwrap();
        assert_eq!(settings.profile(), PlatformProfile::Mac);
    }

    #[test]
    fn test_settings_empty_toml() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings.profile_selector(), ProfileSelector::Auto);
    }

    #[test]
    fn test_settings_invalid_profile() {
        let toml = r#"
[platform]
profile = "beos"
"#;
        let err = Settings::from_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue(_)));
    }

    #[test]
    fn test_settings_unknown_section() {
        let err = Settings::from_toml("[keys]\nrecover = \"Ctrl-Shift-T\"\n").unwrap_err();
        assert!(matches!(err, SettingsError::TomlParse(_)));
    }

    #[test]
    fn test_set_profile_overrides_file() {
        let mut settings = Settings::from_toml("[platform]\nprofile = \"mac\"\n").unwrap();
        settings.set_profile(ProfileSelector::Fixed(PlatformProfile::Default));
        assert_eq!(settings.profile(), PlatformProfile::Default);
    }

    #[test]
    fn test_default_content_parses() {
        let settings = Settings::from_toml(default_settings_content()).unwrap();
        assert_eq!(settings.profile_selector(), ProfileSelector::Auto);
    }

    #[test]
    fn test_from_missing_file() {
        let err = Settings::from_file("/nonexistent/keyintent/settings.toml").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
