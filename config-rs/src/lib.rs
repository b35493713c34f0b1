//! config-rs/lib.rs
//! Environment-driven settings for the insight digest
//! Values come from the process environment, optionally seeded from a `.env` file

use std::env;

/// Prefix shared by every digest setting
pub const ENV_PREFIX: &str = "INSIGHT_DIGEST";

pub const DEFAULT_LIMIT: usize = 3;
pub const DEFAULT_BULLETS_PER_ANALYSIS: usize = 3;
pub const DEFAULT_MIN_DISPLAY_LENGTH: usize = 15;
pub const DEFAULT_TITLE: &str = "Market Insights";

/// Load a `.env` file from the working directory (or its parents) if present
pub fn load_dotenv() {
    match dotenv::dotenv() {
        Ok(path) => log::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => log::warn!("Could not read .env file: {}", e),
    }
}

/// Full environment variable name for a setting
///
/// # Arguments
/// * `setting` - The setting name (e.g., "LIMIT", "TITLE")
pub fn setting_var_name(setting: &str) -> String {
    format!("{}_{}", ENV_PREFIX, setting.to_uppercase())
}

/// Get a numeric setting from the environment with proper fallback
///
/// # Arguments
/// * `setting` - The setting name (e.g., "LIMIT")
/// * `default` - The value used when the variable is unset or unparsable
///
/// # Returns
/// The configured value
pub fn get_usize_setting(setting: &str, default: usize) -> usize {
    let var_name = setting_var_name(setting);
    match env::var(&var_name) {
        Ok(raw) => raw.trim().parse::<usize>().unwrap_or_else(|_| {
            log::warn!("Invalid value {:?} in {}, using default {}", raw, var_name, default);
            default
        }),
        Err(_) => default,
    }
}

/// Get a text setting from the environment; blank values count as unset
pub fn get_string_setting(setting: &str) -> Option<String> {
    env::var(setting_var_name(setting))
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Settings that shape a rendered digest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestSettings {
    /// Maximum number of records to render
    pub limit: usize,
    /// Maximum bullets per record
    pub bullets_per_analysis: usize,
    pub min_display_length: usize,
    pub title: String,
    pub subtitle: Option<String>,
}

impl Default for DigestSettings {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            bullets_per_analysis: DEFAULT_BULLETS_PER_ANALYSIS,
            min_display_length: DEFAULT_MIN_DISPLAY_LENGTH,
            title: DEFAULT_TITLE.to_string(),
            subtitle: None,
        }
    }
}

impl DigestSettings {
    /// Read settings from `INSIGHT_DIGEST_*` environment variables
    ///
    /// Recognized: `LIMIT`, `BULLETS_PER_ANALYSIS`, `MIN_DISPLAY_LENGTH`,
    /// `TITLE`, `SUBTITLE`.
    pub fn from_env() -> Self {
        let settings = Self {
            limit: get_usize_setting("LIMIT", DEFAULT_LIMIT),
            bullets_per_analysis: get_usize_setting(
                "BULLETS_PER_ANALYSIS",
                DEFAULT_BULLETS_PER_ANALYSIS,
            ),
            min_display_length: get_usize_setting("MIN_DISPLAY_LENGTH", DEFAULT_MIN_DISPLAY_LENGTH),
            title: get_string_setting("TITLE").unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            subtitle: get_string_setting("SUBTITLE"),
        };

        log::debug!("Digest settings: {:?}", settings);
        settings
    }
}
