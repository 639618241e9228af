//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// PagerDuty account section
    #[serde(default)]
    pub pagerduty: PagerDutySection,

    /// Opsmatic integration section
    #[serde(default)]
    pub opsmatic: OpsmaticSection,

    /// HTTP behavior section
    #[serde(default)]
    pub http: HttpSection,
}

/// PagerDuty account configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PagerDutySection {
    /// Account subdomain ({subdomain}.pagerduty.com)
    pub subdomain: Option<String>,

    /// API key
    pub api_key: Option<String>,
}

/// Opsmatic integration configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpsmaticSection {
    /// Integration token appended to the webhook URL
    pub token: Option<String>,
}

/// HTTP behavior configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpSection {
    /// Per-call timeout in seconds
    pub timeout: Option<u64>,

    /// Install missing webhooks on every run
    #[serde(default)]
    pub add_hooks: bool,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# pd-hook-audit Configuration File

[pagerduty]
# PagerDuty account subdomain, i.e. {subdomain}.pagerduty.com (required)
# subdomain = "acme"

# PagerDuty API key (required)
# api_key = "your-api-key"

[opsmatic]
# Opsmatic integration token (required)
# token = "your-integration-token"

[http]
# Per-call timeout in seconds (default: 30)
timeout = 30

# Install missing webhooks on every run (same as --add-hooks)
# add_hooks = false
"#
    .to_string()
}
