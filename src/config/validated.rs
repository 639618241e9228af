//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction,
//! before any network call is made.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use http::HeaderValue;
use url::Url;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// All required fields are present, the API base URL and authorization
/// header are pre-built, and all values have been validated.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional
/// TOML config, or [`ValidatedConfig::load`] to read the file named by
/// `--config` first.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// PagerDuty account subdomain
    pub subdomain: String,

    /// API base URL: `https://{subdomain}.pagerduty.com/api/v1/`
    pub api_base: Url,

    /// Pre-built `Authorization` header value (`Token token=<key>`)
    pub auth: HeaderValue,

    /// Full Opsmatic webhook URL, integration token included
    pub hook_url: String,

    /// Per-call timeout
    pub timeout: Duration,

    /// Whether to install missing webhooks after reporting
    pub add_hooks: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Credentials are deliberately absent from the log line
        write!(
            f,
            "Config {{ subdomain: {}, timeout: {}s, add_hooks: {}, verbose: {} }}",
            self.subdomain,
            self.timeout.as_secs(),
            self.add_hooks,
            self.verbose,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional
    /// TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required fields are missing (`subdomain`, `api_key`, `token`)
    /// - The subdomain cannot form a valid API host
    /// - A credential contains characters unusable in a header or query
    /// - The timeout is zero
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let subdomain = Self::resolve_subdomain(cli, toml)?;
        let api_base = build_api_base(&subdomain)?;
        let auth = Self::resolve_auth(cli, toml)?;
        let hook_url = Self::resolve_hook_url(cli, toml)?;
        let timeout = Self::resolve_timeout(cli, toml)?;

        // Flag-style OR semantics: TOML can enable, CLI cannot disable
        let add_hooks = cli.add_hooks || toml.is_some_and(|t| t.http.add_hooks);

        Ok(Self {
            subdomain,
            api_base,
            auth,
            hook_url,
            timeout,
            add_hooks,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_subdomain(cli: &Cli, toml: Option<&TomlConfig>) -> Result<String, ConfigError> {
        // CLI takes precedence
        let subdomain = cli
            .subdomain
            .as_deref()
            .or_else(|| toml.and_then(|t| t.pagerduty.subdomain.as_deref()))
            .ok_or_else(|| {
                ConfigError::missing(
                    field::SUBDOMAIN,
                    "Use --subdomain or set pagerduty.subdomain in config file",
                )
            })?;

        validate_subdomain(subdomain)?;
        Ok(subdomain.to_string())
    }

    fn resolve_auth(cli: &Cli, toml: Option<&TomlConfig>) -> Result<HeaderValue, ConfigError> {
        let key = cli
            .api_key
            .as_deref()
            .or_else(|| toml.and_then(|t| t.pagerduty.api_key.as_deref()))
            .ok_or_else(|| {
                ConfigError::missing(
                    field::API_KEY,
                    "Use --api-key or set pagerduty.api_key in config file",
                )
            })?;

        HeaderValue::from_str(&format!("Token token={key}")).map_err(|e| {
            ConfigError::InvalidCredential {
                field: field::API_KEY,
                reason: e.to_string(),
            }
        })
    }

    fn resolve_hook_url(cli: &Cli, toml: Option<&TomlConfig>) -> Result<String, ConfigError> {
        let token = cli
            .token
            .as_deref()
            .or_else(|| toml.and_then(|t| t.opsmatic.token.as_deref()))
            .ok_or_else(|| {
                ConfigError::missing(
                    field::TOKEN,
                    "Use --token or set opsmatic.token in config file",
                )
            })?;

        // The token travels as a query-string value; reject anything that
        // would change the URL's meaning rather than percent-encoding it.
        if token.is_empty() {
            return Err(ConfigError::InvalidCredential {
                field: field::TOKEN,
                reason: "must not be empty".to_string(),
            });
        }
        if let Some(bad) = token.chars().find(|c| !is_query_safe(*c)) {
            return Err(ConfigError::InvalidCredential {
                field: field::TOKEN,
                reason: format!("contains character {bad:?} not usable in a URL query"),
            });
        }

        Ok(format!("{}?token={token}", defaults::OPSMATIC_HOOK_BASE))
    }

    fn resolve_timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .timeout
            .or_else(|| toml.and_then(|t| t.http.timeout))
            .unwrap_or(defaults::TIMEOUT_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "timeout",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn build_api_base(subdomain: &str) -> Result<Url, ConfigError> {
    Url::parse(&format!("https://{subdomain}.pagerduty.com/api/v1/")).map_err(|e| {
        ConfigError::InvalidSubdomain {
            value: subdomain.to_string(),
            reason: e.to_string(),
        }
    })
}

fn validate_subdomain(subdomain: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidSubdomain {
        value: subdomain.to_string(),
        reason: reason.to_string(),
    };

    if subdomain.is_empty() {
        return Err(invalid("must not be empty"));
    }

    // DNS label rules: alphanumeric and hyphens, no leading/trailing hyphen
    if !subdomain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(invalid("only letters, digits, and hyphens are allowed"));
    }
    if subdomain.starts_with('-') || subdomain.ends_with('-') {
        return Err(invalid("must not start or end with a hyphen"));
    }

    Ok(())
}

/// Characters allowed verbatim in a URL query-string value.
const fn is_query_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~')
}
