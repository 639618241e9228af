//! Tests for merged and validated configuration.

use std::io::Write;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;
use super::validated::ValidatedConfig;

fn parse_cli(args: &[&str]) -> Cli {
    let full: Vec<&str> = std::iter::once("pd-hook-audit")
        .chain(args.iter().copied())
        .collect();
    Cli::parse_from_iter(full)
}

fn full_cli() -> Cli {
    parse_cli(&[
        "--subdomain",
        "acme",
        "--api-key",
        "pd-key",
        "--token",
        "ops-token",
    ])
}

fn full_toml() -> TomlConfig {
    TomlConfig::parse(
        r#"
        [pagerduty]
        subdomain = "toml-sub"
        api_key = "toml-key"

        [opsmatic]
        token = "toml-token"

        [http]
        timeout = 10
        "#,
    )
    .unwrap()
}

mod resolution {
    use super::*;

    #[test]
    fn builds_api_base_and_auth_from_cli() {
        let config = ValidatedConfig::from_raw(&full_cli(), None).unwrap();

        assert_eq!(config.subdomain, "acme");
        assert_eq!(
            config.api_base.as_str(),
            "https://acme.pagerduty.com/api/v1/"
        );
        assert_eq!(config.auth, "Token token=pd-key");
        assert_eq!(
            config.hook_url,
            format!("{}?token=ops-token", defaults::OPSMATIC_HOOK_BASE)
        );
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = ValidatedConfig::from_raw(&full_cli(), None).unwrap();

        assert_eq!(config.timeout, defaults::timeout());
        assert!(!config.add_hooks);
        assert!(!config.verbose);
    }

    #[test]
    fn toml_fills_in_missing_required_fields() {
        let cli = parse_cli(&[]);

        let config = ValidatedConfig::from_raw(&cli, Some(&full_toml())).unwrap();

        assert_eq!(config.subdomain, "toml-sub");
        assert_eq!(config.auth, "Token token=toml-key");
        assert_eq!(config.timeout.as_secs(), 10);
    }
}

mod precedence {
    use super::*;

    #[test]
    fn cli_wins_over_toml_for_required_fields() {
        let config = ValidatedConfig::from_raw(&full_cli(), Some(&full_toml())).unwrap();

        assert_eq!(config.subdomain, "acme");
        assert_eq!(config.auth, "Token token=pd-key");
        assert_eq!(
            config.hook_url,
            format!("{}?token=ops-token", defaults::OPSMATIC_HOOK_BASE)
        );
    }

    #[test]
    fn cli_timeout_wins_over_toml() {
        let mut args = vec![
            "--subdomain",
            "acme",
            "--api-key",
            "pd-key",
            "--token",
            "ops-token",
        ];
        args.extend(["--timeout", "5"]);
        let cli = parse_cli(&args);

        let config = ValidatedConfig::from_raw(&cli, Some(&full_toml())).unwrap();

        assert_eq!(config.timeout.as_secs(), 5);
    }

    #[test]
    fn add_hooks_uses_or_semantics() {
        let toml = TomlConfig::parse("[http]\nadd_hooks = true\n").unwrap();

        let config = ValidatedConfig::from_raw(&full_cli(), Some(&toml)).unwrap();

        assert!(config.add_hooks);
    }
}

mod validation {
    use super::*;

    #[test]
    fn missing_subdomain_is_reported() {
        let cli = parse_cli(&["--api-key", "pd-key", "--token", "ops-token"]);

        let err = ValidatedConfig::from_raw(&cli, None).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::MissingRequired {
                field: field::SUBDOMAIN,
                ..
            }
        ));
    }

    #[test]
    fn missing_api_key_is_reported() {
        let cli = parse_cli(&["--subdomain", "acme", "--token", "ops-token"]);

        let err = ValidatedConfig::from_raw(&cli, None).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::MissingRequired {
                field: field::API_KEY,
                ..
            }
        ));
    }

    #[test]
    fn missing_token_is_reported() {
        let cli = parse_cli(&["--subdomain", "acme", "--api-key", "pd-key"]);

        let err = ValidatedConfig::from_raw(&cli, None).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::MissingRequired {
                field: field::TOKEN,
                ..
            }
        ));
    }

    #[test]
    fn subdomain_with_invalid_characters_is_rejected() {
        let cli = parse_cli(&[
            "--subdomain",
            "ac me",
            "--api-key",
            "pd-key",
            "--token",
            "ops-token",
        ]);

        let err = ValidatedConfig::from_raw(&cli, None).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidSubdomain { .. }));
    }

    #[test]
    fn subdomain_with_leading_hyphen_is_rejected() {
        let cli = parse_cli(&[
            "--subdomain",
            "-acme",
            "--api-key",
            "pd-key",
            "--token",
            "ops-token",
        ]);

        let err = ValidatedConfig::from_raw(&cli, None).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidSubdomain { .. }));
    }

    #[test]
    fn token_with_query_breaking_characters_is_rejected() {
        let cli = parse_cli(&[
            "--subdomain",
            "acme",
            "--api-key",
            "pd-key",
            "--token",
            "bad&token",
        ]);

        let err = ValidatedConfig::from_raw(&cli, None).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidCredential {
                field: field::TOKEN,
                ..
            }
        ));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut args = vec![
            "--subdomain",
            "acme",
            "--api-key",
            "pd-key",
            "--token",
            "ops-token",
        ];
        args.extend(["--timeout", "0"]);
        let cli = parse_cli(&args);

        let err = ValidatedConfig::from_raw(&cli, None).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidDuration {
                field: "timeout",
                ..
            }
        ));
    }
}

mod loading {
    use super::*;

    #[test]
    fn load_reads_config_file_named_by_cli() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [pagerduty]
            subdomain = "acme"
            api_key = "pd-key"

            [opsmatic]
            token = "ops-token"
            "#
        )
        .unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let cli = parse_cli(&["--config", &path]);

        let config = ValidatedConfig::load(&cli).unwrap();

        assert_eq!(config.subdomain, "acme");
    }

    #[test]
    fn load_without_config_file_uses_cli_only() {
        let config = ValidatedConfig::load(&full_cli()).unwrap();

        assert_eq!(config.subdomain, "acme");
    }
}

mod display {
    use super::*;

    #[test]
    fn display_omits_credentials() {
        let config = ValidatedConfig::from_raw(&full_cli(), None).unwrap();

        let rendered = config.to_string();

        assert!(rendered.contains("subdomain: acme"));
        assert!(!rendered.contains("pd-key"));
        assert!(!rendered.contains("ops-token"));
    }
}
