//! # CLI Configuration
//!
//! Settings for the `frota` binary.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --json                                                             │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     FROTA_OUTPUT=json   FROTA_LOG=debug   FROTA_LOCALE=en              │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config <PATH>, else $FROTA_CONFIG, else                          │
//! │     ~/.config/frota/config.toml (Linux)                                │
//! │     ~/Library/Application Support/br.frota.frota/config.toml (macOS)   │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     text output, pt-BR messages, "warn,frota=info" logging             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [output]
//! format = "text"   # text | json
//!
//! [logging]
//! filter = "warn,frota=info"
//!
//! [messages]
//! locale = "pt-BR"  # pt-BR | en
//! empty = "Informe a placa"
//! ```

use std::path::PathBuf;

use frota_core::{Locale, MessageCatalog, MessageOverrides};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

// =============================================================================
// Output
// =============================================================================

/// How reports are printed on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// One human-readable line per item.
    #[default]
    Text,
    /// Pretty-printed JSON, for scripts.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(CliError::InvalidConfig(format!(
                "Unknown output format: '{}'. Valid options: text, json",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,
}

// =============================================================================
// Logging
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directives. `RUST_LOG` wins over it.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

/// Filter used when neither the config nor `RUST_LOG` sets one.
pub const DEFAULT_LOG_FILTER: &str = "warn,frota=info";

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// Messages
// =============================================================================

/// Plate error copy: a built-in locale plus per-message overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageSettings {
    #[serde(default)]
    pub locale: Locale,

    #[serde(flatten)]
    pub overrides: MessageOverrides,
}

// =============================================================================
// Main Configuration
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrotaConfig {
    #[serde(default)]
    pub output: OutputSettings,

    #[serde(default)]
    pub logging: LoggingSettings,

    #[serde(default)]
    pub messages: MessageSettings,
}

impl FrotaConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file
    /// 3. Environment variables
    ///
    /// A file named explicitly (argument or `FROTA_CONFIG`) must exist; the
    /// platform default path is optional. Environment variables are read
    /// through `lookup`, normally `|key| std::env::var(key).ok()`.
    pub fn load(
        config_path: Option<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> CliResult<Self> {
        let explicit = config_path.or_else(|| lookup("FROTA_CONFIG").map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::ConfigNotFound(path));
                }
                Self::from_file(&path)?
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_overrides_from(lookup);
        config.validate()?;

        Ok(config)
    }

    fn from_file(path: &std::path::Path) -> CliResult<Self> {
        info!(?path, "Loading frota config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        if self.logging.filter.trim().is_empty() {
            return Err(CliError::InvalidConfig(
                "logging.filter must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Applies `FROTA_*` overrides read through `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(format) = lookup("FROTA_OUTPUT") {
            match format.parse() {
                Ok(parsed) => {
                    debug!(format = %format, "Overriding output format from environment");
                    self.output.format = parsed;
                }
                Err(e) => warn!(format = %format, "Ignoring FROTA_OUTPUT: {}", e),
            }
        }

        if let Some(filter) = lookup("FROTA_LOG") {
            self.logging.filter = filter;
        }

        if let Some(locale) = lookup("FROTA_LOCALE") {
            match locale.to_lowercase().as_str() {
                "pt-br" | "pt_br" | "pt" => self.messages.locale = Locale::PtBr,
                "en" | "en-us" => self.messages.locale = Locale::En,
                _ => warn!(locale = %locale, "Unknown locale in environment"),
            }
        }
    }

    /// Returns the platform config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("br", "frota", "frota")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Message catalog for plate errors: locale copy plus overrides.
    pub fn catalog(&self) -> MessageCatalog {
        MessageCatalog::for_locale(self.messages.locale).with_overrides(&self.messages.overrides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frota_core::PlateError;
    use std::collections::HashMap;
    use std::io::Write;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_default_config() {
        let config = FrotaConfig::default();
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.logging.filter, "warn,frota=info");
        assert_eq!(config.messages.locale, Locale::PtBr);
        assert_eq!(config.catalog(), MessageCatalog::pt_br());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[output]
format = "json"

[messages]
locale = "en"
empty = "Type the plate"
"#
        )
        .unwrap();

        let config = FrotaConfig::load(Some(file.path().to_path_buf()), no_env).unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
        // Missing section falls back to defaults
        assert_eq!(config.logging.filter, "warn,frota=info");

        let catalog = config.catalog();
        assert_eq!(catalog.message_for(&PlateError::Empty), "Type the plate");
        assert_eq!(catalog.message_for(&PlateError::Incomplete), "incomplete plate");
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(matches!(
            FrotaConfig::load(Some(path), no_env),
            Err(CliError::ConfigNotFound(_))
        ));
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[output]\nformat = \"yaml\"").unwrap();
        assert!(matches!(
            FrotaConfig::load(Some(file.path().to_path_buf()), no_env),
            Err(CliError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("FROTA_OUTPUT", "json"),
            ("FROTA_LOG", "debug"),
            ("FROTA_LOCALE", "en"),
        ]
        .into_iter()
        .collect();

        let mut config = FrotaConfig::default();
        config.apply_overrides_from(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.messages.locale, Locale::En);
    }

    #[test]
    fn test_bad_override_is_ignored() {
        let mut config = FrotaConfig::default();
        config.apply_overrides_from(|key| (key == "FROTA_OUTPUT").then(|| "xml".to_string()));
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_config_path_from_environment() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[output]\nformat = \"json\"").unwrap();
        let path = file.path().to_string_lossy().into_owned();

        let config = FrotaConfig::load(None, |key| (key == "FROTA_CONFIG").then(|| path.clone()))
            .unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_config_validation() {
        let mut config = FrotaConfig::default();
        assert!(config.validate().is_ok());

        config.logging.filter = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_serialization() {
        let config = FrotaConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[output]"));
        assert!(toml_str.contains("[logging]"));
    }
}
