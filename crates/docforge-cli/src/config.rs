//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `DOCFORGE_<SECTION>__<KEY>`
//! 3. `--config <FILE>`, or the platform config file followed by a local
//!    `.docforge.toml`
//! 4. Built-in defaults (always present)

use std::path::PathBuf;

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use docforge_core::{
    application::ScaffoldRequest,
    domain::{CollisionPolicy, ValidationRule},
};

use crate::cli::TEMPLATES_ENV;
use crate::error::{CliError, CliResult};

/// Per-directory config file, layered over the platform one.
pub const LOCAL_CONFIG_FILE: &str = ".docforge.toml";

const ENV_PREFIX: &str = "DOCFORGE";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Defaults for `init`.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Template store settings.
    pub templates: TemplateConfig,
    /// Defaults for `validate`.
    pub validate: ValidateConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub target_dir: String,
    pub includes: Vec<String>,
    pub on_collision: CollisionPolicy,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            target_dir: "docs/ai".into(),
            includes: ScaffoldRequest::default_includes(),
            on_collision: CollisionPolicy::Skip,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "human".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Template directory used when neither `--templates` nor
    /// `DOCFORGE_TEMPLATES` is given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidateConfig {
    /// Directory of `<name>.schema.json` files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemas_dir: Option<PathBuf>,
    /// `<glob>=<schema>` rules; empty means the built-in defaults.
    pub rules: Vec<String>,
}

impl AppConfig {
    /// Load configuration: defaults, then file(s), then environment.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("serialising built-in defaults")?;
        let mut builder = Config::builder().add_source(defaults);

        match config_file {
            Some(path) => {
                if !path.is_file() {
                    anyhow::bail!("config file not found: {}", path.display());
                }
                builder = builder.add_source(File::from(path.as_path()).format(FileFormat::Toml));
            }
            None => {
                builder = builder
                    .add_source(
                        File::from(Self::config_path())
                            .format(FileFormat::Toml)
                            .required(false),
                    )
                    .add_source(
                        File::from(PathBuf::from(LOCAL_CONFIG_FILE))
                            .format(FileFormat::Toml)
                            .required(false),
                    );
            }
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(config_env())),
            )
            .build()
            .context("reading configuration")?;

        config
            .try_deserialize()
            .context("configuration has invalid values")
    }

    /// Path to the platform configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.docforge.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "docforge", "docforge")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Configured validation rules, parsed.
    pub fn validation_rules(&self) -> CliResult<Vec<ValidationRule>> {
        self.validate
            .rules
            .iter()
            .map(|raw| {
                raw.parse().map_err(|e| CliError::ConfigError {
                    message: format!("validate.rules: {e}"),
                    source: Some(Box::new(e)),
                })
            })
            .collect()
    }

    /// Value at a dotted key such as `defaults.on_collision`.
    pub fn get(&self, key: &str) -> CliResult<Value> {
        let all = serde_json::to_value(self).map_err(|e| CliError::ConfigError {
            message: format!("Failed to serialise config: {e}"),
            source: Some(Box::new(e)),
        })?;

        let pointer = format!("/{}", key.replace('.', "/"));
        all.pointer(&pointer)
            .cloned()
            .ok_or_else(|| CliError::config(format!("Unknown config key: '{key}'")))
    }

    /// TOML rendering, as written by `config init`.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::ConfigError {
            message: format!("Failed to serialise config: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

/// Process environment minus `DOCFORGE_TEMPLATES`, which selects a template
/// directory and would otherwise shadow the `[templates]` table.
fn config_env() -> config::Map<String, String> {
    std::env::vars()
        .filter(|(key, _)| key != TEMPLATES_ENV)
        .collect()
}
