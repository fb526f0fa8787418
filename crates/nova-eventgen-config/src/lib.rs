//! `eventgen.toml` configuration.
//!
//! ```toml
//! parallel = true
//!
//! [sort]
//! paired_prefix = "original"
//!
//! [sort.directional]
//! from = "to"
//!
//! [synthesis]
//! null_policy = "non-null-by-default" # "no-checks" | "null-by-default"
//! impl_suffix = "Impl"
//!
//! [factory]
//! package = "com.example.events"
//! class_name = "EventFactory"
//!
//! [logging]
//! level = "info"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Once;

use nova_eventgen_sort::{SortPolicy, DEFAULT_PAIRED_PREFIX};
use nova_eventgen_synth::{
    FactoryOptions, NullPolicy, SynthesisOptions, DEFAULT_FACTORY_CLASS, DEFAULT_IMPL_SUFFIX,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;

mod diagnostics;
mod schema;
mod validation;

pub use diagnostics::{
    ConfigDiagnostics, ConfigValidationError, ConfigWarning, ValidationDiagnostics,
};
pub use schema::json_schema;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[schemars(deny_unknown_fields)]
/// Top-level generator configuration loaded from TOML.
pub struct EventGenConfig {
    /// Property ordering conventions.
    #[serde(default)]
    pub sort: SortConfig,

    /// Implementation class generation.
    #[serde(default)]
    pub synthesis: SynthesisConfig,

    /// The aggregated factory class.
    #[serde(default)]
    pub factory: FactoryConfig,

    /// Process interfaces on the rayon thread pool. Output order is unaffected.
    #[serde(default)]
    pub parallel: bool,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[schemars(deny_unknown_fields)]
pub struct SortConfig {
    /// Prefix marking the "before" half of a pair, e.g. `originalDamage` next to `damage`.
    #[serde(default = "SortConfig::default_paired_prefix")]
    #[schemars(length(min = 1))]
    pub paired_prefix: String,

    /// `from` prefix to `to` prefix, e.g. `fromWorld` next to `toWorld`.
    ///
    /// Setting this table replaces the default `{ from = "to" }` mapping entirely.
    #[serde(default = "SortConfig::default_directional")]
    #[schemars(schema_with = "schema::directional_schema")]
    pub directional: BTreeMap<String, String>,
}

impl SortConfig {
    fn default_paired_prefix() -> String {
        DEFAULT_PAIRED_PREFIX.to_owned()
    }

    fn default_directional() -> BTreeMap<String, String> {
        SortPolicy::default().directional
    }
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            paired_prefix: Self::default_paired_prefix(),
            directional: Self::default_directional(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[schemars(deny_unknown_fields)]
pub struct SynthesisConfig {
    #[serde(default)]
    pub null_policy: NullPolicy,

    /// Appended to the interface's simple name to name the generated class.
    #[serde(default = "SynthesisConfig::default_impl_suffix")]
    #[schemars(length(min = 1))]
    pub impl_suffix: String,
}

impl SynthesisConfig {
    fn default_impl_suffix() -> String {
        DEFAULT_IMPL_SUFFIX.to_owned()
    }
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            null_policy: NullPolicy::default(),
            impl_suffix: Self::default_impl_suffix(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[schemars(deny_unknown_fields)]
pub struct FactoryConfig {
    /// Package of the factory class; the default package when unset.
    #[serde(default)]
    pub package: Option<String>,

    #[serde(default = "FactoryConfig::default_class_name")]
    pub class_name: String,
}

impl FactoryConfig {
    fn default_class_name() -> String {
        DEFAULT_FACTORY_CLASS.to_owned()
    }
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            package: None,
            class_name: Self::default_class_name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[schemars(deny_unknown_fields)]
pub struct LoggingConfig {
    /// A simple level (`info`, `debug`, ...) or a full `EnvFilter` directive string.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,

    /// Emit logs in JSON format.
    #[serde(default)]
    pub json: bool,

    /// Write logs to stderr. When disabled, events are still filtered but discarded.
    #[serde(default = "LoggingConfig::default_stderr")]
    pub stderr: bool,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_owned()
    }

    fn default_stderr() -> bool {
        true
    }

    pub(crate) fn normalize_level_directives(input: &str) -> String {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Self::default_level();
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "trace" => "trace".to_owned(),
            "debug" => "debug".to_owned(),
            "info" => "info".to_owned(),
            "warn" | "warning" => "warn".to_owned(),
            "error" => "error".to_owned(),
            _ => trimmed.to_owned(),
        }
    }

    fn config_env_filter(&self) -> tracing_subscriber::EnvFilter {
        let directives = Self::normalize_level_directives(&self.level);
        tracing_subscriber::EnvFilter::try_new(directives).unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::default()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
        })
    }

    /// The effective filter: the configured level, with `RUST_LOG` merged on top when set.
    pub fn env_filter(&self) -> tracing_subscriber::EnvFilter {
        let env_directives = std::env::var("RUST_LOG")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());

        let config_directives = Self::normalize_level_directives(&self.level);

        match env_directives {
            Some(env_directives) => {
                let combined = format!("{config_directives},{env_directives}");
                tracing_subscriber::EnvFilter::try_new(combined)
                    .or_else(|_| tracing_subscriber::EnvFilter::try_new(env_directives))
                    .unwrap_or_else(|_| self.config_env_filter())
            }
            None => self.config_env_filter(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            json: false,
            stderr: Self::default_stderr(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse toml config: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // The default `Display` embeds a source snippet; keep only the message.
        ConfigError::Toml(err.message().to_owned())
    }
}

impl EventGenConfig {
    /// Load a config file from TOML.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = read_config(path.as_ref())?;
        Ok(toml::from_str(&text)?)
    }

    /// Load a config file from TOML and return diagnostics (unknown keys and semantic
    /// validation failures).
    pub fn load_from_path_with_diagnostics(
        path: impl AsRef<Path>,
    ) -> Result<(Self, ConfigDiagnostics), ConfigError> {
        let text = read_config(path.as_ref())?;
        Self::load_from_str_with_diagnostics(&text)
    }

    /// Load a config from a TOML string and return diagnostics.
    pub fn load_from_str_with_diagnostics(
        text: &str,
    ) -> Result<(Self, ConfigDiagnostics), ConfigError> {
        let (config, unknown_keys) =
            diagnostics::deserialize_toml_with_unknown_keys::<EventGenConfig>(text)?;

        let mut diagnostics = ConfigDiagnostics {
            unknown_keys,
            ..ConfigDiagnostics::default()
        };
        diagnostics.extend_validation(config.validate());

        for key in &diagnostics.unknown_keys {
            tracing::warn!(target: "nova.config", key = %key, "ignoring unknown config key");
        }

        Ok((config, diagnostics))
    }

    pub fn sort_policy(&self) -> SortPolicy {
        SortPolicy {
            paired_prefix: self.sort.paired_prefix.clone(),
            directional: self.sort.directional.clone(),
        }
    }

    pub fn synthesis_options(&self) -> SynthesisOptions {
        SynthesisOptions {
            null_policy: self.synthesis.null_policy,
            impl_suffix: self.synthesis.impl_suffix.clone(),
        }
    }

    pub fn factory_options(&self) -> FactoryOptions {
        FactoryOptions {
            package: self.factory.package.clone(),
            class_name: self.factory.class_name.clone(),
        }
    }
}

fn read_config(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })
}

pub const EVENTGEN_CONFIG_ENV_VAR: &str = "NOVA_EVENTGEN_CONFIG_PATH";

/// Discover the configuration file for a project root.
///
/// Search order:
/// 1) `NOVA_EVENTGEN_CONFIG_PATH` (absolute or relative to `root`)
/// 2) `eventgen.toml` in `root`
/// 3) `.eventgen.toml` in `root`
pub fn discover_config_path(root: &Path) -> Option<PathBuf> {
    if let Some(value) = std::env::var_os(EVENTGEN_CONFIG_ENV_VAR) {
        let candidate = PathBuf::from(value);
        let path = if candidate.is_absolute() {
            candidate
        } else {
            root.join(candidate)
        };
        return Some(path.canonicalize().unwrap_or(path));
    }

    ["eventgen.toml", ".eventgen.toml"]
        .into_iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
        .map(|path| path.canonicalize().unwrap_or(path))
}

/// Load the configuration for a project root.
///
/// If no config is present, returns [`EventGenConfig::default`] and `None`.
pub fn load_for_root(root: &Path) -> Result<(EventGenConfig, Option<PathBuf>), ConfigError> {
    let Some(path) = discover_config_path(root) else {
        return Ok((EventGenConfig::default(), None));
    };

    let config = EventGenConfig::load_from_path(&path)?;
    Ok((config, Some(path)))
}

/// Like [`load_for_root`] but also returns diagnostics; empty when no config is present.
pub fn load_for_root_with_diagnostics(
    root: &Path,
) -> Result<(EventGenConfig, Option<PathBuf>, ConfigDiagnostics), ConfigError> {
    let Some(path) = discover_config_path(root) else {
        return Ok((
            EventGenConfig::default(),
            None,
            ConfigDiagnostics::default(),
        ));
    };

    let (config, diagnostics) = EventGenConfig::load_from_path_with_diagnostics(&path)?;
    Ok((config, Some(path), diagnostics))
}

static TRACING_INIT: Once = Once::new();

/// Initializes structured `tracing` logging.
///
/// Safe to call multiple times; only the first call installs a global subscriber.
pub fn init_tracing(config: &LoggingConfig) {
    TRACING_INIT.call_once(|| {
        let filter = config.env_filter();

        let make_writer = if !config.stderr {
            BoxMakeWriter::new(std::io::sink)
        } else if cfg!(debug_assertions) {
            // Keeps `cargo test` output captured.
            BoxMakeWriter::new(tracing_subscriber::fmt::writer::TestWriter::with_stderr)
        } else {
            BoxMakeWriter::new(std::io::stderr)
        };

        let layer: Box<dyn tracing_subscriber::Layer<_> + Send + Sync> = if config.json {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(make_writer)
                .with_ansi(false)
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_writer(make_writer)
                .with_ansi(false)
                .boxed()
        };

        let subscriber = tracing_subscriber::registry().with(filter).with(layer);
        if tracing::subscriber::set_global_default(subscriber).is_ok() {
            tracing::debug!(
                target: "nova.config",
                level = %config.level,
                json = config.json,
                "tracing initialized"
            );
        }
    });
}
