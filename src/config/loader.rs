//! Layered settings resolution.
//!
//! Layers, lowest priority first:
//! 1. the JSON settings file (mandatory)
//! 2. `SPAHOST_*` environment variables
//! 3. development telemetry overrides (development environment only)
//!
//! The layers are merged by a `config::Config` builder. Keys are folded to
//! lowercase before they reach it, so `EnableHttpsRedirect` in the file and
//! `SPAHOST_APPSETTINGS__ENABLEHTTPSREDIRECT` in the environment name the same
//! setting.
//!
//! Any failure aborts resolution. There is no partial result and no fallback
//! to defaults, since `EnableHttpsRedirect` decides whether plaintext traffic
//! is admitted.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use ::config::{Config, Environment, File, FileFormat};
use serde_json::Value;

use crate::config::schema::Settings;
use crate::config::validation::{validate_settings, ValidationError};

/// Name of the environment that enables the development layer.
pub const DEVELOPMENT_ENVIRONMENT: &str = "Development";

/// Prefix selecting the variables that make up the environment layer.
pub const ENV_PREFIX: &str = "SPAHOST_";

/// Path separator inside a variable name.
pub const ENV_SEPARATOR: &str = "__";

/// Variable holding the environment name; never treated as a settings key.
pub const ENVIRONMENT_VAR: &str = "SPAHOST_ENVIRONMENT";

const DEVELOPER_MODE_KEY: &str = "telemetry.developermode";

/// Error type for settings resolution. Always fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("settings file {path:?} must contain a JSON object")]
    NotAnObject { path: PathBuf },

    #[error("invalid override {key}: {reason}")]
    Override { key: String, reason: String },

    #[error("failed to merge settings layers: {0}")]
    Layer(#[source] ::config::ConfigError),

    #[error("settings do not match the expected shape: {0}")]
    Bind(#[source] ::config::ConfigError),

    #[error("validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Hosting environment name (`Production`, `Development`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEnvironment(String);

impl HostEnvironment {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Environment names compare case-insensitively.
    pub fn is(&self, name: &str) -> bool {
        self.0.eq_ignore_ascii_case(name)
    }

    pub fn is_development(&self) -> bool {
        self.is(DEVELOPMENT_ENVIRONMENT)
    }
}

impl Default for HostEnvironment {
    fn default() -> Self {
        Self::new("Production")
    }
}

impl std::fmt::Display for HostEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Inputs to [`resolve`].
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    pub settings_path: PathBuf,
    pub environment: HostEnvironment,
}

/// Resolve settings from disk and the process environment.
pub fn resolve(options: &ResolveOptions) -> Result<Settings, ConfigError> {
    resolve_with_vars(options, std::env::vars_os())
}

/// Resolve settings using the given variables in place of the process environment.
pub fn resolve_with_vars<I, K, V>(options: &ResolveOptions, vars: I) -> Result<Settings, ConfigError>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<OsString>,
    V: Into<OsString>,
{
    let file = load_json_layer(&options.settings_path)?;
    let env = collect_env_layer(vars)?;

    let mut builder = Config::builder()
        .add_source(File::from_str(&file, FileFormat::Json))
        .add_source(
            Environment::with_prefix(ENV_PREFIX.trim_end_matches('_'))
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .try_parsing(true)
                .source(Some(env)),
        );

    if options.environment.is_development() {
        builder = builder
            .set_override(DEVELOPER_MODE_KEY, true)
            .map_err(ConfigError::Layer)?;
    }

    let settings: Settings = builder
        .build()
        .map_err(ConfigError::Layer)?
        .try_deserialize()
        .map_err(ConfigError::Bind)?;
    validate_settings(&settings).map_err(ConfigError::Validation)?;

    Ok(settings)
}

/// Read the mandatory JSON layer and fold its keys to lowercase.
fn load_json_layer(path: &Path) -> Result<String, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let tree: Value = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if !tree.is_object() {
        return Err(ConfigError::NotAnObject {
            path: path.to_path_buf(),
        });
    }

    Ok(lowercase_keys(tree).to_string())
}

fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key.to_lowercase(), lowercase_keys(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(lowercase_keys).collect()),
        other => other,
    }
}

/// Pick the `SPAHOST_*` variables out of `vars`, with lowercased names.
///
/// A prefixed variable that is not valid UTF-8, or whose name has an empty
/// path segment, is an error rather than being skipped.
fn collect_env_layer<I, K, V>(vars: I) -> Result<::config::Map<String, String>, ConfigError>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<OsString>,
    V: Into<OsString>,
{
    let mut matching = Vec::new();

    for (name, value) in vars {
        let (name, value): (OsString, OsString) = (name.into(), value.into());
        let lossy = name.to_string_lossy().into_owned();
        if !lossy.starts_with(ENV_PREFIX) || lossy == ENVIRONMENT_VAR {
            continue;
        }

        let invalid = |reason: &str| ConfigError::Override {
            key: lossy.clone(),
            reason: reason.to_string(),
        };
        let name = name
            .into_string()
            .map_err(|_| invalid("variable name is not valid UTF-8"))?;
        let value = value
            .into_string()
            .map_err(|_| invalid("value is not valid UTF-8"))?;
        if name[ENV_PREFIX.len()..].split(ENV_SEPARATOR).any(str::is_empty) {
            return Err(invalid("empty key segment"));
        }

        matching.push((name.to_lowercase(), value));
    }

    // Names differing only in case collapse to one key; the last in name order wins.
    matching.sort();
    Ok(matching.into_iter().collect())
}
