// src/config/mod.rs
mod models;

pub use models::*;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Dotenv file picked up from the working directory when none is named.
pub const DEFAULT_ENV_FILE: &str = ".env.local";

const SUPABASE_PREFIX: &str = "NEXT_PUBLIC_SUPABASE";
const TOOL_PREFIX: &str = "CONNCHECK";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load settings: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Failed to read env file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// Values given on the command line; they win over every other source.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub resource: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Load settings from an optional file plus the process environment.
pub fn load_settings(path: Option<&Path>, overrides: &Overrides) -> Result<Settings, ConfigError> {
    load_settings_from(path, None, overrides)
}

/// Same as [`load_settings`], but reads variables from `env` instead of the
/// process environment when one is given.
pub fn load_settings_from(
    path: Option<&Path>,
    env: Option<HashMap<String, String>>,
    overrides: &Overrides,
) -> Result<Settings, ConfigError> {
    let mut builder = ::config::Config::builder()
        .set_default("resource", DEFAULT_RESOURCE)?
        .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS)?;

    if let Some(path) = path {
        debug!("Reading settings file {}", path.display());
        builder = builder.add_source(::config::File::from(path).required(true));
    }

    // NEXT_PUBLIC_SUPABASE_URL -> url, NEXT_PUBLIC_SUPABASE_ANON_KEY -> anon_key
    let settings: Settings = builder
        .add_source(::config::Environment::with_prefix(SUPABASE_PREFIX).source(env.clone()))
        .add_source(
            ::config::Environment::with_prefix(TOOL_PREFIX)
                .try_parsing(true)
                .source(env),
        )
        .set_override_option("resource", overrides.resource.clone())?
        .set_override_option("timeout_secs", overrides.timeout_secs)?
        .build()?
        .try_deserialize()?;

    settings.validate().map_err(ConfigError::Invalid)?;
    Ok(settings)
}

/// Load a dotenv file into the process environment without overriding
/// variables that are already set. A missing file is only an error when
/// `required` is set.
pub fn load_env_file(path: &Path, required: bool) -> Result<Option<PathBuf>, ConfigError> {
    match dotenvy::from_path(path) {
        Ok(()) => {
            debug!("Loaded environment from {}", path.display());
            Ok(Some(path.to_path_buf()))
        }
        Err(err) if !required && err.not_found() => {
            debug!("No env file at {}", path.display());
            Ok(None)
        }
        Err(source) => Err(ConfigError::EnvFile {
            path: path.to_path_buf(),
            source,
        }),
    }
}
