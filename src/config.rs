//! Host configuration.
//!
//! Values come from built-in defaults, then an optional `gravity_swap.toml`
//! (or an explicit file), then `GRAVITY_SWAP__SECTION__KEY` environment
//! variables. A configuration that fails to load is reported and replaced by
//! the defaults.

use std::path::Path;

use ::config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use tracing::Level;

const CONFIG_BASENAME: &str = "gravity_swap";
const ENV_PREFIX: &str = "GRAVITY_SWAP";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub debug: DebugConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
    pub palette_size: usize,
    /// Fixed seed for reproducible boards; drawn from OS entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 8,
            height: 8,
            palette_size: 5,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DebugConfig {
    /// One of `trace`, `debug`, `info`, `warn`, `error`.
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl DebugConfig {
    /// The configured level, or `INFO` if it does not name one.
    pub fn level(&self) -> Level {
        parse_log_level(&self.log_level).unwrap_or(Level::INFO)
    }
}

/// Parses a level name case-insensitively.
pub fn parse_log_level(name: &str) -> Option<Level> {
    name.trim().parse().ok()
}

/// Loads the configuration, falling back to defaults on any error.
///
/// With `path` set, that file must exist; otherwise `gravity_swap.toml` in the
/// working directory is read if present.
pub fn load_config(path: Option<&Path>) -> AppConfig {
    match load_config_inner(path) {
        Ok(config) => config,
        Err(error) => {
            tracing::warn!("Failed to load config, using defaults: {error}");
            AppConfig::default()
        }
    }
}

fn load_config_inner(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let defaults = AppConfig::default();

    let file = match path {
        Some(path) => File::from(path).format(FileFormat::Toml).required(true),
        None => File::new(CONFIG_BASENAME, FileFormat::Toml).required(false),
    };

    let builder = Config::builder()
        .set_default("board.width", defaults.board.width as u64)?
        .set_default("board.height", defaults.board.height as u64)?
        .set_default("board.palette_size", defaults.board.palette_size as u64)?
        .set_default("debug.log_level", defaults.debug.log_level)?
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

    builder.build()?.try_deserialize()
}
