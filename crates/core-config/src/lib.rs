//! Process-wide settings (§6) and operator-controlled configuration.
//!
//! `settings` holds the constants a complete implementation of the
//! technique needs that are not themselves operator-configurable (chunk
//! lengths, thresholds, the scalar-expression heuristic, the per-DBMS dummy
//! table map). `Config` is the small slice of the overall tool's
//! configuration this engine actually reads; everything else (target,
//! authentication, proxying, ...) belongs to collaborators out of scope
//! here.

pub mod settings;

use serde::Deserialize;
use std::path::Path;

/// Operator-controlled knobs the extraction engine consults directly.
/// Loaded from an optional TOML file; any field absent from the file keeps
/// its default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Upper bound on concurrent worker threads for a multi-row dump.
    pub threads: usize,
    /// 1-based inclusive first row requested by the operator (`--start`).
    pub limit_start: Option<usize>,
    /// 1-based inclusive last row requested by the operator (`--stop`).
    pub limit_stop: Option<usize>,
    /// Whether this invocation is a bulk dump (affects the multi-row
    /// heuristic in `core-plan`).
    pub dump: bool,
    /// Whether assembled scalars are additionally hex-decoded.
    pub hex_convert: bool,
    /// Whether the *returned* (not the displayed) value is safe-char
    /// encoded before being handed back to the caller.
    pub safe_char_encode: bool,
    /// Suppresses the end-of-run timing/query-count log line.
    pub brute_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threads: 1,
            limit_start: None,
            limit_stop: None,
            dump: false,
            hex_convert: false,
            safe_char_encode: false,
            brute_mode: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Loads from `path` when given, otherwise returns defaults — the
    /// engine never requires a config file to run.
    pub fn load_from_optional(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }
}
