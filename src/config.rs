//! Service configuration, read once from the environment at startup.
//!
//! `.env` is loaded first when present. Every value has a default; a missing
//! `API_SECRET` falls back to a placeholder that `run()` warns about.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::document::engine::{DEFAULT_PROBE_TIMEOUT, DEFAULT_RUN_TIMEOUT};
use crate::document::{default_backends, CompilerBackend};
use crate::lesson::DEFAULT_MAX_EXERCISES;

const DEFAULT_API_SECRET: &str = "default_secret";
pub const DEFAULT_MAX_CONTENT_LENGTH: usize = 1_048_576;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got '{value}'")]
    InvalidNumber {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error("{name} must be greater than zero")]
    Zero { name: &'static str },
    #[error("unknown LaTeX compiler '{0}' in LATEX_COMPILERS (known: tectonic, pdflatex)")]
    UnknownCompiler(String),
    #[error("LATEX_COMPILERS must name at least one compiler")]
    NoCompilers,
}

/// Immutable configuration shared by every request.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_secret: String,
    pub max_exercises: usize,
    pub max_content_length: usize,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub compilers: Vec<CompilerBackend>,
    pub probe_timeout: Duration,
    pub run_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_secret: DEFAULT_API_SECRET.to_string(),
            max_exercises: DEFAULT_MAX_EXERCISES,
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            compilers: default_backends(),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            run_timeout: DEFAULT_RUN_TIMEOUT,
        }
    }
}

impl AppConfig {
    /// Load `.env` (if any) and read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_secret = lookup("API_SECRET")
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.api_secret);

        let max_exercises = parse_var(&lookup, "MAX_EXERCISES", "positive integer")?
            .unwrap_or(defaults.max_exercises);
        if max_exercises == 0 {
            return Err(ConfigError::Zero {
                name: "MAX_EXERCISES",
            });
        }

        let max_content_length = parse_var(&lookup, "MAX_CONTENT_LENGTH", "byte count")?
            .unwrap_or(defaults.max_content_length);

        let compilers = match lookup("LATEX_COMPILERS") {
            Some(list) => parse_compilers(&list)?,
            None => defaults.compilers,
        };

        let probe_timeout = parse_var(&lookup, "COMPILER_PROBE_TIMEOUT_SECS", "number of seconds")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.probe_timeout);
        let run_timeout = parse_var(&lookup, "COMPILER_RUN_TIMEOUT_SECS", "number of seconds")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.run_timeout);

        Ok(Self {
            api_secret,
            max_exercises,
            max_content_length,
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "PORT", "port number")?.unwrap_or(defaults.port),
            log_level: lookup("LOG_LEVEL")
                .map(|level| level.to_lowercase())
                .unwrap_or(defaults.log_level),
            compilers,
            probe_timeout,
            run_timeout,
        })
    }

    pub fn uses_default_secret(&self) -> bool {
        self.api_secret == DEFAULT_API_SECRET
    }

    /// The exact `Authorization` header value `/convert` accepts.
    pub fn expected_authorization(&self) -> String {
        format!("Bearer {}", self.api_secret)
    }

    pub fn compiler_names(&self) -> Vec<&str> {
        self.compilers.iter().map(|c| c.name.as_str()).collect()
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str, expected: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber {
                name,
                expected,
                value: raw,
            }),
    }
}

/// Parse a comma-separated, ordered list of compiler names.
pub fn parse_compilers(list: &str) -> Result<Vec<CompilerBackend>, ConfigError> {
    let compilers = list
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            CompilerBackend::by_name(name).ok_or_else(|| ConfigError::UnknownCompiler(name.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if compilers.is_empty() {
        return Err(ConfigError::NoCompilers);
    }
    Ok(compilers)
}
