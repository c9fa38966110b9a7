use crate::logging::LogFormat;
use anyhow::{anyhow, Context, Result};
use reminder_rl::Hyperparameters;
use std::env;
use std::fmt::Display;
use std::str::FromStr;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5002;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub hyperparameters: Hyperparameters,
    /// Seeds the startup training pass; entropy when unset.
    pub seed: Option<u64>,
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            hyperparameters: Hyperparameters::default(),
            seed: None,
            log_format: LogFormat::default(),
        }
    }
}

impl ServerConfig {
    /// Reads `REMINDER_*` variables from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let hp = &defaults.hyperparameters;

        let hyperparameters = Hyperparameters::new(
            parse_or(&lookup, "REMINDER_ALPHA", hp.alpha)?,
            parse_or(&lookup, "REMINDER_GAMMA", hp.gamma)?,
            parse_or(&lookup, "REMINDER_EPSILON", hp.epsilon)?,
            parse_or(&lookup, "REMINDER_EPISODES", hp.episodes)?,
        )
        .context("Invalid learning hyperparameters")?;

        let seed = match lookup("REMINDER_SEED") {
            Some(v) => Some(parse("REMINDER_SEED", &v)?),
            None => None,
        };

        Ok(Self {
            host: lookup("REMINDER_HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "REMINDER_PORT", defaults.port)?,
            hyperparameters,
            seed,
            log_format: parse_or(&lookup, "REMINDER_LOG_FORMAT", defaults.log_format)?,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(v) => parse(key, &v),
        None => Ok(default),
    }
}

fn parse<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| anyhow!("{key}={value:?} is not valid: {e}"))
}
