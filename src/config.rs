use std::env;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set (in the environment or .env)")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MailConfig {
    pub relay_url: String,
    pub api_key: Option<String>,
    pub sender_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub mail: MailConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let database_url = var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let port = match var("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: raw,
            })?,
            None => 3000,
        };

        Ok(AppConfig {
            database_url,
            host: var("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            mail: MailConfig {
                relay_url: var("MAIL_RELAY_URL")
                    .unwrap_or_else(|| "http://127.0.0.1:8025".to_string()),
                api_key: var("MAIL_RELAY_API_KEY"),
                sender_name: var("MAIL_SENDER_NAME")
                    .unwrap_or_else(|| "East Syria Explorer".to_string()),
            },
        })
    }
}
