use std::env;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} not set")]
    Missing(&'static str),
}

#[derive(Clone, Debug)]
pub struct EnvConfig {
    pub bind_addr: String,
    pub db_url: String,
    pub base_url: String,
    pub mail: MailConfig,
    pub x_access_token: Option<String>,
}

#[derive(Clone, Debug)]
pub struct MailConfig {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub from: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: "https://api.resend.com/emails".to_string(),
            from: "noreply@dailynews.local".to_string(),
        }
    }
}

impl EnvConfig {
    fn get_env(key: &'static str) -> Result<String, ConfigError> {
        env::var(key).map_err(|_| ConfigError::Missing(key))
    }

    fn get_env_or(key: &str, default: &str) -> String {
        env::var(key).unwrap_or_else(|_| default.to_string())
    }

    // Empty values count as unset so `.env` templates can leave keys blank.
    fn get_env_opt(key: &str) -> Option<String> {
        env::var(key).ok().filter(|v| !v.trim().is_empty())
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let mail_defaults = MailConfig::default();

        Ok(EnvConfig {
            bind_addr: Self::get_env_or("BIND_ADDR", DEFAULT_BIND_ADDR),
            db_url: Self::get_env("DATABASE_URL")?,
            base_url: Self::get_env_or("BASE_URL", "http://127.0.0.1:8000")
                .trim_end_matches('/')
                .to_string(),
            mail: MailConfig {
                api_key: Self::get_env_opt("MAIL_API_KEY"),
                endpoint: Self::get_env_or("MAIL_ENDPOINT", &mail_defaults.endpoint),
                from: Self::get_env_or("DEFAULT_FROM_EMAIL", &mail_defaults.from),
            },
            x_access_token: Self::get_env_opt("X_USER_ACCESS_TOKEN"),
        })
    }
}
