use std::env;
use thiserror::Error;

pub const ORS_API_KEY_VAR: &str = "ORS_API_KEY";
pub const ORS_BASE_URL_VAR: &str = "ORS_BASE_URL";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Neither ORS_BASE_URL nor ORS_API_KEY is set")]
    MissingVar,
}

/// Which directions backend to talk to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrsConfig {
    /// Hosted openrouteservice, keyed.
    Remote { api_key: String },
    /// Self-hosted ORS instance.
    Local { base_url: String },
}

impl OrsConfig {
    /// Reads the process environment; call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// A non-empty `ORS_BASE_URL` selects the local backend.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(base_url) = non_empty(ORS_BASE_URL_VAR) {
            return Ok(OrsConfig::Local {
                base_url: base_url.trim_end_matches('/').to_string(),
            });
        }
        non_empty(ORS_API_KEY_VAR)
            .map(|api_key| OrsConfig::Remote { api_key })
            .ok_or(ConfigError::MissingVar)
    }
}
