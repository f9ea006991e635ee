use shared::ResponseType;
use thiserror::Error;

pub const STORE_KEY: &str = "POLL_STORE";
pub const RESPONSE_TYPE_KEY: &str = "MATTERMOST_RESPONSE_TYPE";
pub const CORS_ORIGIN_KEY: &str = "CORS_ORIGIN_PREFIX";

const DEFAULT_CORS_ORIGIN: &str = "http://localhost";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StoreBackend {
    #[default]
    Postgres,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, ConfigError> {
        match value {
            "postgres" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::InvalidValue { key: STORE_KEY, value: other.to_string() }),
        }
    }
}

/// Settings read from the deployment's secrets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store: StoreBackend,
    pub response_type: ResponseType,
    pub cors_origin_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreBackend::default(),
            response_type: ResponseType::default(),
            cors_origin_prefix: DEFAULT_CORS_ORIGIN.into(),
        }
    }
}

impl Config {
    /// Builds the config from any key lookup; missing keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store = match lookup(STORE_KEY) {
            Some(value) => value.trim().parse()?,
            None => StoreBackend::default(),
        };
        let response_type = match lookup(RESPONSE_TYPE_KEY) {
            Some(value) => value.trim().parse::<ResponseType>().map_err(|_| ConfigError::InvalidValue {
                key: RESPONSE_TYPE_KEY,
                value: value.trim().to_string(),
            })?,
            None => ResponseType::default(),
        };

        let cors_origin_prefix = lookup(CORS_ORIGIN_KEY)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.into());

        Ok(Self { store, response_type, cors_origin_prefix })
    }
}
