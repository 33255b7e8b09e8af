//! Configuration management for the OCR gateway

use std::time::Duration;

use docpipe_common::{ConfigError, Env};

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub textract: TextractConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Largest accepted request body (base64 inflates documents by ~4/3)
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct TextractConfig {
    pub region: String,
    /// Explicit credentials; `None` uses the default AWS chain
    pub credentials: Option<StaticCredentials>,
    /// Endpoint override (LocalStack and similar)
    pub endpoint: Option<String>,
    pub timeout: Duration,
}

#[derive(Clone)]
pub struct StaticCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
                max_body_bytes: 16 * 1024 * 1024,
            },
            textract: TextractConfig {
                region: "us-east-1".to_string(),
                credentials: None,
                endpoint: None,
                timeout: Duration::from_secs(30),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(&Env::process())
    }

    pub fn from_source<F>(env: &Env<F>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let credentials = match (env.get("AWS_ACCESS_KEY_ID"), env.get("AWS_SECRET_ACCESS_KEY")) {
            (Some(access_key_id), Some(secret_access_key)) => Some(StaticCredentials {
                access_key_id,
                secret_access_key,
                session_token: env.get("AWS_SESSION_TOKEN"),
            }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::Missing("AWS_SECRET_ACCESS_KEY")),
            (None, Some(_)) => return Err(ConfigError::Missing("AWS_ACCESS_KEY_ID")),
        };

        let max_body_bytes =
            env.megabytes_or("OCR_MAX_BODY_MB", defaults.server.max_body_bytes / (1024 * 1024))?;

        Ok(Config {
            server: ServerConfig {
                host: env.string_or("OCR_HOST", &defaults.server.host),
                port: env.parse_or("OCR_PORT", defaults.server.port)?,
                max_body_bytes,
            },
            textract: TextractConfig {
                region: env.string_or("AWS_REGION", &defaults.textract.region),
                credentials,
                endpoint: env.get("TEXTRACT_ENDPOINT"),
                timeout: Duration::from_secs(
                    env.parse_or("OCR_TIMEOUT_SECS", defaults.textract.timeout.as_secs())?,
                ),
            },
        })
    }
}
