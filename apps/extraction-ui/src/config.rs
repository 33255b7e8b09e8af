//! Configuration management for the extraction UI

use std::time::Duration;

use docpipe_common::{ConfigError, Env};

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub gateways: GatewayConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// OCR gateway base URL, without trailing slash
    pub ocr_api_url: String,
    /// Entity extraction gateway base URL, without trailing slash
    pub ner_api_url: String,
    /// Per-call timeout
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8501,
                max_upload_bytes: 10 * 1024 * 1024,
            },
            gateways: GatewayConfig {
                ocr_api_url: "http://localhost:5000".to_string(),
                ner_api_url: "http://localhost:8000".to_string(),
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
        let max_upload_bytes = env.megabytes_or(
            "UI_MAX_UPLOAD_MB",
            defaults.server.max_upload_bytes / (1024 * 1024),
        )?;

        Ok(Config {
            server: ServerConfig {
                host: env.string_or("UI_HOST", &defaults.server.host),
                port: env.parse_or("UI_PORT", defaults.server.port)?,
                max_upload_bytes,
            },
            gateways: GatewayConfig {
                ocr_api_url: base_url(env.string_or("OCR_API_URL", &defaults.gateways.ocr_api_url)),
                ner_api_url: base_url(env.string_or("NER_API_URL", &defaults.gateways.ner_api_url)),
                timeout: Duration::from_secs(
                    env.parse_or("UI_TIMEOUT_SECS", defaults.gateways.timeout.as_secs())?,
                ),
            },
        })
    }
}

fn base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        Config::from_source(&Env::new(|name: &str| map.get(name).map(|v| v.to_string())))
    }

    #[test]
    fn test_defaults_point_at_local_gateways() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.gateways.ocr_api_url, "http://localhost:5000");
        assert_eq!(config.gateways.ner_api_url, "http://localhost:8000");
        assert_eq!(config.gateways.timeout, Duration::from_secs(30));
        assert_eq!(config.server.port, 8501);
    }

    #[test]
    fn test_gateway_urls_lose_trailing_slash() {
        let config = config_from(&[
            ("OCR_API_URL", "http://textract-api:5000/"),
            ("NER_API_URL", "http://ner-api:8000"),
        ])
        .unwrap();
        assert_eq!(config.gateways.ocr_api_url, "http://textract-api:5000");
        assert_eq!(config.gateways.ner_api_url, "http://ner-api:8000");
    }

    #[test]
    fn test_invalid_timeout() {
        assert!(matches!(
            config_from(&[("UI_TIMEOUT_SECS", "soon")]),
            Err(ConfigError::Invalid { name: "UI_TIMEOUT_SECS", .. })
        ));
    }

    #[test]
    fn test_oversized_upload_limit_is_invalid() {
        let err = config_from(&[("UI_MAX_UPLOAD_MB", "18446744073709551615")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "UI_MAX_UPLOAD_MB", .. }));
    }
}
