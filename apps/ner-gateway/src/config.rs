//! Configuration management for the entity extraction gateway

use std::time::Duration;

use docpipe_common::{ConfigError, Env};

use crate::ner::ExtractionSettings;

#[derive(Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub openai: OpenAiConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl OpenAiConfig {
    pub fn extraction_settings(&self) -> ExtractionSettings {
        ExtractionSettings {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
        }
    }
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("server", &self.server)
            .field("openai", &self.openai)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(&Env::process())
    }

    /// The API key is required; everything else has a default
    pub fn from_source<F>(env: &Env<F>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ExtractionSettings::default();

        Ok(Config {
            server: ServerConfig {
                host: env.string_or("NER_HOST", "0.0.0.0"),
                port: env.parse_or("NER_PORT", 8000)?,
            },
            openai: OpenAiConfig {
                api_key: env.required("OPENAI_API_KEY")?,
                base_url: env.string_or("OPENAI_BASE_URL", "https://api.openai.com/v1"),
                model: env.string_or("OPENAI_MODEL", &defaults.model),
                max_tokens: env.parse_or("OPENAI_MAX_TOKENS", defaults.max_tokens)?,
                timeout: Duration::from_secs(env.parse_or("NER_TIMEOUT_SECS", 30)?),
            },
        })
    }
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
    fn test_api_key_is_required() {
        assert!(matches!(
            config_from(&[]),
            Err(ConfigError::Missing("OPENAI_API_KEY"))
        ));
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("OPENAI_API_KEY", "sk-live")]).unwrap();

        assert_eq!(config.server.port, 8000);
        assert_eq!(config.openai.base_url, "https://api.openai.com/v1");
        assert_eq!(config.openai.model, "gpt-4o-mini");
        assert_eq!(config.openai.max_tokens, 512);
        assert_eq!(config.openai.timeout, Duration::from_secs(30));
        assert!(!format!("{:?}", config).contains("sk-live"));
    }

    #[test]
    fn test_invalid_max_tokens() {
        assert!(matches!(
            config_from(&[("OPENAI_API_KEY", "k"), ("OPENAI_MAX_TOKENS", "-1")]),
            Err(ConfigError::Invalid { name: "OPENAI_MAX_TOKENS", .. })
        ));
    }
}
