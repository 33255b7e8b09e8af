//! Application state management

use std::sync::Arc;

use crate::client::GatewayClient;
use crate::config::Config;
use crate::pipeline::Pipeline;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    pipeline: Pipeline,
}

impl AppState {
    /// Build the state and the gateway HTTP client
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let pipeline = Pipeline::new(GatewayClient::new(&config.gateways)?);

        Ok(Self {
            inner: Arc::new(AppStateInner { config, pipeline }),
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the pipeline
    pub fn pipeline(&self) -> &Pipeline {
        &self.inner.pipeline
    }
}
