//! Document pipeline common crate
//!
//! Pieces shared by the OCR gateway, the entity extraction gateway and the
//! extraction UI: the `{"detail": ...}` error body, environment-backed
//! configuration helpers, tracing setup, the health route and graceful
//! shutdown.

pub mod env;
pub mod health;
pub mod shutdown;
pub mod telemetry;

mod error;

pub use env::{ConfigError, Env};
pub use error::ErrorDetail;
pub use shutdown::shutdown_signal;
