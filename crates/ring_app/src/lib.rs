//! Swagger ring application: configuration, logging and the HTTP surface.
pub mod config;
pub mod logging;
pub mod server;

pub use config::{ConfigError, RingConfig};
pub use server::{router, router_with_next, serve, AppState};
