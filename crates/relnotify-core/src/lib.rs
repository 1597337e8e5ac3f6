//! relnotify Core - shared configuration and error types
//!
//! This crate provides the configuration model (file loading, environment
//! overrides, validation) and the error hierarchy used by every other
//! relnotify crate.

pub mod config;
pub mod error;

pub use config::Config;
pub use error::{ConfigError, Result};
