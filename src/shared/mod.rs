//! Cross-cutting helpers: configuration.

pub mod config;

pub use config::AppConfig;
