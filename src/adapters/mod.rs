//! Infrastructure adapters. Implement ports.
//!
//! Backend HTTP client, demo backend, terminal UI. Map errors to DomainError.

pub mod http;
pub mod mock;
pub mod ui;
