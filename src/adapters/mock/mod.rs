//! Mock adapters. Canned backend for demos and development.

pub mod demo_backend;

pub use demo_backend::DemoBackend;
