//! HTTP adapter module. Implements the backend ports with reqwest.

pub mod backend_client;

pub use backend_client::BackendClient;
