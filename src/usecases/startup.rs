//! Startup checks run before the interactive session.

use crate::ports::HealthPort;
use tracing::{info, warn};

/// Ask the backend whether it is up. A failure is logged and reported as `false`; the session
/// still starts, and each lookup surfaces its own error.
pub async fn check_backend(health: &dyn HealthPort) -> bool {
    match health.check_health().await {
        Ok(()) => {
            info!("backend health check passed");
            true
        }
        Err(e) => {
            warn!(error = %e, "backend health check failed; lookups will likely fail");
            false
        }
    }
}
