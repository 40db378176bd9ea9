//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{Discussion, DomainError};

/// News lookup keyed by city.
#[async_trait::async_trait]
pub trait NewsPort: Send + Sync {
    /// Fetch the current top headlines for `city`, in backend order.
    async fn fetch_top_news(&self, city: &str) -> Result<Vec<String>, DomainError>;
}

/// Discussion lookup keyed by headline.
#[async_trait::async_trait]
pub trait DiscussionPort: Send + Sync {
    /// Fetch comments about `topic` together with their summary.
    ///
    /// - `city`: the city the headline was found for; `None` when unknown.
    async fn fetch_discussion(
        &self,
        topic: &str,
        city: Option<&str>,
    ) -> Result<Discussion, DomainError>;
}

/// Backend liveness check.
#[async_trait::async_trait]
pub trait HealthPort: Send + Sync {
    async fn check_health(&self) -> Result<(), DomainError>;
}
