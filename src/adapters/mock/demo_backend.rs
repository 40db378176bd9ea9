//! Demo backend for running the front end without a server.
//!
//! Returns canned headlines, comments, and summary. Simulates network latency with a
//! configurable delay.

use crate::domain::{Comment, Discussion, DomainError, SummaryResult};
use crate::ports::{DiscussionPort, HealthPort, NewsPort};
use std::time::Duration;
use tracing::info;

const HEADLINES: &[&str] = &[
    "Will the sun shine on the Olympic opening ceremony? Here's our forecast",
    "'Heavy lifter' drones could soon solve Mount Everest's trash problem",
    "Watch: Emergency workers pick through wreckage of Nepal plane crash",
    "Passenger plane crashes during takeoff in Nepal, killing 18",
    "Pilot survived Nepal crash after cockpit sheared by freight container",
];

const WELCOME_BODY: &str = ">!(Thanks for posting, u/ANewsHubBot!)!<\n\n\
Welcome everyone to {sub}! We promote civil, constructive discussion and a positive atmosphere. \
Please be courteous, follow the rules, and report violations.\n\n\
If an article is paywalled, use archive.ph and link to it in the comments.";

/// Demo backend. Implements every backend port with fixed data.
pub struct DemoBackend {
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
}

impl DemoBackend {
    /// Create a demo backend with default delay (300ms).
    pub fn new() -> Self {
        Self { delay_ms: 300 }
    }

    /// Create a demo backend with custom delay.
    pub fn with_delay(delay_ms: u64) -> Self {
        Self { delay_ms }
    }

    async fn latency(&self) {
        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
    }
}

impl Default for DemoBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn automod_comment(subreddit: &str, score: i64, topic: &str) -> Comment {
    Comment {
        subreddit: subreddit.to_string(),
        post_title: "Plane crashes during takeoff in Nepal, killing at least 18 - CNN".to_string(),
        comment_body: WELCOME_BODY.replace("{sub}", subreddit),
        author: "AutoModerator".to_string(),
        score,
        post_age_days: 29,
        comment_age_days: Some(29),
        news_topic: Some(topic.to_string()),
    }
}

#[async_trait::async_trait]
impl NewsPort for DemoBackend {
    async fn fetch_top_news(&self, city: &str) -> Result<Vec<String>, DomainError> {
        info!(city = %city, "[DEMO] Simulating news lookup");
        self.latency().await;
        if city.trim().is_empty() {
            return Err(DomainError::News("city name is required".to_string()));
        }
        Ok(HEADLINES.iter().map(|h| h.to_string()).collect())
    }
}

#[async_trait::async_trait]
impl DiscussionPort for DemoBackend {
    async fn fetch_discussion(
        &self,
        topic: &str,
        city: Option<&str>,
    ) -> Result<Discussion, DomainError> {
        info!(topic = %topic, city = ?city, "[DEMO] Simulating discussion fetch");
        self.latency().await;
        if topic.trim().is_empty() {
            return Err(DomainError::Discussion("topic is required".to_string()));
        }

        let mut comments = vec![
            automod_comment("r/NewsHub", 12, topic),
            automod_comment("r/WorldNewsHeadlines", 6, topic),
            automod_comment("r/NewsHub", 1, topic),
        ];
        comments.sort_by(|a, b| b.score.cmp(&a.score));

        Ok(Discussion {
            comments,
            summary: SummaryResult {
                summary: "[DEMO] These discussions are welcoming messages from subreddit \
                          moderators. They emphasize civil, constructive discussion and remind \
                          users to share paywalled articles through archive.ph."
                    .to_string(),
                sentiment: "Neutral: the messages are informative guidelines and do not express \
                            any specific sentiment."
                    .to_string(),
                actionable_needs: "1. Keep discussion civil and constructive.\n\
                                   2. Follow the subreddit rules and report violations.\n\
                                   3. Link paywalled articles through archive.ph."
                    .to_string(),
            },
        })
    }
}

#[async_trait::async_trait]
impl HealthPort for DemoBackend {
    async fn check_health(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_headlines() {
        let backend = DemoBackend::with_delay(1);
        let headlines = backend.fetch_top_news("Kathmandu").await.unwrap();
        assert_eq!(headlines.len(), 5);
        assert!(matches!(
            backend.fetch_top_news("  ").await,
            Err(DomainError::News(_))
        ));
    }

    #[tokio::test]
    async fn test_demo_rejects_empty_topic() {
        let backend = DemoBackend::with_delay(1);
        let err = backend.fetch_discussion("", Some("Kathmandu")).await.unwrap_err();
        assert!(matches!(err, DomainError::Discussion(_)));
    }

    #[tokio::test]
    async fn test_demo_discussion() {
        let backend = DemoBackend::with_delay(1);
        let d = backend
            .fetch_discussion(HEADLINES[3], Some("Kathmandu"))
            .await
            .unwrap();

        assert_eq!(d.comments.len(), 3);
        assert_eq!(d.comments[0].score, 12);
        assert!(d.comments[1].comment_body.contains("r/WorldNewsHeadlines"));
        assert_eq!(d.summary.actionable_items().len(), 3);
    }
}
