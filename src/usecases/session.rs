//! Discussion session controller: city -> headlines -> discussion.
//!
//! Owns the client-side `SessionState`. All mutation goes through `watch::Sender::send_modify`
//! (or `send_if_modified`) so renderers can subscribe and redraw on change. No lock is held
//! across an await point.

use crate::domain::{Discussion, DomainError, Notification, SessionState};
use crate::ports::{DiscussionPort, NewsPort, NotifierPort};
use crate::usecases::debouncer::Debouncer;
use serde::Deserialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Quiet period between the last city change and the news lookup.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// What to do with a response whose request has been superseded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalenessPolicy {
    /// Apply every response as it arrives, even for a city/headline the user has moved past.
    #[default]
    ApplyLatest,
    /// Tag requests with an epoch and their key; drop responses that no longer match.
    DiscardSuperseded,
}

/// Result of a single discussion fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Comments and summary were replaced.
    Applied,
    /// The request failed; the user was notified and state kept.
    Failed,
    /// The response arrived for a superseded request and was dropped.
    Discarded,
    /// Nothing to fetch (no headline selected) or a fetch is already in flight.
    Ignored,
}

struct SessionInner {
    news: Arc<dyn NewsPort>,
    discussions: Arc<dyn DiscussionPort>,
    notifier: Arc<dyn NotifierPort>,
    state: watch::Sender<SessionState>,
    policy: StalenessPolicy,
    news_epoch: AtomicU64,
    discussion_epoch: AtomicU64,
    debouncer: Debouncer,
}

/// Discussion session. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct DiscussionSession {
    inner: Arc<SessionInner>,
}

impl DiscussionSession {
    pub fn new(
        news: Arc<dyn NewsPort>,
        discussions: Arc<dyn DiscussionPort>,
        notifier: Arc<dyn NotifierPort>,
        debounce: Duration,
        policy: StalenessPolicy,
    ) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                news,
                discussions,
                notifier,
                state: watch::channel(SessionState::default()).0,
                policy,
                news_epoch: AtomicU64::new(0),
                discussion_epoch: AtomicU64::new(0),
                debouncer: Debouncer::new(debounce),
            }),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// Receiver that observes every state transition.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    pub fn can_fetch_discussion(&self) -> bool {
        self.inner.state.borrow().can_fetch_discussion()
    }

    /// Update the city immediately and (re)start the debounced news lookup.
    pub fn set_city(&self, value: impl Into<String>) {
        let value = value.into();
        self.inner.state.send_if_modified(|s| {
            if s.city == value {
                false
            } else {
                s.city = value;
                true
            }
        });

        let inner = Arc::clone(&self.inner);
        self.inner
            .debouncer
            .schedule(move || SessionInner::begin_news_lookup(inner));
    }

    /// Select one of the current headlines. An empty value clears the selection.
    pub fn set_selected_headline(&self, value: impl Into<String>) -> Result<(), DomainError> {
        let value = value.into();
        let mut accepted = false;
        self.inner.state.send_if_modified(|s| {
            if !value.is_empty() && !s.headlines.contains(&value) {
                return false;
            }
            accepted = true;
            if s.selected_headline == value {
                false
            } else {
                s.selected_headline = value.clone();
                true
            }
        });
        if accepted {
            Ok(())
        } else {
            Err(DomainError::Input(format!(
                "'{value}' is not one of the current headlines"
            )))
        }
    }

    /// Fetch comments and summary for the selected headline.
    ///
    /// Ignored when nothing is selected or a fetch is already in flight.
    pub async fn fetch_discussion(&self) -> FetchOutcome {
        let mut request = None;
        self.inner.state.send_if_modified(|s| {
            if !s.can_fetch_discussion() {
                return false;
            }
            s.loading_summary = true;
            request = Some((s.selected_headline.clone(), s.city.clone()));
            true
        });
        let Some((topic, city)) = request else {
            debug!("discussion fetch ignored (no headline selected or fetch in flight)");
            return FetchOutcome::Ignored;
        };

        let epoch = self.inner.discussion_epoch.fetch_add(1, Ordering::SeqCst) + 1;
        info!(topic = %topic, epoch, "fetching discussion");

        // The request runs on its own task: dropping this future must not strand loading_summary.
        let inner = Arc::clone(&self.inner);
        let request_topic = topic.clone();
        let request = tokio::spawn(async move {
            let city = (!city.is_empty()).then_some(city.as_str());
            let result = inner.discussions.fetch_discussion(&request_topic, city).await;
            inner.finish_discussion(epoch, &request_topic, result)
        });
        match request.await {
            Ok(outcome) => outcome,
            Err(e) => {
                let err = DomainError::Discussion(format!("discussion task failed: {}", e));
                self.inner.finish_discussion(epoch, &topic, Err(err))
            }
        }
    }

    /// Resolves once the debounce timer is idle and no news lookup is in flight.
    pub async fn settled(&self) {
        self.inner.debouncer.quiet().await;
        let mut rx = self.inner.state.subscribe();
        let _ = rx.wait_for(|s| !s.loading_headlines).await;
    }
}

impl SessionInner {
    /// Runs on the debounce timer: reads the city, flips the loading flag, and returns the
    /// request future. Synchronous so the flag is set before the timer reports idle.
    fn begin_news_lookup(inner: Arc<Self>) -> impl Future<Output = ()> + Send + 'static {
        let city = inner.state.borrow().city.clone();
        let epoch = if city.is_empty() {
            inner.clear_headlines();
            None
        } else {
            let epoch = inner.news_epoch.fetch_add(1, Ordering::SeqCst) + 1;
            inner.state.send_modify(|s| s.loading_headlines = true);
            Some(epoch)
        };

        async move {
            let Some(epoch) = epoch else {
                return;
            };
            info!(city = %city, epoch, "looking up news");
            let result = inner.news.fetch_top_news(&city).await;
            inner.finish_news_lookup(epoch, &city, result);
        }
    }

    /// Empty city: no request, the headline list goes away with it.
    fn clear_headlines(&self) {
        self.state.send_if_modified(|s| {
            if s.headlines.is_empty() && s.selected_headline.is_empty() {
                return false;
            }
            s.headlines.clear();
            s.selected_headline.clear();
            true
        });
        debug!("city cleared; headlines dropped");
    }

    fn finish_news_lookup(&self, epoch: u64, city: &str, result: Result<Vec<String>, DomainError>) {
        match self.staleness(&self.news_epoch, epoch, || self.state.borrow().city == city) {
            Staleness::Superseded => {
                debug!(city = %city, epoch, "news response superseded by newer lookup; dropped");
                return;
            }
            Staleness::KeyChanged => {
                debug!(city = %city, epoch, "city changed while lookup in flight; dropped");
                self.state.send_modify(|s| s.loading_headlines = false);
                return;
            }
            Staleness::Current => {}
        }

        match result {
            Ok(headlines) => {
                info!(city = %city, count = headlines.len(), "headlines received");
                self.state.send_modify(|s| {
                    s.selected_headline = headlines.first().cloned().unwrap_or_default();
                    s.headlines = headlines;
                    s.loading_headlines = false;
                });
            }
            Err(e) => {
                warn!(city = %city, error = %e, "news lookup failed");
                let notification = Notification::news_failed();
                self.state.send_modify(|s| {
                    s.loading_headlines = false;
                    s.last_notification = Some(notification.clone());
                });
                self.notifier.notify(&notification);
            }
        }
    }

    fn finish_discussion(
        &self,
        epoch: u64,
        topic: &str,
        result: Result<Discussion, DomainError>,
    ) -> FetchOutcome {
        match self.staleness(&self.discussion_epoch, epoch, || {
            self.state.borrow().selected_headline == topic
        }) {
            Staleness::Superseded => {
                debug!(topic = %topic, epoch, "discussion response superseded; dropped");
                return FetchOutcome::Discarded;
            }
            Staleness::KeyChanged => {
                debug!(topic = %topic, epoch, "headline changed while fetch in flight; dropped");
                self.state.send_modify(|s| s.loading_summary = false);
                return FetchOutcome::Discarded;
            }
            Staleness::Current => {}
        }

        match result {
            Ok(discussion) => {
                info!(
                    topic = %topic,
                    comments = discussion.comments.len(),
                    "discussion received"
                );
                self.state.send_modify(|s| {
                    s.discussion = Some(discussion);
                    s.loading_summary = false;
                });
                FetchOutcome::Applied
            }
            Err(e) => {
                warn!(topic = %topic, error = %e, "discussion fetch failed");
                let notification = Notification::summary_failed();
                self.state.send_modify(|s| {
                    s.loading_summary = false;
                    s.last_notification = Some(notification.clone());
                });
                self.notifier.notify(&notification);
                FetchOutcome::Failed
            }
        }
    }

    fn staleness(
        &self,
        counter: &AtomicU64,
        epoch: u64,
        key_matches: impl FnOnce() -> bool,
    ) -> Staleness {
        match self.policy {
            StalenessPolicy::ApplyLatest => Staleness::Current,
            StalenessPolicy::DiscardSuperseded => {
                if counter.load(Ordering::SeqCst) != epoch {
                    Staleness::Superseded
                } else if !key_matches() {
                    Staleness::KeyChanged
                } else {
                    Staleness::Current
                }
            }
        }
    }
}

enum Staleness {
    Current,
    /// A newer request was issued; it owns the loading flag.
    Superseded,
    /// Still the latest request, but the state moved to a different key.
    KeyChanged,
}
