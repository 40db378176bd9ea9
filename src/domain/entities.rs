//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/terminal types here; adapters map wire payloads into these.

use serde::{Deserialize, Serialize};

/// A single Reddit comment attached to the discussion of a headline.
///
/// Field names on the wire follow the backend's casing (`Subreddit`, `PostTitle`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "Subreddit")]
    pub subreddit: String,
    #[serde(rename = "PostTitle")]
    pub post_title: String,
    /// Raw body. May contain markdown and spoiler syntax (`>!text!<`).
    #[serde(rename = "CommentBody")]
    pub comment_body: String,
    #[serde(rename = "Author")]
    pub author: String,
    #[serde(rename = "Score")]
    pub score: i64,
    #[serde(rename = "PostAge")]
    pub post_age_days: i64,
    #[serde(rename = "CommentAge", default, skip_serializing_if = "Option::is_none")]
    pub comment_age_days: Option<i64>,
    #[serde(rename = "newsTopic", default, skip_serializing_if = "Option::is_none")]
    pub news_topic: Option<String>,
}

impl Comment {
    /// Body prepared for terminal display: spoiler markers unwrapped, outer whitespace trimmed.
    pub fn display_body(&self) -> String {
        let mut out = String::with_capacity(self.comment_body.len());
        let mut rest = self.comment_body.as_str();
        while let Some(start) = rest.find(">!") {
            match rest[start + 2..].find("!<") {
                Some(len) => {
                    out.push_str(&rest[..start]);
                    out.push_str(&rest[start + 2..start + 2 + len]);
                    rest = &rest[start + 2 + len + 2..];
                }
                None => break,
            }
        }
        out.push_str(rest);
        out.trim().to_string()
    }
}

/// Backend-derived analysis of a comment list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub summary: String,
    pub sentiment: String,
    /// Newline-delimited list of items.
    pub actionable_needs: String,
}

impl SummaryResult {
    /// One entry per line of `actionable_needs`. Trailing blank lines are dropped.
    pub fn actionable_items(&self) -> Vec<&str> {
        let mut items: Vec<&str> = self.actionable_needs.split('\n').collect();
        while items.last().is_some_and(|l| l.trim().is_empty()) {
            items.pop();
        }
        items
    }
}

/// Comments and their summary. Always produced together from one backend response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discussion {
    pub comments: Vec<Comment>,
    #[serde(flatten)]
    pub summary: SummaryResult,
}

/// Which flow a notification belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    News,
    Summary,
}

/// User-visible notification. Every failure of a flow collapses into one fixed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn news_failed() -> Self {
        Self {
            kind: NotificationKind::News,
            message: "error fetching news".to_string(),
        }
    }

    pub fn summary_failed() -> Self {
        Self {
            kind: NotificationKind::Summary,
            message: "error fetching summary".to_string(),
        }
    }
}

/// Client-side session state. Rendered by the UI, mutated only by the session controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub city: String,
    pub headlines: Vec<String>,
    /// Empty, or a member of `headlines`.
    pub selected_headline: String,
    /// `None` until the first discussion fetch succeeds.
    pub discussion: Option<Discussion>,
    pub loading_headlines: bool,
    pub loading_summary: bool,
    pub last_notification: Option<Notification>,
}

impl SessionState {
    pub fn comments(&self) -> &[Comment] {
        self.discussion
            .as_ref()
            .map(|d| d.comments.as_slice())
            .unwrap_or_default()
    }

    pub fn summary(&self) -> Option<&SummaryResult> {
        self.discussion.as_ref().map(|d| &d.summary)
    }

    /// Discussion fetch is allowed only with a selected headline and no fetch in flight.
    pub fn can_fetch_discussion(&self) -> bool {
        !self.selected_headline.is_empty() && !self.loading_summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(body: &str) -> Comment {
        Comment {
            subreddit: "r/NewsHub".into(),
            post_title: "Plane crashes during takeoff".into(),
            comment_body: body.into(),
            author: "AutoModerator".into(),
            score: 6,
            post_age_days: 29,
            comment_age_days: None,
            news_topic: None,
        }
    }

    #[test]
    fn test_display_body_unwraps_spoilers() {
        let c = comment(">!(Thanks for posting, u/ANewsHubBot!)!<\n\nWelcome everyone  ");
        assert_eq!(
            c.display_body(),
            "(Thanks for posting, u/ANewsHubBot!)\n\nWelcome everyone"
        );
    }

    #[test]
    fn test_display_body_unterminated_spoiler_kept() {
        let c = comment("a >!b");
        assert_eq!(c.display_body(), "a >!b");
    }

    #[test]
    fn test_actionable_items_split_on_newline() {
        let s = SummaryResult {
            summary: "S".into(),
            sentiment: "Neutral".into(),
            actionable_needs: "1. x\n2. y\n".into(),
        };
        assert_eq!(s.actionable_items(), vec!["1. x", "2. y"]);
    }

    #[test]
    fn test_discussion_decodes_backend_shape() {
        let json = r#"{
            "comments": [{"Subreddit": "r/a", "PostTitle": "t", "CommentBody": "b",
                          "Author": "u", "Score": 3, "PostAge": 2, "CommentAge": 1,
                          "newsTopic": "A"}],
            "summary": "S", "sentiment": "Neutral", "actionable_needs": "1. x"
        }"#;
        let d: Discussion = serde_json::from_str(json).unwrap();
        assert_eq!(d.comments.len(), 1);
        assert_eq!(d.comments[0].score, 3);
        assert_eq!(d.comments[0].comment_age_days, Some(1));
        assert_eq!(d.summary.summary, "S");
    }

    #[test]
    fn test_can_fetch_requires_selection_and_idle() {
        let mut s = SessionState::default();
        assert!(!s.can_fetch_discussion());
        s.selected_headline = "A".into();
        assert!(s.can_fetch_discussion());
        s.loading_summary = true;
        assert!(!s.can_fetch_discussion());
    }
}
