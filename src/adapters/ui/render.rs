//! Pure rendering of session state into terminal text. No I/O here; the TUI prints the result.

use crate::domain::{Comment, SessionState, SummaryResult};
use std::fmt::Write;

/// One line describing where the session is: city, headline count, loading flags.
pub fn status_line(state: &SessionState) -> String {
    let city = if state.city.is_empty() {
        "(none)"
    } else {
        state.city.as_str()
    };
    let mut line = format!("City: {} | Headlines: {}", city, state.headlines.len());
    if state.loading_headlines {
        line.push_str(" | loading headlines...");
    }
    if state.loading_summary {
        line.push_str(" | loading summary...");
    }
    line
}

/// Numbered headline list, `>` marking the selected one.
pub fn headlines(state: &SessionState) -> String {
    if state.headlines.is_empty() {
        return "No headlines.\n".to_string();
    }
    let mut out = String::new();
    for (i, headline) in state.headlines.iter().enumerate() {
        let marker = if *headline == state.selected_headline {
            '>'
        } else {
            ' '
        };
        let _ = writeln!(out, "{} {}. {}", marker, i + 1, headline);
    }
    out
}

fn comment(out: &mut String, c: &Comment) {
    let _ = writeln!(out, "{}", c.subreddit);
    let _ = writeln!(out, "  {}", c.post_title);
    for line in c.display_body().lines() {
        let _ = writeln!(out, "    {}", line);
    }
    let _ = writeln!(
        out,
        "  {} days ago · {} · ♥ {}",
        c.post_age_days, c.author, c.score
    );
}

/// "Reddit Discussion on the selected News" block.
pub fn discussion(comments: &[Comment]) -> String {
    let mut out = String::from("Reddit Discussion on the selected News\n\n");
    if comments.is_empty() {
        out.push_str("No comments found.\n");
        return out;
    }
    for c in comments {
        comment(&mut out, c);
        out.push('\n');
    }
    out
}

/// Summary card: Summary, Sentiment, Actionable Needs (one bullet per line).
pub fn summary_card(summary: &SummaryResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Summary\n  {}\n", summary.summary);
    let _ = writeln!(out, "Sentiment\n  {}\n", summary.sentiment);
    out.push_str("Actionable Needs\n");
    for item in summary.actionable_items() {
        let _ = writeln!(out, "  • {}", item);
    }
    out
}

/// Full report for the current discussion, or `None` before the first successful fetch.
pub fn report(state: &SessionState) -> Option<String> {
    let d = state.discussion.as_ref()?;
    Some(format!(
        "{}\n{}",
        discussion(&d.comments),
        summary_card(&d.summary)
    ))
}
