//! Implements InputPort. Inquire-based interactive prompts.
//!
//! Menu loop: enter city -> select headline -> fetch discussion -> show report.
//! Prompts block, so they run on the blocking pool while debounce timers and requests keep
//! running on the runtime.

use crate::adapters::ui::notifier::TerminalNotifier;
use crate::adapters::ui::render;
use crate::domain::{DomainError, SessionState};
use crate::ports::InputPort;
use crate::usecases::{DiscussionSession, FetchOutcome};
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use inquire::autocompletion::{Autocomplete, Replacement};
use inquire::{CustomUserError, InquireError, Select, Text};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    EnterCity,
    SelectHeadline,
    FetchDiscussion,
    ShowReport,
    Quit,
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuAction::EnterCity => "Enter city",
            MenuAction::SelectHeadline => "Select headline",
            MenuAction::FetchDiscussion => "Continue: fetch Reddit discussion",
            MenuAction::ShowReport => "Show discussion report",
            MenuAction::Quit => "Quit",
        };
        f.write_str(label)
    }
}

/// Actions offered for the given state. Fetch is offered only when the session would accept it.
fn available_actions(state: &SessionState) -> Vec<MenuAction> {
    let mut actions = vec![MenuAction::EnterCity];
    if !state.headlines.is_empty() {
        actions.push(MenuAction::SelectHeadline);
    }
    if state.can_fetch_discussion() {
        actions.push(MenuAction::FetchDiscussion);
    }
    if state.discussion.is_some() {
        actions.push(MenuAction::ShowReport);
    }
    actions.push(MenuAction::Quit);
    actions
}

/// Feeds every keystroke of the city prompt into the session and previews the headlines of the
/// latest completed lookup as suggestions.
#[derive(Clone)]
struct CityAutocomplete {
    session: DiscussionSession,
    last_input: Option<String>,
}

impl Autocomplete for CityAutocomplete {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, CustomUserError> {
        if self.last_input.as_deref() != Some(input) {
            self.session.set_city(input);
            self.last_input = Some(input.to_string());
        }
        Ok(self.session.state().headlines)
    }

    fn get_completion(
        &mut self,
        _input: &str,
        _highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, CustomUserError> {
        Ok(None)
    }
}

/// Run a blocking inquire prompt off the runtime. `Ok(None)` when the user cancelled (Esc/Ctrl-C).
async fn blocking_prompt<T, F>(prompt: F) -> Result<Option<T>, DomainError>
where
    F: FnOnce() -> Result<T, InquireError> + Send + 'static,
    T: Send + 'static,
{
    let answer = tokio::task::spawn_blocking(prompt)
        .await
        .map_err(|e| DomainError::Input(format!("prompt task failed: {}", e)))?;
    match answer {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(DomainError::Input(e.to_string())),
    }
}

fn spinner(message: impl Into<Cow<'static, str>>) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    session: DiscussionSession,
    notifier: Arc<TerminalNotifier>,
}

impl TuiInputPort {
    pub fn new(session: DiscussionSession, notifier: Arc<TerminalNotifier>) -> Self {
        Self { session, notifier }
    }

    /// Prompt with notifications held back until the prompt has released the terminal.
    async fn prompt<T, F>(&self, prompt: F) -> Result<Option<T>, DomainError>
    where
        F: FnOnce() -> Result<T, InquireError> + Send + 'static,
        T: Send + 'static,
    {
        self.notifier.hold();
        let answer = blocking_prompt(prompt).await;
        self.notifier.release();
        answer
    }

    /// Spinner that follows the session status line until the lookup has settled.
    async fn wait_for_headlines(&self) {
        let mut rx = self.session.subscribe();
        let bar = spinner(render::status_line(&rx.borrow_and_update()));
        let settled = self.session.settled();
        tokio::pin!(settled);
        loop {
            tokio::select! {
                _ = &mut settled => break,
                changed = rx.changed() => {
                    if changed.is_err() {
                        (&mut settled).await;
                        break;
                    }
                    let line = render::status_line(&rx.borrow_and_update());
                    bar.set_message(line);
                }
            }
        }
        bar.finish_and_clear();
    }

    async fn enter_city(&self) -> Result<(), DomainError> {
        let current = self.session.state().city;
        let autocomplete = CityAutocomplete {
            session: self.session.clone(),
            last_input: Some(current.clone()),
        };
        let answer = self
            .prompt(move || {
                Text::new("Enter city:")
                    .with_initial_value(&current)
                    .with_autocomplete(autocomplete)
                    .with_help_message("headlines refresh shortly after you stop typing")
                    .prompt()
            })
            .await?;
        let Some(answer) = answer else {
            return Ok(());
        };

        // A highlighted suggestion submits the headline itself.
        if self.session.state().headlines.contains(&answer) {
            return self.session.set_selected_headline(answer);
        }

        if self.session.state().city != answer {
            self.session.set_city(answer);
        }
        self.wait_for_headlines().await;
        print!("{}", render::headlines(&self.session.state()));
        Ok(())
    }

    async fn select_headline(&self) -> Result<(), DomainError> {
        let state = self.session.state();
        let start = state
            .headlines
            .iter()
            .position(|h| *h == state.selected_headline)
            .unwrap_or(0);
        let headlines = state.headlines;
        let answer = self
            .prompt(move || {
                Select::new("Select headline:", headlines)
                    .with_starting_cursor(start)
                    .prompt()
            })
            .await?;
        if let Some(headline) = answer {
            if let Err(e) = self.session.set_selected_headline(headline) {
                // List was refreshed while the prompt was open.
                warn!(error = %e, "selection rejected");
            }
        }
        Ok(())
    }

    async fn fetch_discussion(&self) {
        let bar = spinner("Fetching Reddit discussion and summary...");
        let outcome = self.session.fetch_discussion().await;
        bar.finish_and_clear();
        match outcome {
            FetchOutcome::Applied => self.show_report(),
            FetchOutcome::Failed => {}
            FetchOutcome::Discarded => println!("Selection changed while fetching; result dropped."),
            FetchOutcome::Ignored => println!("Select a headline first."),
        }
    }

    fn show_report(&self) {
        match render::report(&self.session.state()) {
            Some(report) => println!("\n{}", report),
            None => println!("No discussion fetched yet."),
        }
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let state = self.session.state();
            println!("\n{}", render::status_line(&state));
            if !state.selected_headline.is_empty() {
                println!("Selected: {}", state.selected_headline);
            }

            let actions = available_actions(&state);
            let action = self
                .prompt(move || Select::new("What next?", actions).prompt())
                .await?;
            match action.unwrap_or(MenuAction::Quit) {
                MenuAction::EnterCity => self.enter_city().await?,
                MenuAction::SelectHeadline => self.select_headline().await?,
                MenuAction::FetchDiscussion => self.fetch_discussion().await,
                MenuAction::ShowReport => self.show_report(),
                MenuAction::Quit => return Ok(()),
            }
        }
    }
}
