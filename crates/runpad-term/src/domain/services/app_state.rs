use anyhow::Result;
use tui_textarea::Input;
use tui_textarea::Key;
use tui_textarea::TextArea;

use crate::domain::models::Preferences;
use crate::domain::models::PreferenceStoreBox;
use crate::domain::models::RunJob;
use crate::domain::models::RunOutcome;
use crate::domain::models::RunnerClientBox;
use crate::domain::models::Theme;
use crate::domain::models::DEFAULT_SOURCE;
use crate::domain::models::DEFAULT_STDIN;
use crate::domain::models::FONT_SIZE_MAX;
use crate::domain::models::FONT_SIZE_MIN;
use crate::domain::models::FONT_SIZE_STEP;
use crate::domain::models::RUNNING_MESSAGE;
use crate::domain::models::SOURCE_PLACEHOLDER;
use crate::domain::models::STDIN_PLACEHOLDER;
use crate::domain::models::TAB_SPACES;

#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

/// Which pane currently receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Stdin,
    Output,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Stdin,
            FocusedPane::Stdin => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Source,
        }
    }
}

pub struct AppStateProps {
    pub runner_client: RunnerClientBox,
    pub preferences: PreferenceStoreBox,
}

pub struct AppState<'a> {
    pub source_editor: TextArea<'a>,
    pub stdin_editor: TextArea<'a>,
    pub output: String,
    pub output_scroll: u16,
    pub last_run_failed: bool,
    pub waiting_for_runner: bool,
    pub confirm_reset: bool,
    pub focused_pane: FocusedPane,
    pub theme: Theme,
    pub font_size: u16,
    preferences: PreferenceStoreBox,
}

impl<'a> AppState<'a> {
    pub async fn new(props: AppStateProps) -> Result<AppState<'a>> {
        let preferences = match props.preferences.load().await {
            Ok(preferences) => preferences,
            Err(err) => {
                tracing::warn!(error = ?err, "failed to load preferences, using defaults");
                Preferences::default()
            }
        };

        let mut app_state = AppState {
            source_editor: build_source_editor(),
            stdin_editor: build_stdin_editor(),
            output: String::new(),
            output_scroll: 0,
            last_run_failed: false,
            waiting_for_runner: false,
            confirm_reset: false,
            focused_pane: FocusedPane::Source,
            theme: preferences.theme,
            font_size: preferences.font_size,
            preferences: props.preferences,
        };

        let runner_name = props.runner_client.name();
        if let Err(err) = props.runner_client.health_check().await {
            app_state.last_run_failed = true;
            app_state.output = format!(
                "The {runner_name} runner isn't reachable, so nothing can be executed yet. Make sure the server is running.\n\nError: {err}"
            );
        }

        Ok(app_state)
    }

    /// Starts an exchange with the runner. Returns `None` while a previous
    /// exchange is still outstanding, which is what keeps at most one request
    /// in flight.
    pub fn begin_run(&mut self) -> Option<RunJob> {
        if self.waiting_for_runner {
            return None;
        }

        self.waiting_for_runner = true;
        self.last_run_failed = false;
        self.output = RUNNING_MESSAGE.to_string();
        self.output_scroll = 0;

        return Some(RunJob {
            code: self.source_text(),
            input: self.stdin_text(),
        });
    }

    /// Settles the exchange. Runs unconditionally on success and failure, so
    /// the run trigger is always re-enabled afterwards.
    pub fn finish_run(&mut self, outcome: RunOutcome) {
        self.output = outcome.text;
        self.last_run_failed = outcome.failure;
        self.waiting_for_runner = false;
        self.output_scroll = 0;
    }

    pub fn source_text(&self) -> String {
        return self.source_editor.lines().join("\n");
    }

    pub fn stdin_text(&self) -> String {
        return self.stdin_editor.lines().join("\n");
    }

    pub async fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        self.persist_preferences().await;
    }

    pub async fn font_larger(&mut self) {
        let next = (self.font_size + FONT_SIZE_STEP).min(FONT_SIZE_MAX);
        if next != self.font_size {
            self.font_size = next;
            self.persist_preferences().await;
        }
    }

    pub async fn font_smaller(&mut self) {
        let next = self.font_size.saturating_sub(FONT_SIZE_STEP).max(FONT_SIZE_MIN);
        if next != self.font_size {
            self.font_size = next;
            self.persist_preferences().await;
        }
    }

    pub fn request_reset(&mut self) {
        self.confirm_reset = true;
    }

    /// Closes the confirm modal. Accepting replaces the source buffer
    /// wholesale with the default program; declining leaves it untouched.
    pub fn resolve_reset(&mut self, accepted: bool) {
        self.confirm_reset = false;
        if accepted {
            self.source_editor = build_source_editor();
        }
    }

    /// Tab inside the source pane replaces the current selection with four
    /// literal spaces and leaves the caret right after them. Everywhere else
    /// Tab keeps its focus-navigation meaning.
    pub fn insert_tab(&mut self) {
        match self.focused_pane {
            FocusedPane::Source => {
                self.source_editor.cut();
                self.source_editor.insert_str(TAB_SPACES);
            }
            _ => self.focus_next(),
        }
    }

    pub fn focus_next(&mut self) {
        self.focused_pane = self.focused_pane.next();
    }

    pub fn handle_editor_input(&mut self, input: Input) {
        match self.focused_pane {
            FocusedPane::Source => {
                self.source_editor.input(input);
            }
            FocusedPane::Stdin => {
                self.stdin_editor.input(input);
            }
            FocusedPane::Output => match input.key {
                Key::Up => self.scroll_output_up(1),
                Key::Down => self.scroll_output_down(1),
                Key::PageUp => self.scroll_output_up(10),
                Key::PageDown => self.scroll_output_down(10),
                _ => {}
            },
        }
    }

    pub fn handle_paste(&mut self, text: String) {
        let text = text.replace('\r', "\n");
        match self.focused_pane {
            FocusedPane::Source => {
                self.source_editor.insert_str(&text);
            }
            FocusedPane::Stdin => {
                self.stdin_editor.insert_str(&text);
            }
            FocusedPane::Output => {}
        }
    }

    pub fn scroll_output_up(&mut self, lines: u16) {
        self.output_scroll = self.output_scroll.saturating_sub(lines);
    }

    pub fn scroll_output_down(&mut self, lines: u16) {
        self.output_scroll = self.output_scroll.saturating_add(lines);
    }

    async fn persist_preferences(&self) {
        let preferences = Preferences {
            theme: self.theme,
            font_size: self.font_size,
        };

        // Storage failures are logged, never fatal to the UI.
        if let Err(err) = self.preferences.save(&preferences).await {
            tracing::warn!(error = ?err, "failed to persist preferences");
        }
    }
}

fn build_source_editor<'a>() -> TextArea<'a> {
    let mut editor = TextArea::from(DEFAULT_SOURCE.lines());
    editor.set_placeholder_text(SOURCE_PLACEHOLDER);
    return editor;
}

fn build_stdin_editor<'a>() -> TextArea<'a> {
    let mut editor = TextArea::from(DEFAULT_STDIN.lines());
    editor.set_placeholder_text(STDIN_PLACEHOLDER);
    return editor;
}
