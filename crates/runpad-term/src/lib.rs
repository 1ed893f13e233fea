//! Terminal editor for submitting programs to a remote execution runner.
//!
//! This crate provides a small source editor, a stdin pane, and an output
//! pane; compilation and execution are delegated entirely to an external
//! runner service reachable over HTTP. The client edits text, performs one
//! JSON exchange per run, and renders the captured output.

pub mod application;
pub mod configuration;
pub mod domain;
pub mod infrastructure;
pub use application::ui::{destruct_terminal_for_panic, start_loop};
pub use configuration::{Config, ConfigKey};
pub use domain::models::{
    Action, Event, Preferences, PreferenceStore, RunJob, RunOutcome, RunnerClient, Theme,
};
pub use domain::services::{AppState, AppStateProps};
pub use infrastructure::clients::RunnerManager;
