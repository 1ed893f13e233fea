//! Configuration management for the terminal editor.
//!
//! This module provides centralized configuration handling for the runner
//! endpoint, timeouts, and the startup theme.

mod config;

pub use config::*;
