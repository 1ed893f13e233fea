//! Core domain logic for the terminal editor.
//!
//! This module contains the business logic and data models that drive the
//! terminal UI, independent of specific implementation details or external
//! dependencies.

pub mod models;
pub mod services;
