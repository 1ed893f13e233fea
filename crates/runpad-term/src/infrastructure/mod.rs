//! Infrastructure layer providing external integrations.
//!
//! This module contains implementations for external system integrations:
//! the HTTP runner client and the on-disk preference store.

pub mod clients;
pub mod stores;
