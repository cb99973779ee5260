//! Shared utilities for the Hiroma chat backend.
//!
//! Cross-cutting helpers used by the server binary and its tests:
//! timestamp generation and logging setup.

pub mod logger;
pub mod time;
