//! Room-based chat backend.
//!
//! Clients hold one WebSocket connection per chat room; messages are
//! published to a durable broker queue, persisted, and fanned out to every
//! connected participant of the room by a per-room worker pool, without one
//! slow or failed recipient blocking delivery to the rest.

// layers
pub mod config;
pub mod domain;
pub mod engine;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
