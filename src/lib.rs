//! # Timetable Bot
//!
//! A Telegram bot that remembers which university group a user belongs to and
//! shows that group's timetable for the current day.
//!
//! ## Features
//! - Per-user registration against a group from a static catalog
//! - Timetable fetching from a remote provider with an on-disk cache per group
//! - Odd/even week selection driven by the provider's week counter
//! - Operator-only broadcast of a message to every registered user

/// Bot dialogue states, command handlers, and message processing
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// Database models, connections, and migrations
pub mod database;
/// Domain error kinds recovered at the conversation-handler boundary
pub mod error;
/// Side services: health endpoint and broadcast fan-out
pub mod services;
/// Group catalog, timetable cache, and day rendering
pub mod timetable;
/// Utility functions for validation and HTML escaping
pub mod utils;
