//! Telegram front end for RateBot
//!
//! ```text
//! telegram/
//! ├── mod.rs           # public API
//! ├── bot.rs           # bot creation and token validation
//! ├── commands.rs      # command parsing and handlers
//! ├── formatters.rs    # amount formatting for replies
//! └── polling.rs       # update polling and dispatch
//! ```
//!
//! The price cache is injected into command handlers through the
//! dispatcher's dependency map; this module holds no price state of its own.

pub mod bot;
pub mod commands;
pub mod formatters;
pub mod polling;

pub use commands::Command;
