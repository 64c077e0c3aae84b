//! Subcommand implementations.

/// Chat mode command handler.
pub mod chat;

/// Settings listing command handlers.
pub mod list;

/// One-shot translation command handler.
pub mod translate;
