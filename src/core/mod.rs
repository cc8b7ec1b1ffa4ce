//! Core business logic - framework-agnostic panel operations.
//!
//! Nothing in here depends on poise or axum: the bot commands and the admin
//! API both call into these modules.

/// Guild settings and categories
pub mod guild;
/// Panel store operations
pub mod panel;
/// Posted panel message records
pub mod panel_message;
/// Rendering and posting panels
pub mod publish;
/// Panel message building
pub mod render;
/// Reconciling posted messages after updates and deletes
pub mod sync;
