//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// General utility commands
pub mod general;

/// Panel commands
pub mod panel;

// Export commands
pub use general::*;
pub use panel::*;
