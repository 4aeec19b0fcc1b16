//! FILENAME: app/src/commands/mod.rs
// PURPOSE: Exposes all command modules to the rest of the app.

pub mod functions;
pub mod history;
pub mod logic;
pub mod sets;

// Re-export commands so they are accessible via crate::commands::*
pub use functions::*;
pub use history::*;
pub use logic::*;
pub use sets::*;
