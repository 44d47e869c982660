//! Loom argument classification.
//!
//! `parser` holds the classifier (`classify`, `parse`) and the param type
//! catalogue; `utils` holds the leveled logger shared with the CLI.

pub mod parser;
pub mod utils;
