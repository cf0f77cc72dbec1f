//! CLI subcommands.

pub mod cart;
pub mod theme;

/// How command output is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable lines
    Text,
    /// A single JSON document
    Json,
}
