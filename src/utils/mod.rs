//! Utils module - Shared utilities and helpers

/// Parsing of CLI filter and order arguments
pub mod input;

/// Verbose output for the binary
pub mod logging;

/// Text width handling for table cells
pub mod text;

/// Input validation
pub mod validation;
