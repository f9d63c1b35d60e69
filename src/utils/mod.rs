//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Error types and result types
//! - Output targets for finished documents

pub mod error;
pub mod files;

// Re-export commonly used items
pub use error::{DocGenError, DocGenResult, DocWarning, StyleKind};
pub use files::{tex_filename, OutputTarget};
