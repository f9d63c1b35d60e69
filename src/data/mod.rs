//! Data layer - Static mappings and constants
//!
//! This module contains all static data used for LaTeX generation:
//! - Escape mappings for reserved characters
//! - Font size tables and table limits
//! - The preamble with the table width macros

pub mod constants;
pub mod escapes;
pub mod preamble;

// Re-export commonly used items
pub use constants::{
    FONT_NAMES, FONT_SIZES, MAX_TABLE_COLUMNS, PICTURE_MACRO, SEPARATION_PAT, SPAN_COUNTER_WIDTH,
};
pub use escapes::{is_reserved, LATEX_ESCAPES, UNSUPPORTED_GLYPHS};
pub use preamble::{DOCUMENT_END, LATEX_TEMPLATE};
