//! Core document modules
//!
//! This module contains the document model and its LaTeX backend:
//! - `textdoc`: the format-independent document capability
//! - `styles` and `paper`: style sheet and page setup handed over by the host
//! - `latexdoc`: LaTeX implementation with the longtable width engine

pub mod latexdoc;
pub mod paper;
pub mod styles;
pub mod textdoc;

// Re-export main types
pub use latexdoc::context::{LatexDocOptions, TexFont};
pub use latexdoc::markup::{
    add_markup_from_styled, NoteFormat, StyledText, StyledTextTag, StyledTextTagType,
};
pub use latexdoc::LatexDoc;
pub use paper::{Orientation, PaperSize, PaperStyle};
pub use styles::{Alignment, CellStyle, FontFace, FontStyle, ParagraphStyle, StyleSheet, TableStyle};
pub use textdoc::{MediaPlacement, TextDoc};
