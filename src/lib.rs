//! # genealtex
//!
//! LaTeX document generator backend for report-writing hosts.
//!
//! ## Features
//!
//! - **Text documents**: paragraphs, labelled lists, inline markup, styled notes
//! - **Long tables**: `longtable` output whose column widths are negotiated by
//!   TeX at compile time, with page-break rows and multicolumn cells
//! - **Pictures**: placed beside paragraphs or tables, converted to JPEG when needed
//! - **Replay**: recorded call scripts render to byte-identical output
//!
//! ## Usage Example
//!
//! ```rust
//! use genealtex::{
//!     CellStyle, LatexDoc, LatexDocOptions, PaperStyle, ParagraphStyle, StyleSheet, TableStyle,
//!     TextDoc,
//! };
//!
//! let mut styles = StyleSheet::new();
//! styles.add_paragraph_style("Normal", ParagraphStyle::new());
//! styles.add_cell_style("Cell", CellStyle::plain());
//! styles.add_table_style("Events", TableStyle::with_columns(2));
//!
//! let mut doc = LatexDoc::new(styles, PaperStyle::a4(), LatexDocOptions::fragment());
//! doc.open_in_memory().unwrap();
//! doc.start_table("events", "Events").unwrap();
//! doc.start_row().unwrap();
//! for text in ["Birth", "1850, Kent"] {
//!     doc.start_cell("Cell", 1).unwrap();
//!     doc.start_paragraph("Normal", None).unwrap();
//!     doc.write_text(text).unwrap();
//!     doc.end_paragraph().unwrap();
//!     doc.end_cell().unwrap();
//! }
//! doc.end_row().unwrap();
//! doc.end_table().unwrap();
//! doc.close().unwrap();
//!
//! assert!(doc.output().contains("\\begin{longtable}"));
//! assert!(doc.output().contains("\\grtempwidthb"));
//! ```

/// Core document modules
pub mod core;

/// Data layer - escapes, constants and the preamble
pub mod data;

/// Feature modules - picture conversion and replay
pub mod features;

/// Utility modules
pub mod utils;

// Re-export the document API
pub use core::latexdoc::table;
pub use core::{
    add_markup_from_styled, Alignment, CellStyle, FontFace, FontStyle, LatexDoc, LatexDocOptions,
    MediaPlacement, NoteFormat, Orientation, PaperSize, PaperStyle, ParagraphStyle, StyleSheet,
    StyledText, StyledTextTag, StyledTextTagType, TableStyle, TextDoc,
};

// Re-export data modules
pub use data::constants;
pub use data::preamble::{DOCUMENT_END, LATEX_TEMPLATE};

// Re-export feature modules
pub use features::images;
pub use features::replay::{DocCall, DocScript};

// Re-export utilities
pub use utils::error::{DocGenError, DocGenResult, DocWarning, StyleKind};
pub use utils::files::{self, OutputTarget};

/// Escape text for use in LaTeX running text
pub fn escape_latex(text: &str) -> String {
    crate::core::latexdoc::utils::escape_latex(text)
}

/// Render a JSON document script to LaTeX source
pub fn render_script(json: &str) -> DocGenResult<String> {
    DocScript::from_json(json)?.render()
}
