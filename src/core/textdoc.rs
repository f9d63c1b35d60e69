//! Text document capability
//!
//! The calls a report generator makes to lay out a document, independent
//! of the output format. [`LatexDoc`](crate::core::latexdoc::LatexDoc) is
//! the LaTeX implementation.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::latexdoc::markup::{NoteFormat, StyledText};
use crate::utils::error::DocGenResult;
use crate::utils::files::OutputTarget;

/// Where a picture goes relative to the text around it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaPlacement {
    Left,
    #[default]
    Right,
    Single,
    Row,
}

/// Format-independent document writer
///
/// Calls must be well nested: paragraphs inside cells or at top level,
/// cells inside rows, rows inside tables.
pub trait TextDoc {
    fn open(&mut self, target: OutputTarget) -> DocGenResult<()>;
    fn close(&mut self) -> DocGenResult<()>;

    fn page_break(&mut self) -> DocGenResult<()>;
    fn end_page(&mut self) -> DocGenResult<()>;

    /// Start a paragraph; a `leader` label is hung in front of it
    fn start_paragraph(&mut self, style_name: &str, leader: Option<&str>) -> DocGenResult<()>;
    fn end_paragraph(&mut self) -> DocGenResult<()>;

    fn start_bold(&mut self) -> DocGenResult<()>;
    fn end_bold(&mut self) -> DocGenResult<()>;
    fn start_superscript(&mut self) -> DocGenResult<()>;
    fn end_superscript(&mut self) -> DocGenResult<()>;

    fn start_table(&mut self, name: &str, style_name: &str) -> DocGenResult<()>;
    fn end_table(&mut self) -> DocGenResult<()>;
    fn start_row(&mut self) -> DocGenResult<()>;
    fn end_row(&mut self) -> DocGenResult<()>;
    fn start_cell(&mut self, style_name: &str, span: usize) -> DocGenResult<()>;
    fn end_cell(&mut self) -> DocGenResult<()>;

    /// Write running text; reserved characters are escaped
    fn write_text(&mut self, text: &str) -> DocGenResult<()>;

    /// Write a note, one paragraph per blank-line separated block
    fn write_styled_note(
        &mut self,
        note: &StyledText,
        format: NoteFormat,
        style_name: &str,
        contains_html: bool,
    ) -> DocGenResult<()>;

    /// Place a picture next to the following text; `width` and `height`
    /// are in base indents
    fn add_media(
        &mut self,
        path: &Path,
        placement: MediaPlacement,
        width: f64,
        height: f64,
        caption: &str,
    ) -> DocGenResult<()>;
}
