//! Style sheet model consumed by the document backend
//!
//! The host hands over one [`StyleSheet`] per document. Paragraph styles
//! are resolved into LaTeX font fragments once at `open()`; cell and table
//! styles are looked up whenever a cell or table starts.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::utils::error::{DocGenError, DocGenResult, StyleKind};

/// Font family class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFace {
    #[default]
    Serif,
    SansSerif,
}

/// Font attributes of a paragraph style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontStyle {
    pub face: FontFace,
    /// Size in points
    pub size: f64,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Default for FontStyle {
    fn default() -> Self {
        Self {
            face: FontFace::Serif,
            size: 12.0,
            bold: false,
            italic: false,
            underline: false,
        }
    }
}

/// Horizontal paragraph alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Left,
    Right,
    Center,
    Justify,
}

/// A named paragraph style
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParagraphStyle {
    pub font: FontStyle,
    pub alignment: Alignment,
    /// Left margin in cm, typeset as multiples of `\grbaseindent`
    pub left_margin: f64,
    /// First line indent in cm, relative to the left margin
    pub first_indent: f64,
    /// Heading level, 0 for body text
    pub header_level: u8,
}

impl ParagraphStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font(mut self, font: FontStyle) -> Self {
        self.font = font;
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_indents(mut self, left_margin: f64, first_indent: f64) -> Self {
        self.left_margin = left_margin;
        self.first_indent = first_indent;
        self
    }

    pub fn with_header_level(mut self, level: u8) -> Self {
        self.header_level = level;
        self
    }
}

/// Borders drawn around a table cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CellStyle {
    pub left_border: bool,
    pub right_border: bool,
    pub top_border: bool,
    pub bottom_border: bool,
}

impl CellStyle {
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn boxed() -> Self {
        Self {
            left_border: true,
            right_border: true,
            top_border: true,
            bottom_border: true,
        }
    }
}

/// Table layout known before any cell arrives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStyle {
    /// Number of physical columns
    pub columns: usize,
}

impl TableStyle {
    pub fn with_columns(columns: usize) -> Self {
        Self { columns }
    }
}

/// All styles of one document, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSheet {
    pub paragraph_styles: IndexMap<String, ParagraphStyle>,
    pub cell_styles: IndexMap<String, CellStyle>,
    pub table_styles: IndexMap<String, TableStyle>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_paragraph_style(&mut self, name: impl Into<String>, style: ParagraphStyle) {
        self.paragraph_styles.insert(name.into(), style);
    }

    pub fn add_cell_style(&mut self, name: impl Into<String>, style: CellStyle) {
        self.cell_styles.insert(name.into(), style);
    }

    pub fn add_table_style(&mut self, name: impl Into<String>, style: TableStyle) {
        self.table_styles.insert(name.into(), style);
    }

    pub fn paragraph_style(&self, name: &str) -> DocGenResult<&ParagraphStyle> {
        self.paragraph_styles
            .get(name)
            .ok_or_else(|| DocGenError::unknown_style(StyleKind::Paragraph, name))
    }

    pub fn cell_style(&self, name: &str) -> DocGenResult<&CellStyle> {
        self.cell_styles
            .get(name)
            .ok_or_else(|| DocGenError::unknown_style(StyleKind::Cell, name))
    }

    pub fn table_style(&self, name: &str) -> DocGenResult<&TableStyle> {
        self.table_styles
            .get(name)
            .ok_or_else(|| DocGenError::unknown_style(StyleKind::Table, name))
    }

    pub fn paragraph_style_names(&self) -> impl Iterator<Item = &str> {
        self.paragraph_styles.keys().map(String::as_str)
    }
}
