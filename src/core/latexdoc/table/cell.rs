//! Cell, row and table buffers
//!
//! A table is buffered completely before any of it is written, because
//! the column widths depend on every cell.

use std::fmt;

use crate::data::constants::MAX_TABLE_COLUMNS;
use crate::utils::error::{DocGenError, DocGenResult};

/// Letter that names a table column in generated macro names
/// (`\grtempwidtha`, `\grcolbegb`, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnId(u8);

impl ColumnId {
    /// Column id for a zero-based column index
    pub fn from_index(index: usize) -> DocGenResult<Self> {
        if index >= MAX_TABLE_COLUMNS {
            return Err(DocGenError::too_many_columns(index + 1, MAX_TABLE_COLUMNS));
        }
        Ok(ColumnId(index as u8))
    }

    pub fn from_char(c: char) -> Option<Self> {
        if c.is_ascii_lowercase() {
            Some(ColumnId(c as u8 - b'a'))
        } else {
            None
        }
    }

    /// Ids for the first `count` columns
    pub fn first(count: usize) -> DocGenResult<Vec<Self>> {
        (0..count).map(ColumnId::from_index).collect()
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn as_char(self) -> char {
        (b'a' + self.0) as char
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Column letter for a zero-based column index
pub fn get_charform(index: usize) -> DocGenResult<char> {
    ColumnId::from_index(index).map(ColumnId::as_char)
}

/// Zero-based column index for a column letter
pub fn get_numform(c: char) -> usize {
    (c as usize).wrapping_sub('a' as usize)
}

/// One buffered table cell
#[derive(Debug, Clone, PartialEq)]
pub struct TabCell {
    /// Column the cell ends in; a span occupies the columns before it
    pub column: ColumnId,
    /// Physical columns covered; 0 marks a phantom
    pub span: usize,
    /// Column format, e.g. `\multicolumn{1}{|l|}`
    pub head: String,
    pub content: String,
    /// Name of the derived span width, set by negotiation for `span > 1`
    pub span_id: Option<String>,
}

impl TabCell {
    pub fn new(column: ColumnId, span: usize, head: impl Into<String>) -> Self {
        TabCell {
            column,
            span,
            head: head.into(),
            content: String::new(),
            span_id: None,
        }
    }

    /// Placeholder for a column consumed by a following multicolumn cell
    pub fn phantom(column: ColumnId) -> Self {
        Self::new(column, 0, "")
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn is_phantom(&self) -> bool {
        self.span == 0
    }

    /// First column covered by this cell
    pub fn first_column(&self) -> DocGenResult<ColumnId> {
        let first = (self.column.index() + 1).saturating_sub(self.span.max(1));
        ColumnId::from_index(first)
    }
}

/// One buffered table row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabRow {
    pub cells: Vec<TabCell>,
    /// Line end, normally `\\`
    pub tail: String,
    /// Rules after the line end: `\hline`, `\cline{..}` or nothing
    pub addit: String,
}

impl TabRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cells that are rendered, i.e. all but phantoms
    pub fn visible_cells(&self) -> impl Iterator<Item = &TabCell> {
        self.cells.iter().filter(|c| !c.is_phantom())
    }

    /// Columns covered by the visible cells
    pub fn covered_columns(&self) -> usize {
        self.visible_cells().map(|c| c.span).sum()
    }
}

/// A whole buffered table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabMem {
    /// Environment opening, e.g. `\begin{longtable}[l]{*{3}{l}}`
    pub head: String,
    /// Environment closing
    pub tail: String,
    pub rows: Vec<TabRow>,
    /// Declared column count; repack may lower it
    pub columns: usize,
}

impl TabMem {
    pub fn new(head: impl Into<String>, columns: usize) -> Self {
        TabMem {
            head: head.into(),
            tail: String::new(),
            rows: Vec::new(),
            columns,
        }
    }
}
