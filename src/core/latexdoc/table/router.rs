//! Table event state machine
//!
//! While a table is open, everything the document writes is routed here
//! as a [`TableEvent`] instead of going to the output. The router buffers
//! cells and rows, and on [`TableEvent::TableEnd`] hands back the whole
//! table with its width negotiation as one piece of TeX source.

use super::cell::{ColumnId, TabCell, TabMem, TabRow};
use super::rows::render_table;
use super::widths::{negotiate, render_instructions, Instruction};
use crate::core::latexdoc::utils::center_cell_format;
use crate::data::constants::{PICTURE_MACRO, SEPARATION_PAT};
use crate::utils::error::{DocGenError, DocGenResult};

/// What the document layer can tell the router
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TableEvent<'a> {
    TableBegin { head: &'a str, columns: usize },
    RowBegin,
    CellBegin { head: &'a str, span: usize },
    CellText(&'a str),
    CellEnd,
    RowEnd { terminator: &'a str, decoration: &'a str },
    TableEnd { tail: &'a str, head_rule: bool },
}

/// Picture anchored in the table being buffered
#[derive(Debug, Clone, Default)]
struct TablePicture {
    /// A picture went into a cell and repacking has not looked at it yet
    pending: bool,
    /// Width in base indents
    width: f64,
    /// Picture macro pulled out of the first row, written before the table
    extracted: Option<String>,
}

#[derive(Debug, Default)]
enum RouterState {
    #[default]
    Idle,
    Open(TabMem),
    /// A capacity error hit this table; swallow events until its end
    Aborted(String),
}

/// Buffers one table at a time
#[derive(Debug, Default)]
pub struct TableRouter {
    state: RouterState,
    row: Option<TabRow>,
    cell: Option<TabCell>,
    text: String,
    cursor: usize,
    multirow_cell: bool,
    picture: TablePicture,
}

impl TableRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, RouterState::Idle)
    }

    /// Table buffered so far, rows completed up to the last `RowEnd`
    pub fn buffered(&self) -> Option<&TabMem> {
        match &self.state {
            RouterState::Open(table) => Some(table),
            _ => None,
        }
    }

    /// The current row carries several paragraphs per cell and is split
    /// into one row per paragraph at its end
    pub fn enter_multirow_cell(&mut self) {
        self.multirow_cell = true;
    }

    /// A picture of `width` base indents is being written into the
    /// current cell
    pub fn anchor_picture(&mut self, width: f64) {
        self.picture.pending = true;
        self.picture.width = width;
    }

    /// Feed one event; returns the TeX source to write, often empty
    pub fn handle(&mut self, event: TableEvent<'_>) -> DocGenResult<String> {
        if let RouterState::Aborted(reason) = &self.state {
            return Ok(match event {
                TableEvent::TableEnd { .. } => {
                    let note = format!("%\n% *** table omitted: {}%\n", reason);
                    self.reset();
                    note
                }
                _ => String::new(),
            });
        }

        match self.route(event) {
            Ok(out) => Ok(out),
            Err(e) if e.is_capacity() => {
                log::error!("table aborted: {}", e);
                if matches!(event, TableEvent::TableEnd { .. }) {
                    self.reset();
                } else {
                    self.abort(e.to_string());
                }
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    fn route(&mut self, event: TableEvent<'_>) -> DocGenResult<String> {
        let mut out = String::new();
        match event {
            TableEvent::TableBegin { head, columns } => {
                if self.is_open() {
                    return Err(DocGenError::NestedTable);
                }
                self.reset();
                ColumnId::first(columns)?;
                log::debug!("table opened with {} columns", columns);
                out.push_str(&Instruction::InitTable { columns }.to_string());
                self.state = RouterState::Open(TabMem::new(head, columns));
            }
            TableEvent::RowBegin => {
                self.row = Some(TabRow::new());
                self.cursor = 0;
            }
            TableEvent::CellBegin { head, span } => {
                self.text.clear();
                let span = span.max(1);
                self.cursor += span;
                let column = ColumnId::from_index(self.cursor - 1)?;
                let row = self.row.get_or_insert_with(TabRow::new);
                for index in (self.cursor - span)..(self.cursor - 1) {
                    row.cells.push(TabCell::phantom(ColumnId::from_index(index)?));
                }
                self.cell = Some(TabCell::new(column, span, head));
            }
            TableEvent::CellText(text) => self.text.push_str(text),
            TableEvent::CellEnd => {
                if let Some(mut cell) = self.cell.take() {
                    cell.content = self.text.trim().to_string();
                    if cell.content.contains("\\centering") {
                        cell.content = cell.content.replace("\\centering", "");
                        cell.head = center_cell_format(&cell.head);
                    }
                    self.row.get_or_insert_with(TabRow::new).cells.push(cell);
                } else {
                    log::warn!("cell end without cell begin");
                }
                self.text.clear();
            }
            TableEvent::RowEnd {
                terminator,
                decoration,
            } => {
                let mut row = self.row.take().unwrap_or_default();
                row.tail = terminator.to_string();
                row.addit = decoration.to_string();
                self.text.clear();
                let RouterState::Open(table) = &mut self.state else {
                    log::warn!("row end outside of a table");
                    return Ok(out);
                };
                if self.multirow_cell {
                    self.multirow_cell = false;
                    let reduce = repack_row(row, table, &mut self.picture)?;
                    if let Some(instruction) = reduce {
                        out.push_str(&instruction.to_string());
                    }
                } else {
                    table.rows.push(row);
                }
            }
            TableEvent::TableEnd { tail, head_rule } => {
                let state = std::mem::take(&mut self.state);
                let picture = std::mem::take(&mut self.picture);
                self.reset();
                let RouterState::Open(mut table) = state else {
                    log::warn!("table end without table begin");
                    return Ok(out);
                };
                table.tail = tail.to_string();
                let instructions = negotiate(&mut table, picture.width)?;
                log::debug!(
                    "table closed: {} rows, {} columns, {} width instructions",
                    table.rows.len(),
                    table.columns,
                    instructions.len()
                );
                out.push_str(&render_instructions(&instructions));
                out.push_str(&render_table(&table, picture.extracted.as_deref(), head_rule)?);
            }
        }
        Ok(out)
    }

    fn abort(&mut self, reason: String) {
        self.reset();
        self.state = RouterState::Aborted(reason);
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Split a row whose cells hold several paragraphs into one row per
/// paragraph
///
/// Paragraph `i` of every cell lands in new row `i`; shorter cells are
/// padded with empty text. Cell formats are kept and only the last new
/// row keeps the row decoration. A picture leading the last used column
/// is pulled out and placed beside the table instead, which narrows the
/// table by one column and by the picture's width.
fn repack_row(
    mut row: TabRow,
    table: &mut TabMem,
    picture: &mut TablePicture,
) -> DocGenResult<Option<Instruction>> {
    if row.cells.last().is_some_and(|c| c.content.is_empty()) {
        row.cells.pop();
        table.columns = table.columns.min(row.cells.len());
    }

    let parts: Vec<Vec<String>> = row
        .cells
        .iter()
        .map(|cell| split_paragraphs(&cell.content))
        .collect();
    let height = parts.iter().map(Vec::len).max().unwrap_or(0).max(1);

    let mut used = table.columns.min(row.cells.len());
    let mut reduce = None;
    if picture.pending {
        picture.pending = false;
        let lead = used
            .checked_sub(1)
            .and_then(|last| parts.get(last))
            .and_then(|p| p.first())
            .filter(|text| text.starts_with(PICTURE_MACRO));
        if let Some(pict) = lead {
            picture.extracted = Some(pict.clone());
            used -= 1;
            table.columns -= 1;
            reduce = Some(Instruction::ReduceTableWidth {
                picture_width: picture.width,
            });
        }
    }

    for line in 0..height {
        let mut new_row = TabRow {
            cells: Vec::with_capacity(used),
            tail: row.tail.clone(),
            addit: String::new(),
        };
        for (index, cell) in row.cells.iter().take(used).enumerate() {
            let content = parts[index].get(line).cloned().unwrap_or_default();
            new_row.cells.push(TabCell {
                column: ColumnId::from_index(index)?,
                span: cell.span,
                head: cell.head.clone(),
                content,
                span_id: None,
            });
        }
        if line + 1 == height {
            new_row.addit = row.addit.clone();
        }
        table.rows.push(new_row);
    }

    Ok(reduce)
}

/// Paragraphs of a multi-paragraph cell
fn split_paragraphs(content: &str) -> Vec<String> {
    let mut bare = content;
    while let Some(rest) = bare.strip_prefix(SEPARATION_PAT) {
        bare = rest;
    }
    while let Some(rest) = bare.trim_end().strip_suffix(SEPARATION_PAT) {
        bare = rest;
    }
    bare.replace('\n', "")
        .split(SEPARATION_PAT)
        .map(|part| part.trim().to_string())
        .collect()
}
