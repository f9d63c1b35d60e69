//! Table engine for long, page-breaking tables
//!
//! Tables are buffered whole, then written as a `longtable` preceded by
//! TeX code that computes every column width at compile time.
//!
//! # Architecture
//!
//! ```text
//! TableEvent -> TableRouter (buffer, repack) -> negotiate -> Instruction* + rows
//! ```
//!
//! Columns are named by letters `a`..`z`, so a table holds at most 26
//! columns. [`simulate`] evaluates the generated width code offline.
//!
//! # Example
//!
//! ```ignore
//! let mut router = TableRouter::new();
//! let mut tex = router.handle(TableEvent::TableBegin { head: "\\begin{longtable}[l]{*{1}{l}}\n", columns: 1 })?;
//! router.handle(TableEvent::RowBegin)?;
//! router.handle(TableEvent::CellBegin { head: "\\multicolumn{1}{l}", span: 1 })?;
//! router.handle(TableEvent::CellText("Name"))?;
//! router.handle(TableEvent::CellEnd)?;
//! router.handle(TableEvent::RowEnd { terminator: "\\\\ ", decoration: "%\n" })?;
//! tex += &router.handle(TableEvent::TableEnd { tail: "\\end{longtable}\n", head_rule: false })?;
//! ```

mod cell;
mod counter;
mod router;
mod rows;
mod simulate;
mod widths;

#[cfg(test)]
mod tests;

// Re-export public API
pub use cell::{get_charform, get_numform, ColumnId, TabCell, TabMem, TabRow};
pub use counter::SpanCounter;
pub use router::{TableEvent, TableRouter};
pub use rows::{complete_row, render_table, splitting_row};
pub use simulate::{monospace, simulate, ColumnWidths, NegotiationOutcome, PageMetrics};
pub use widths::{negotiate, render_instructions, Instruction};
