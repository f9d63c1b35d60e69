//! Rendering of negotiated tables
//!
//! The first row is written three times: as the page-break row that
//! closes a page (`\endfoot`) and opens the next (`\endhead`), and as
//! the real first row (`\endfirsthead`). Every cell is a `\parbox` of its
//! negotiated width.

use super::cell::{ColumnId, TabCell, TabMem, TabRow};
use crate::data::constants::{CELL_LINE_BREAK, COLUMN_SEPARATOR, SEPARATION_PAT};
use crate::utils::error::DocGenResult;

/// Raise of the vertical dots in the row repeated at the top of a page
const HEAD_RAISE: &str = "+2ex";
/// Raise of the vertical dots in the row closing a page
const FOOT_RAISE: &str = "-2ex";

/// Width register of a cell: its column, or its span for multicolumn cells
fn cell_width(cell: &TabCell) -> String {
    match &cell.span_id {
        Some(id) if cell.span > 1 => format!("\\grspanwidth{}", id),
        _ => format!("\\grtempwidth{}", cell.column),
    }
}

/// Row shown at a page break, with vertical dots in each cell
///
/// The cell ending in the last column gets a second set of dots at its
/// right edge.
pub fn splitting_row(row: &TabRow, columns: usize, raise: &str) -> String {
    let cells: Vec<&TabCell> = row.visible_cells().collect();
    let last = cells.len().saturating_sub(1);
    let parts: Vec<String> = cells
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let dots = if i == last && cell.column.index() + 1 == columns {
                "\\graddvdots"
            } else {
                "\\grempty"
            };
            format!(
                "\\grtabpgbreak{{{}}}{{{}}}{{{}}}{{{}}}%\n",
                cell.head,
                cell_width(cell),
                dots,
                raise
            )
        })
        .collect();
    format!("{}%\n{}", parts.join(COLUMN_SEPARATOR), row.tail)
}

/// Row with its cell contents
pub fn complete_row(row: &TabRow) -> String {
    let parts: Vec<String> = row
        .visible_cells()
        .map(|cell| {
            format!(
                "\\grcolpart{{%\n  {}}}{{%\n {}}}{{%\n  {}%\n}}%\n",
                cell.head,
                cell_width(cell),
                cell.content.replace(SEPARATION_PAT, CELL_LINE_BREAK)
            )
        })
        .collect();
    format!("{}%\n{}{}", parts.join(COLUMN_SEPARATOR), row.tail, row.addit)
}

/// Whole `longtable` block, written after the width computation
///
/// `picture` is a picture macro set beside the table. `head_rule` draws a
/// rule under the first row on the first page.
pub fn render_table(table: &TabMem, picture: Option<&str>, head_rule: bool) -> DocGenResult<String> {
    let mut out = String::new();
    out.push_str("%\n");
    out.push_str(picture.unwrap_or(""));
    out.push_str("%\n%\n");

    out.push_str("%  ==> Comment out one of the two lines by a leading \"%\" (first position)\n");
    out.push_str("{ \\RaggedRight%      left align with hyphenation in table \n");
    out.push_str("%{%                no left align in table \n%\n");
    out.push_str(&format!(
        "%  ==>  You may add pos or neg values to the following {} column widths %\n",
        table.columns
    ));
    for column in ColumnId::first(table.columns)? {
        out.push_str(&format!("\\addtolength{{\\grtempwidth{}}}{{+0.0cm}}%\n", column));
    }
    out.push_str("%  === %\n");

    if picture.is_some() {
        out.push_str("%\n\\vspace{\\grtabprepos}%\n\\setlength{\\grtabprepos}{0ex}%\n");
    }

    out.push_str(&table.head);

    if let Some((first, rest)) = table.rows.split_first() {
        out.push_str(&splitting_row(first, table.columns, HEAD_RAISE));
        out.push_str("\\endhead%\n");
        out.push_str(&splitting_row(first, table.columns, FOOT_RAISE));
        out.push_str("\\endfoot%\n");
        out.push_str(if head_rule { "\\hline%\n" } else { "%\n" });
        out.push_str(&complete_row(first));
        out.push_str("\\endfirsthead%\n");
        out.push_str("\\endlastfoot%\n");
        for row in rest {
            out.push_str(&complete_row(row));
        }
    }

    out.push_str(&table.tail);
    out.push_str("}%\n\n");
    Ok(out)
}
