//! Column width negotiation
//!
//! The widths are computed by TeX itself, since only TeX knows how wide
//! a piece of text sets. This module decides *what* TeX has to compute:
//! it turns a buffered table into a sequence of [`Instruction`]s, each
//! rendered as one call to a width macro of the preamble.
//!
//! The passes, per column:
//!
//! 1. Collect the requirement of every cell; columns narrower than an
//!    equal share of the table are final.
//! 2. If all natural widths fit, keep them. Otherwise the widest columns
//!    and picture columns get a share of the width left over.
//! 3. Remaining narrower columns get half or a whole share.
//! 4. Anything still open gets a whole share.
//!
//! Every multicolumn cell finally gets a span width from the start of
//! its first column to the end of its last.

use std::fmt;

use super::cell::{ColumnId, TabMem};
use super::counter::SpanCounter;
use crate::core::latexdoc::utils::fmt_len;
use crate::data::constants::{PICTURE_MACRO, SEPARATION_PAT};
use crate::utils::error::DocGenResult;

/// One width macro call
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Reset all registers for a table of `columns` columns
    InitTable { columns: usize },
    /// Give up room for a picture set beside the table, in base indents
    ReduceTableWidth { picture_width: f64 },
    /// Measure one line of cell text
    MeasureText(String),
    /// Reserve room for a picture, in base indents
    MeasurePicture { width: f64 },
    /// The cell just measured sits in one column
    RequireFull,
    /// The cell just measured spans back to column `first`
    RequirePart { first: ColumnId },
    FirstFix(ColumnId),
    /// Split the width still free among the unresolved columns
    DivideLength,
    SecondFix(ColumnId),
    ThirdFix(ColumnId),
    FourthFix(ColumnId),
    /// Width of a multicolumn cell covering `first..=last`
    SpanWidth {
        id: String,
        first: ColumnId,
        last: ColumnId,
    },
}

impl Instruction {
    /// Pass number of a per-column fix instruction
    pub fn fix_pass(&self) -> Option<u8> {
        match self {
            Instruction::FirstFix(_) => Some(1),
            Instruction::SecondFix(_) => Some(2),
            Instruction::ThirdFix(_) => Some(3),
            Instruction::FourthFix(_) => Some(4),
            _ => None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::InitTable { columns } => write!(
                f,
                "\\grinittab{{\\textwidth}}{{{}}}",
                fmt_len(1.0 / (*columns).max(1) as f64)
            )?,
            Instruction::ReduceTableWidth { picture_width } => write!(
                f,
                "\\addtolength{{\\grtabwidth}}{{-{}\\grbaseindent -2\\tabcolsep}}",
                fmt_len(*picture_width)
            )?,
            Instruction::MeasureText(text) => write!(f, "\\grtextneedwidth{{{}}}", text)?,
            Instruction::MeasurePicture { width } => write!(
                f,
                "\\setlength{{\\grpictsize}}{{{}\\grbaseindent}}",
                fmt_len(*width)
            )?,
            Instruction::RequireFull => write!(f, "\\grsetreqfull")?,
            Instruction::RequirePart { first } => {
                write!(f, "\\grsetreqpart{{\\grcolbeg{}}}", first)?
            }
            Instruction::FirstFix(c) => write!(
                f,
                "\\grcolsfirstfix {{\\grcolbeg{c}}}{{\\grtempwidth{c}}}{{\\grfinalwidth{c}}}{{\\grpictreq{c}}}{{\\grtextreq{c}}}"
            )?,
            Instruction::DivideLength => write!(f, "\\grdividelength")?,
            Instruction::SecondFix(c) => write!(
                f,
                "\\grcolssecondfix {{\\grcolbeg{c}}}{{\\grtempwidth{c}}}{{\\grfinalwidth{c}}}{{\\grpictreq{c}}}"
            )?,
            Instruction::ThirdFix(c) => write!(
                f,
                "\\grcolsthirdfix {{\\grcolbeg{c}}}{{\\grtempwidth{c}}}{{\\grfinalwidth{c}}}"
            )?,
            Instruction::FourthFix(c) => write!(
                f,
                "\\grcolsfourthfix {{\\grcolbeg{c}}}{{\\grtempwidth{c}}}{{\\grfinalwidth{c}}}"
            )?,
            Instruction::SpanWidth { id, first, last } => write!(
                f,
                "\\grgetspanwidth{{\\grspanwidth{id}}}{{\\grcolbeg{first}}}{{\\grcolbeg{last}}}{{\\grtempwidth{last}}}"
            )?,
        }
        write!(f, "%\n")
    }
}

/// Render instructions as TeX source
pub fn render_instructions(instructions: &[Instruction]) -> String {
    instructions.iter().map(|i| i.to_string()).collect()
}

/// Emit the width computation for a buffered table
///
/// `picture_width` is the width in base indents of a picture placed in a
/// cell. Multicolumn cells get their `span_id` assigned as a side effect;
/// ids restart at `aaa` for every table.
pub fn negotiate(table: &mut TabMem, picture_width: f64) -> DocGenResult<Vec<Instruction>> {
    let columns = ColumnId::first(table.columns)?;
    let mut out = Vec::new();

    for &column in &columns {
        for row in &table.rows {
            let Some(cell) = row.cells.get(column.index()) else {
                continue;
            };
            if cell.is_phantom() {
                continue;
            }
            if cell.content.starts_with(PICTURE_MACRO) {
                out.push(Instruction::MeasurePicture {
                    width: picture_width,
                });
            } else {
                for part in cell.content.split(SEPARATION_PAT) {
                    out.push(Instruction::MeasureText(part.to_string()));
                }
            }
            if cell.span <= 1 {
                out.push(Instruction::RequireFull);
            } else {
                out.push(Instruction::RequirePart {
                    first: cell.first_column()?,
                });
            }
        }
        out.push(Instruction::FirstFix(column));
    }

    out.push(Instruction::DivideLength);
    out.extend(columns.iter().map(|&c| Instruction::SecondFix(c)));
    out.push(Instruction::DivideLength);
    out.extend(columns.iter().map(|&c| Instruction::ThirdFix(c)));
    out.push(Instruction::DivideLength);
    out.extend(columns.iter().map(|&c| Instruction::FourthFix(c)));

    let mut counter = SpanCounter::new();
    for row in &mut table.rows {
        for cell in &mut row.cells {
            if cell.span > 1 {
                let id = counter.next_id()?;
                out.push(Instruction::SpanWidth {
                    id: id.clone(),
                    first: cell.first_column()?,
                    last: cell.column,
                });
                cell.span_id = Some(id);
            }
        }
    }

    Ok(out)
}
