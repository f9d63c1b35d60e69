//! Offline evaluation of the width macros
//!
//! Runs an instruction sequence against a model of the preamble's
//! registers, with text measured by a caller-supplied function. Used to
//! check the negotiation without running TeX. All lengths are in points.

use fxhash::FxHashMap;

use super::cell::ColumnId;
use super::widths::Instruction;

/// Page lengths the macros read
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageMetrics {
    /// `\textwidth`
    pub text_width: f64,
    /// `\tabcolsep`
    pub tabcolsep: f64,
    /// `\grbaseindent`
    pub base_indent: f64,
}

impl Default for PageMetrics {
    /// A4 with 2cm margins at 12pt
    fn default() -> Self {
        Self {
            text_width: 483.69,
            tabcolsep: 6.0,
            base_indent: 30.0,
        }
    }
}

/// Per-column registers
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ColumnWidths {
    /// `\grcolbeg<c>`
    pub begin: f64,
    /// `\grtempwidth<c>`, the width the column is typeset with
    pub temp: f64,
    /// `\grfinalwidth<c>`; zero while unresolved
    pub final_width: f64,
    pub pict_req: f64,
    pub text_req: f64,
}

impl ColumnWidths {
    pub fn is_resolved(&self) -> bool {
        self.final_width != 0.0
    }
}

/// Register state after all instructions ran
#[derive(Debug, Clone, Default)]
pub struct NegotiationOutcome {
    pub table_width: f64,
    pub prorated: f64,
    pub width_used: f64,
    /// `grtofixcnt`
    pub unresolved: i64,
    /// `grxwdcolcnt`
    pub widest_columns: i64,
    /// Sum of the natural column widths, `\grcurcolend`
    pub natural_width: f64,
    pub columns: Vec<ColumnWidths>,
    pub span_widths: FxHashMap<String, f64>,
}

impl NegotiationOutcome {
    pub fn final_widths(&self) -> Vec<f64> {
        self.columns.iter().map(|c| c.final_width).collect()
    }

    pub fn total_width(&self) -> f64 {
        self.columns.iter().map(|c| c.final_width).sum()
    }

    pub fn column(&self, id: ColumnId) -> Option<&ColumnWidths> {
        self.columns.get(id.index())
    }
}

#[derive(Default)]
struct Registers {
    tab_width: f64,
    prorated: f64,
    width_used: f64,
    max_width: f64,
    xwd: f64,
    temp_wd: f64,
    reduce: f64,
    pict_size: f64,
    max_pict_size: f64,
    text_size: f64,
    max_text_size: f64,
    cur_col_end: f64,
    to_fix: i64,
    xwd_cols: i64,
    columns: Vec<ColumnWidths>,
    span_widths: FxHashMap<String, f64>,
}

impl Registers {
    fn column_mut(&mut self, id: ColumnId) -> &mut ColumnWidths {
        let idx = id.index();
        if self.columns.len() <= idx {
            self.columns.resize(idx + 1, ColumnWidths::default());
        }
        &mut self.columns[idx]
    }

    fn column(&self, id: ColumnId) -> ColumnWidths {
        self.columns.get(id.index()).copied().unwrap_or_default()
    }

    fn overfull(&self) -> bool {
        !(self.cur_col_end < self.tab_width)
    }

    fn set_req_full(&mut self) {
        self.max_pict_size = self.max_pict_size.max(self.pict_size);
        self.max_text_size = self.max_text_size.max(self.text_size);
        self.pict_size = 0.0;
        self.text_size = 0.0;
    }

    /// `\grfixcolumn`: the column takes `temp_wd` and is final
    fn fix_column(&mut self, id: ColumnId) {
        let temp_wd = self.temp_wd;
        let col = self.column_mut(id);
        let shrink = col.temp - temp_wd;
        col.temp = temp_wd;
        col.final_width = temp_wd;
        self.reduce += shrink;
        self.width_used += temp_wd;
        self.to_fix -= 1;
    }

    fn apply(&mut self, instruction: &Instruction, metrics: &PageMetrics, measure: &mut dyn FnMut(&str) -> f64) {
        match instruction {
            Instruction::InitTable { columns } => {
                *self = Registers::default();
                self.tab_width = metrics.text_width;
                self.prorated = self.tab_width / (*columns).max(1) as f64;
            }
            Instruction::ReduceTableWidth { picture_width } => {
                self.tab_width -= picture_width * metrics.base_indent + 2.0 * metrics.tabcolsep;
            }
            Instruction::MeasureText(text) => {
                self.temp_wd = measure(text);
                self.text_size = self.text_size.max(self.temp_wd);
            }
            Instruction::MeasurePicture { width } => {
                self.pict_size = width * metrics.base_indent;
            }
            Instruction::RequireFull => self.set_req_full(),
            Instruction::RequirePart { first } => {
                let back = self.column(*first).begin - self.cur_col_end;
                self.text_size += back;
                self.pict_size += back;
                self.set_req_full();
            }
            Instruction::FirstFix(id) => {
                let begin = self.cur_col_end;
                let (pict_req, text_req) = (self.max_pict_size, self.max_text_size);
                let temp = text_req.max(pict_req) + 2.0 * metrics.tabcolsep;
                let fits = temp < self.prorated;
                *self.column_mut(*id) = ColumnWidths {
                    begin,
                    temp,
                    final_width: if fits { temp } else { 0.0 },
                    pict_req,
                    text_req,
                };
                self.max_width = self.max_width.max(temp);
                if fits {
                    self.width_used += temp;
                } else {
                    self.to_fix += 1;
                }
                self.cur_col_end += temp;
                self.max_pict_size = 0.0;
                self.max_text_size = 0.0;
            }
            Instruction::DivideLength => {
                self.temp_wd = self.tab_width - self.width_used;
                self.reduce = 0.0;
                self.xwd = if self.to_fix > 0 {
                    self.temp_wd / self.to_fix as f64
                } else {
                    0.0
                };
            }
            Instruction::SecondFix(id) => {
                let col = self.column(*id);
                if !self.overfull() {
                    if !col.is_resolved() {
                        self.temp_wd = col.temp;
                        self.fix_column(*id);
                    }
                    return;
                }
                self.column_mut(*id).begin -= self.reduce;
                if col.is_resolved() {
                    return;
                }
                if col.temp == self.max_width {
                    self.xwd_cols += 1;
                    self.temp_wd = self.xwd;
                    self.fix_column(*id);
                } else if col.pict_req > 0.0 {
                    self.temp_wd = self.xwd.min(col.temp);
                    self.fix_column(*id);
                }
            }
            Instruction::ThirdFix(id) => {
                if !self.overfull() {
                    return;
                }
                self.column_mut(*id).begin -= self.reduce;
                let col = self.column(*id);
                if !col.is_resolved() && col.temp < self.max_width {
                    self.temp_wd = if col.temp < 0.5 * self.max_width {
                        0.5 * self.xwd
                    } else {
                        self.xwd
                    };
                    self.fix_column(*id);
                }
            }
            Instruction::FourthFix(id) => {
                if !self.overfull() {
                    return;
                }
                self.column_mut(*id).begin -= self.reduce;
                if !self.column(*id).is_resolved() {
                    self.temp_wd = self.xwd;
                    self.fix_column(*id);
                }
            }
            Instruction::SpanWidth { id, first, last } => {
                let last = self.column(*last);
                let width = last.begin - self.column(*first).begin + last.temp;
                self.span_widths.insert(id.clone(), width);
            }
        }
    }
}

/// Evaluate `instructions` the way TeX would
///
/// `measure` returns the natural width in points of one line of cell text.
pub fn simulate<F>(instructions: &[Instruction], metrics: PageMetrics, mut measure: F) -> NegotiationOutcome
where
    F: FnMut(&str) -> f64,
{
    let mut regs = Registers::default();
    regs.tab_width = metrics.text_width;
    for instruction in instructions {
        regs.apply(instruction, &metrics, &mut measure);
    }

    NegotiationOutcome {
        table_width: regs.tab_width,
        prorated: regs.prorated,
        width_used: regs.width_used,
        unresolved: regs.to_fix,
        widest_columns: regs.xwd_cols,
        natural_width: regs.cur_col_end,
        columns: regs.columns,
        span_widths: regs.span_widths,
    }
}

/// Width model for tests: a fixed advance per character
pub fn monospace(advance: f64) -> impl FnMut(&str) -> f64 {
    move |text: &str| text.chars().count() as f64 * advance
}
