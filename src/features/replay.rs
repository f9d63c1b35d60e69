//! Recorded document scripts
//!
//! A [`DocScript`] is a JSON description of one document: its options,
//! page setup, style sheet and the ordered [`TextDoc`] calls a report
//! generator made. Replaying a script drives any [`TextDoc`]; rendering it
//! through [`LatexDoc`] gives the same bytes every time.
//!
//! ```json
//! {
//!   "styles": { "paragraph_styles": { "Normal": {} } },
//!   "calls": [
//!     { "call": "start_paragraph", "style": "Normal" },
//!     { "call": "write_text", "text": "Born 1850" },
//!     { "call": "end_paragraph" }
//!   ]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::latexdoc::context::LatexDocOptions;
use crate::core::latexdoc::markup::{NoteFormat, StyledText};
use crate::core::latexdoc::LatexDoc;
use crate::core::paper::PaperStyle;
use crate::core::styles::StyleSheet;
use crate::core::textdoc::{MediaPlacement, TextDoc};
use crate::utils::error::{DocGenResult, DocWarning};
use crate::utils::files::OutputTarget;

fn default_span() -> usize {
    1
}

/// One recorded [`TextDoc`] call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum DocCall {
    PageBreak,
    EndPage,
    StartParagraph {
        style: String,
        #[serde(default)]
        leader: Option<String>,
    },
    EndParagraph,
    StartBold,
    EndBold,
    StartSuperscript,
    EndSuperscript,
    StartTable {
        name: String,
        style: String,
    },
    EndTable,
    StartRow,
    EndRow,
    StartCell {
        style: String,
        #[serde(default = "default_span")]
        span: usize,
    },
    EndCell,
    WriteText {
        text: String,
    },
    WriteStyledNote {
        note: StyledText,
        #[serde(default)]
        format: NoteFormat,
        style: String,
        #[serde(default)]
        contains_html: bool,
    },
    AddMedia {
        path: PathBuf,
        #[serde(default)]
        placement: MediaPlacement,
        width: f64,
        height: f64,
        #[serde(default)]
        caption: String,
    },
}

/// A whole recorded document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocScript {
    #[serde(default)]
    pub options: LatexDocOptions,
    #[serde(default)]
    pub paper: PaperStyle,
    #[serde(default)]
    pub styles: StyleSheet,
    #[serde(default)]
    pub calls: Vec<DocCall>,
}

impl DocScript {
    pub fn from_json(json: &str) -> DocGenResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a script file; relative picture paths are taken relative to
    /// the script's directory
    pub fn from_file(path: impl AsRef<Path>) -> DocGenResult<Self> {
        let path = path.as_ref();
        let mut script = Self::from_json(&fs::read_to_string(path)?)?;
        if let Some(base) = path.parent() {
            script.resolve_media(base);
        }
        Ok(script)
    }

    /// Make relative picture paths relative to `base`
    pub fn resolve_media(&mut self, base: &Path) {
        for call in &mut self.calls {
            if let DocCall::AddMedia { path, .. } = call {
                if path.is_relative() {
                    *path = base.join(&*path);
                }
            }
        }
    }

    /// Issue every recorded call on `doc`
    ///
    /// `doc` must already be open; it is left open. A call failing with a
    /// capacity error is skipped and reported in the returned warnings; any
    /// other error stops the replay.
    pub fn replay<D: TextDoc + ?Sized>(&self, doc: &mut D) -> DocGenResult<Vec<DocWarning>> {
        let mut skipped = Vec::new();
        for (index, call) in self.calls.iter().enumerate() {
            match issue(call, doc) {
                Ok(()) => {}
                Err(e) if e.is_capacity() => {
                    log::warn!("call {} skipped: {}", index + 1, e);
                    skipped.push(DocWarning::with_suggestion(
                        format!("call {}: {}", index + 1, e),
                        "the table was left out of the output",
                    ));
                }
                Err(e) => return Err(e),
            }
        }
        log::debug!(
            "replayed {} calls, {} skipped",
            self.calls.len(),
            skipped.len()
        );
        Ok(skipped)
    }

    /// Unopened LaTeX document set up with this script's styles
    pub fn document(&self) -> LatexDoc {
        LatexDoc::new(self.styles.clone(), self.paper.clone(), self.options.clone())
    }

    /// Replay into `doc` between `open(target)` and `close()`
    pub fn write_into(
        &self,
        doc: &mut LatexDoc,
        target: OutputTarget,
    ) -> DocGenResult<Vec<DocWarning>> {
        doc.open(target)?;
        let skipped = self.replay(doc)?;
        doc.close()?;
        Ok(skipped)
    }

    /// Render the script to LaTeX source in memory
    pub fn render(&self) -> DocGenResult<String> {
        let mut doc = self.document();
        self.write_into(&mut doc, OutputTarget::Memory)?;
        Ok(doc.into_output())
    }
}

fn issue<D: TextDoc + ?Sized>(call: &DocCall, doc: &mut D) -> DocGenResult<()> {
    match call {
        DocCall::PageBreak => doc.page_break(),
        DocCall::EndPage => doc.end_page(),
        DocCall::StartParagraph { style, leader } => doc.start_paragraph(style, leader.as_deref()),
        DocCall::EndParagraph => doc.end_paragraph(),
        DocCall::StartBold => doc.start_bold(),
        DocCall::EndBold => doc.end_bold(),
        DocCall::StartSuperscript => doc.start_superscript(),
        DocCall::EndSuperscript => doc.end_superscript(),
        DocCall::StartTable { name, style } => doc.start_table(name, style),
        DocCall::EndTable => doc.end_table(),
        DocCall::StartRow => doc.start_row(),
        DocCall::EndRow => doc.end_row(),
        DocCall::StartCell { style, span } => doc.start_cell(style, *span),
        DocCall::EndCell => doc.end_cell(),
        DocCall::WriteText { text } => doc.write_text(text),
        DocCall::WriteStyledNote {
            note,
            format,
            style,
            contains_html,
        } => doc.write_styled_note(note, *format, style, *contains_html),
        DocCall::AddMedia {
            path,
            placement,
            width,
            height,
            caption,
        } => doc.add_media(path, *placement, *width, *height, caption),
    }
}
