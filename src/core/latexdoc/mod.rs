//! LaTeX document backend
//!
//! [`LatexDoc`] implements [`TextDoc`] by writing LaTeX that relies on the
//! macros of [`LATEX_TEMPLATE`](crate::data::preamble::LATEX_TEMPLATE).
//! Paragraphs become minipages, labelled paragraphs become lists and tables
//! become `longtable`s whose column widths TeX negotiates itself.
//!
//! # Example
//!
//! ```ignore
//! let mut doc = LatexDoc::new(styles, PaperStyle::a4(), LatexDocOptions::standalone());
//! doc.open(OutputTarget::file("report"))?;
//! doc.start_paragraph("Normal", None)?;
//! doc.write_text("Born 1850 in Kent")?;
//! doc.end_paragraph()?;
//! doc.close()?;
//! ```

pub mod backend;
pub mod context;
pub mod markup;
pub mod table;
pub mod utils;

use std::path::Path;

use indexmap::IndexMap;

use self::backend::LatexBackend;
use self::context::{DocMode, LatexDocOptions, ParagraphState, TexFont};
use self::markup::{add_markup_from_styled, NoteFormat, StyledText};
use self::table::{TableEvent, TableRouter};
use self::utils::{escape_latex, fmt_len, rewrite_urls};
use crate::core::paper::PaperStyle;
use crate::core::styles::StyleSheet;
use crate::core::textdoc::{MediaPlacement, TextDoc};
use crate::data::constants::{
    CELL_LINE_BREAK, MISSING_DATA_BLANK, MISSING_DATA_RULE, NOTE_PARAGRAPH_BREAK, ROW_TERMINATOR,
    SEPARATION_PAT,
};
use crate::data::preamble::{DOCUMENT_END, LATEX_TEMPLATE};
use crate::features::images::{converted_path, default_converter, needs_conversion, ImageConverter};
use crate::utils::error::{DocGenError, DocGenResult, DocWarning, StyleKind};
use crate::utils::files::OutputTarget;

const TABLE_TAIL: &str = "%\n\\end{longtable}%\n";

/// Row and rule bookkeeping of the open table
#[derive(Debug, Clone, Default)]
struct TableCursor {
    columns: usize,
    column: usize,
    /// Some cell of the row has a bottom border
    doline: bool,
    /// The first cell of the row has no bottom border
    skipfirst: bool,
    /// Some cell has a top border; rule under the first row
    head_line: bool,
}

impl TableCursor {
    fn row_decoration(&self) -> String {
        match (self.doline, self.skipfirst) {
            (true, true) => format!("\\cline{{2-{}}}%\n", self.columns),
            (true, false) => "\\hline %\n".to_string(),
            (false, _) => "%\n".to_string(),
        }
    }
}

/// LaTeX implementation of [`TextDoc`]
pub struct LatexDoc {
    styles: StyleSheet,
    paper: PaperStyle,
    options: LatexDocOptions,
    backend: LatexBackend,
    fonts: IndexMap<String, TexFont>,
    mode: DocMode,
    paragraph: ParagraphState,
    router: TableRouter,
    cursor: TableCursor,
    converter: Box<dyn ImageConverter>,
    warnings: Vec<DocWarning>,
}

impl LatexDoc {
    pub fn new(styles: StyleSheet, paper: PaperStyle, options: LatexDocOptions) -> Self {
        Self {
            styles,
            paper,
            options,
            backend: LatexBackend::new(),
            fonts: IndexMap::new(),
            mode: DocMode::default(),
            paragraph: ParagraphState::default(),
            router: TableRouter::new(),
            cursor: TableCursor::default(),
            converter: default_converter(),
            warnings: Vec::new(),
        }
    }

    /// Use `converter` for pictures LaTeX cannot include directly
    pub fn with_image_converter(mut self, converter: Box<dyn ImageConverter>) -> Self {
        self.converter = converter;
        self
    }

    /// Open a document that is kept in memory only
    pub fn open_in_memory(&mut self) -> DocGenResult<()> {
        self.open(OutputTarget::Memory)
    }

    /// Text written so far; complete after `close()`
    pub fn output(&self) -> &str {
        self.backend.contents()
    }

    pub fn into_output(self) -> String {
        self.backend.into_contents()
    }

    /// Problems that did not stop rendering
    pub fn warnings(&self) -> &[DocWarning] {
        &self.warnings
    }

    pub fn options(&self) -> &LatexDocOptions {
        &self.options
    }

    fn warn(&mut self, warning: DocWarning) {
        log::warn!("{}", warning.message);
        self.warnings.push(warning);
    }

    fn ensure_open(&self) -> DocGenResult<()> {
        if self.backend.is_open() {
            Ok(())
        } else {
            Err(DocGenError::NotOpen)
        }
    }

    /// Write text, into the buffered table cell while a table is open
    fn emit(&mut self, text: &str) -> DocGenResult<()> {
        if self.mode.in_table {
            self.route(TableEvent::CellText(text))
        } else {
            self.backend.write(text)
        }
    }

    fn route(&mut self, event: TableEvent<'_>) -> DocGenResult<()> {
        self.ensure_open()?;
        let out = self.router.handle(event)?;
        if !out.is_empty() {
            self.backend.write(&out)?;
        }
        Ok(())
    }

    fn font(&self, style_name: &str) -> DocGenResult<TexFont> {
        self.fonts
            .get(style_name)
            .cloned()
            .ok_or_else(|| DocGenError::unknown_style(StyleKind::Paragraph, style_name))
    }
}

impl TextDoc for LatexDoc {
    fn open(&mut self, target: OutputTarget) -> DocGenResult<()> {
        self.backend.open(target);
        self.mode = DocMode::opened();
        self.paragraph = ParagraphState::default();
        self.router = TableRouter::new();
        self.cursor = TableCursor::default();
        self.warnings.clear();

        self.fonts = self
            .styles
            .paragraph_styles
            .iter()
            .map(|(name, style)| (name.clone(), TexFont::from_style(style)))
            .collect();

        if self.options.with_preamble {
            let class = self.paper.document_class(&self.options.font_size);
            let geometry = self.paper.geometry();
            self.backend.write(&class)?;
            self.backend.write(&geometry)?;
            self.backend.write(LATEX_TEMPLATE)?;
        }
        log::debug!(
            "document opened with {} paragraph styles, preamble {}",
            self.fonts.len(),
            self.options.with_preamble
        );
        Ok(())
    }

    fn close(&mut self) -> DocGenResult<()> {
        self.ensure_open()?;
        if self.mode.in_table {
            self.warn(DocWarning::new("table still open at close; its rows are dropped"));
            self.router = TableRouter::new();
            self.mode.in_table = false;
        }
        if self.mode.in_list {
            self.mode.in_list = false;
            self.emit("\\end{list}\n")?;
        }
        if self.options.with_preamble {
            self.emit(DOCUMENT_END)?;
        }
        self.backend.close()
    }

    fn page_break(&mut self) -> DocGenResult<()> {
        self.emit("\\newpage%\n")
    }

    fn end_page(&mut self) -> DocGenResult<()> {
        self.emit("\\newpage")
    }

    fn start_paragraph(&mut self, style_name: &str, leader: Option<&str>) -> DocGenResult<()> {
        self.ensure_open()?;
        let font = self.font(style_name)?;
        self.paragraph = ParagraphState {
            font_end: font.font_end.clone(),
        };

        let indent = if font.left_indent == 0.0 {
            font.first_line_indent
        } else {
            font.left_indent
        };

        if self.mode.in_title && !font.is_centered() {
            self.mode.in_title = false;
            self.backend.write("\\vspace{5ex}%\n")?;
        }

        if self.mode.in_table {
            self.router.enter_multirow_cell();
        } else {
            let leader = leader.map(escape_latex);
            match &leader {
                Some(label) => self
                    .backend
                    .write(&format!("\\grprepleader{{{}}}%\n", label))?,
                None => self.backend.write("\\grprepnoleader%\n")?,
            }
            self.backend.write(&format!(
                "\\grminpghead{{{}}}{{{}}}%\n",
                fmt_len(indent),
                fmt_len(self.mode.pict_width)
            ))?;
            self.mode.fix_indent = true;

            if let Some(label) = &leader {
                if !self.mode.in_list {
                    self.mode.in_list = true;
                    self.backend.write(&format!("\\grlisthead{{{}}}%\n", label))?;
                }
            }
        }

        if leader.is_none() {
            self.emit("\n")?;
        }
        self.emit(&format!("{} ", font.font_beg))
    }

    fn end_paragraph(&mut self) -> DocGenResult<()> {
        let font_end = std::mem::take(&mut self.paragraph.font_end);
        if self.mode.in_list {
            self.mode.in_list = false;
            self.emit(&font_end)?;
            self.emit("\n\\grlisttail%\n")?;
        } else if self.mode.in_table {
            self.emit(&format!("{}{}", font_end, SEPARATION_PAT))?;
        } else {
            self.emit(&format!("{}%\n\n", font_end))?;
        }

        if self.mode.fix_indent {
            self.mode.fix_indent = false;
            self.emit("\\grminpgtail%\n\n")?;
        }
        if self.mode.pict_width != 0.0 {
            self.mode.clear_picture();
        }
        Ok(())
    }

    fn start_bold(&mut self) -> DocGenResult<()> {
        self.emit("\\textbf{")
    }

    fn end_bold(&mut self) -> DocGenResult<()> {
        self.emit("}")
    }

    fn start_superscript(&mut self) -> DocGenResult<()> {
        self.emit("\\textsuperscript{")
    }

    fn end_superscript(&mut self) -> DocGenResult<()> {
        self.emit("}")
    }

    fn start_table(&mut self, name: &str, style_name: &str) -> DocGenResult<()> {
        self.ensure_open()?;
        if self.mode.in_table {
            log::warn!("table '{}' started inside an open table", name);
            return Err(DocGenError::NestedTable);
        }
        let columns = self.styles.table_style(style_name)?.columns;
        log::debug!("start table '{}' with style '{}'", name, style_name);

        self.mode.in_table = true;
        self.cursor = TableCursor {
            columns,
            ..Default::default()
        };
        let head = format!("\\begin{{longtable}}[l]{{*{{{}}}{{l}}}}\n", columns);
        self.route(TableEvent::TableBegin {
            head: &head,
            columns,
        })
    }

    fn end_table(&mut self) -> DocGenResult<()> {
        let head_rule = self.cursor.head_line;
        let result = self.route(TableEvent::TableEnd {
            tail: TABLE_TAIL,
            head_rule,
        });
        self.mode.in_table = false;
        self.cursor = TableCursor::default();
        result
    }

    fn start_row(&mut self) -> DocGenResult<()> {
        self.cursor.doline = false;
        self.cursor.skipfirst = false;
        self.cursor.column = 0;
        self.route(TableEvent::RowBegin)
    }

    fn end_row(&mut self) -> DocGenResult<()> {
        let decoration = self.cursor.row_decoration();
        self.route(TableEvent::RowEnd {
            terminator: ROW_TERMINATOR,
            decoration: &decoration,
        })
    }

    fn start_cell(&mut self, style_name: &str, span: usize) -> DocGenResult<()> {
        self.cursor.column += span;
        let style = *self.styles.cell_style(style_name)?;

        let mut format = String::from("l");
        if style.left_border {
            format.insert(0, '|');
        }
        if style.right_border {
            format.push('|');
        }

        if style.bottom_border {
            self.cursor.doline = true;
        } else if self.cursor.column == 1 {
            self.cursor.skipfirst = true;
        }
        if style.top_border {
            self.cursor.head_line = true;
        }

        let head = format!("\\multicolumn{{{}}}{{{}}}", span, format);
        self.route(TableEvent::CellBegin { head: &head, span })
    }

    fn end_cell(&mut self) -> DocGenResult<()> {
        self.route(TableEvent::CellEnd)
    }

    fn write_text(&mut self, text: &str) -> DocGenResult<()> {
        let text = if text == "\n" { "" } else { text };
        let escaped = escape_latex(text);
        let linked = rewrite_urls(&escaped);
        let out = linked.replace(MISSING_DATA_BLANK, MISSING_DATA_RULE);
        self.emit(&format!("{} ", out))
    }

    fn write_styled_note(
        &mut self,
        note: &StyledText,
        format: NoteFormat,
        style_name: &str,
        contains_html: bool,
    ) -> DocGenResult<()> {
        if contains_html {
            log::debug!("note with HTML content skipped");
            return Ok(());
        }
        let marked = add_markup_from_styled(note, format);
        let marked = rewrite_urls(&marked);

        if format.is_preformatted() {
            self.start_paragraph(style_name, None)?;
            self.emit(&marked)?;
            return self.end_paragraph();
        }

        for block in marked.split(NOTE_PARAGRAPH_BREAK) {
            self.start_paragraph(style_name, None)?;
            for line in block.split('\n') {
                self.emit(line)?;
                self.emit(CELL_LINE_BREAK)?;
            }
            self.end_paragraph()?;
        }
        Ok(())
    }

    fn add_media(
        &mut self,
        path: &Path,
        placement: MediaPlacement,
        width: f64,
        height: f64,
        caption: &str,
    ) -> DocGenResult<()> {
        self.ensure_open()?;
        log::debug!("picture {} placed {:?}", path.display(), placement);
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut height = height;
        let file = if needs_conversion(path) {
            let dest = converted_path(path);
            match self.converter.convert(path, &dest) {
                Ok(info) => {
                    if info.is_portrait() && info.width > 0 {
                        height = height * info.height as f64 / info.width as f64;
                    }
                    dest
                }
                Err(e) => {
                    // Written outside any table buffer so the comment
                    // cannot swallow table markup
                    self.backend.write(&format!(
                        "%\n% *** Error: cannot convert {}\n% ***                    to {}\n% *** {}%\n",
                        path.display(),
                        dest.display(),
                        e
                    ))?;
                    self.warn(DocWarning::with_suggestion(
                        format!("cannot convert {}: {}", path.display(), e),
                        "use a JPEG or PNG picture",
                    ));
                    return Ok(());
                }
            }
        } else {
            path.to_path_buf()
        };

        let caption = if caption.is_empty() {
            escape_latex(&stem)
        } else {
            escape_latex(caption)
        };
        let mut picture = format!(
            "\\grmkpicture{{{}}}{{{}}}{{{}}}{{{}}}",
            file.display().to_string().replace('\\', "/"),
            fmt_len(width),
            fmt_len(height),
            caption
        );
        if self.mode.in_table {
            self.router.anchor_picture(width);
        } else {
            picture.push_str("%\n");
        }
        self.emit(&picture)?;

        self.mode.pict_width = width;
        self.mode.pict_height = height;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::styles::{Alignment, CellStyle, ParagraphStyle, TableStyle};
    use crate::features::images::NoImageConverter;
    use pretty_assertions::assert_eq;

    fn styles() -> StyleSheet {
        let mut styles = StyleSheet::new();
        styles.add_paragraph_style("Normal", ParagraphStyle::new());
        styles.add_paragraph_style(
            "Title",
            ParagraphStyle::new().with_alignment(Alignment::Center),
        );
        styles.add_cell_style("Plain", CellStyle::plain());
        styles.add_cell_style("Boxed", CellStyle::boxed());
        styles.add_cell_style(
            "Under",
            CellStyle {
                bottom_border: true,
                ..Default::default()
            },
        );
        styles.add_table_style("Two", TableStyle::with_columns(2));
        styles
    }

    fn fragment() -> LatexDoc {
        let mut doc = LatexDoc::new(styles(), PaperStyle::a4(), LatexDocOptions::fragment())
            .with_image_converter(Box::new(NoImageConverter));
        doc.open_in_memory().unwrap();
        doc
    }

    #[test]
    fn test_write_before_open() {
        let mut doc = LatexDoc::new(styles(), PaperStyle::a4(), LatexDocOptions::fragment());
        assert!(matches!(doc.write_text("x"), Err(DocGenError::NotOpen)));
        assert!(matches!(
            doc.start_paragraph("Normal", None),
            Err(DocGenError::NotOpen)
        ));
    }

    #[test]
    fn test_paragraph_layout() {
        let mut doc = fragment();
        doc.start_paragraph("Normal", None).unwrap();
        doc.write_text("Hello").unwrap();
        doc.end_paragraph().unwrap();
        assert_eq!(
            doc.output(),
            "\\vspace{5ex}%\n\\grprepnoleader%\n\\grminpghead{0.0}{0.0}%\n\n  Hello  %\n\n\\grminpgtail%\n\n"
        );
    }

    #[test]
    fn test_title_spacing_once() {
        let mut doc = fragment();
        doc.start_paragraph("Title", None).unwrap();
        doc.end_paragraph().unwrap();
        assert!(!doc.output().contains("\\vspace{5ex}"));
        doc.start_paragraph("Normal", None).unwrap();
        doc.end_paragraph().unwrap();
        doc.start_paragraph("Normal", None).unwrap();
        doc.end_paragraph().unwrap();
        assert_eq!(doc.output().matches("\\vspace{5ex}").count(), 1);
    }

    #[test]
    fn test_leader_opens_list() {
        let mut doc = fragment();
        doc.start_paragraph("Normal", Some("1_a")).unwrap();
        doc.write_text("item").unwrap();
        doc.end_paragraph().unwrap();
        let out = doc.output();
        assert!(out.contains("\\grprepleader{1\\_a}%\n"));
        assert!(out.contains("\\grlisthead{1\\_a}%\n"));
        assert!(out.contains("\\grlisttail%\n"));
        assert!(out.find("\\grlisttail").unwrap() < out.find("\\grminpgtail").unwrap());
    }

    #[test]
    fn test_unknown_styles() {
        let mut doc = fragment();
        assert!(matches!(
            doc.start_paragraph("Missing", None),
            Err(DocGenError::UnknownStyle {
                kind: StyleKind::Paragraph,
                ..
            })
        ));
        assert!(matches!(
            doc.start_table("t", "Missing"),
            Err(DocGenError::UnknownStyle {
                kind: StyleKind::Table,
                ..
            })
        ));
    }

    #[test]
    fn test_write_text_rewrites() {
        let mut doc = fragment();
        doc.mode.in_title = false;
        doc.write_text("\n").unwrap();
        doc.write_text("_____________").unwrap();
        doc.write_text("see https://example.org").unwrap();
        assert_eq!(
            doc.output(),
            " \\underline{\\hspace{3\\grbaseindent}} see \\url{https://example.org} "
        );
    }

    #[test]
    fn test_row_decorations() {
        let mut cursor = TableCursor {
            columns: 3,
            ..Default::default()
        };
        assert_eq!(cursor.row_decoration(), "%\n");
        cursor.doline = true;
        assert_eq!(cursor.row_decoration(), "\\hline %\n");
        cursor.skipfirst = true;
        assert_eq!(cursor.row_decoration(), "\\cline{2-3}%\n");
    }

    #[test]
    fn test_cell_borders() {
        let mut doc = fragment();
        doc.start_table("t", "Two").unwrap();
        doc.start_row().unwrap();
        doc.start_cell("Plain", 1).unwrap();
        doc.end_cell().unwrap();
        doc.start_cell("Under", 1).unwrap();
        doc.end_cell().unwrap();
        assert!(doc.cursor.doline);
        assert!(doc.cursor.skipfirst);
        doc.end_row().unwrap();
        doc.start_row().unwrap();
        doc.start_cell("Boxed", 2).unwrap();
        doc.end_cell().unwrap();
        doc.end_row().unwrap();
        doc.end_table().unwrap();

        let out = doc.output();
        assert!(out.contains("\\cline{2-2}%\n"));
        assert!(out.contains("\\multicolumn{2}{|l|}"));
        assert!(out.contains("\\endfoot%\n\\hline%\n"));
        assert!(out.contains("\\grspanwidthaaa"));
    }

    #[test]
    fn test_nested_table_rejected() {
        let mut doc = fragment();
        doc.start_table("outer", "Two").unwrap();
        assert!(matches!(
            doc.start_table("inner", "Two"),
            Err(DocGenError::NestedTable)
        ));
        doc.start_row().unwrap();
        doc.start_cell("Plain", 1).unwrap();
        doc.write_text("kept").unwrap();
        doc.end_cell().unwrap();
        doc.end_row().unwrap();
        doc.end_table().unwrap();
        assert!(doc.output().contains("kept"));
        assert_eq!(doc.output().matches("\\begin{longtable}").count(), 1);
    }

    #[test]
    fn test_missing_picture_converter() {
        let mut doc = fragment();
        doc.add_media(Path::new("scan.gif"), MediaPlacement::Right, 2.0, 2.0, "")
            .unwrap();
        assert!(doc.output().contains("% *** Error: cannot convert scan.gif"));
        assert!(!doc.output().contains("\\grmkpicture"));
        assert_eq!(doc.warnings().len(), 1);
        assert_eq!(doc.mode.pict_width, 0.0);
    }

    #[test]
    fn test_direct_picture() {
        let mut doc = fragment();
        doc.add_media(Path::new("photos/a_b.jpg"), MediaPlacement::Right, 3.0, 2.5, "")
            .unwrap();
        assert_eq!(
            doc.output(),
            "\\grmkpicture{photos/a_b.jpg}{3.0}{2.5}{a\\_b}%\n"
        );
        doc.start_paragraph("Normal", None).unwrap();
        assert!(doc.output().contains("\\grminpghead{0.0}{3.0}%\n"));
        doc.end_paragraph().unwrap();
        assert_eq!(doc.mode.pict_width, 0.0);
    }

    #[test]
    fn test_close_ends_open_list() {
        let mut doc = LatexDoc::new(styles(), PaperStyle::a4(), LatexDocOptions::standalone());
        doc.open_in_memory().unwrap();
        doc.start_paragraph("Normal", Some("*")).unwrap();
        doc.close().unwrap();
        assert!(doc.output().ends_with("\\end{list}\n\\end{document}\n"));
    }
}
