//! Document options and per-document rendering state
//!
//! This module handles options resolved at `open()`, the cached LaTeX form
//! of each paragraph style and the mode flags of one open document.

use serde::{Deserialize, Serialize};

use super::utils::map_font_size;
use crate::core::styles::{Alignment, FontFace, ParagraphStyle};
use crate::data::constants::DEFAULT_FONT_SIZE;

/// Options for LaTeX document generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatexDocOptions {
    /// Emit `\documentclass`, packages, macros and `\begin{document}`.
    /// Off when the output is included in a larger master file.
    pub with_preamble: bool,
    /// Base font size option of the document class
    pub font_size: String,
}

impl Default for LatexDocOptions {
    fn default() -> Self {
        Self {
            with_preamble: true,
            font_size: DEFAULT_FONT_SIZE.to_string(),
        }
    }
}

impl LatexDocOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// A complete, compilable document
    pub fn standalone() -> Self {
        Self::default()
    }

    /// Body only, for `\input` into a master document
    pub fn fragment() -> Self {
        Self {
            with_preamble: false,
            ..Default::default()
        }
    }
}

/// LaTeX rendering of a paragraph style
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TexFont {
    /// Written before the paragraph text
    pub font_beg: String,
    /// Written after the paragraph text
    pub font_end: String,
    /// Left indent in base indent units
    pub left_indent: f64,
    /// First line indent including the left indent
    pub first_line_indent: f64,
}

impl TexFont {
    pub fn from_style(style: &ParagraphStyle) -> Self {
        let mut font_beg = String::new();
        let mut font_end = String::new();

        match style.alignment {
            Alignment::Center => {
                font_beg.push_str("{\\centering");
                font_end.insert_str(0, "\n\n}");
            }
            Alignment::Right => font_beg.push_str("\\hfill"),
            Alignment::Left | Alignment::Justify => {}
        }

        let font = &style.font;
        if font.face == FontFace::SansSerif {
            font_beg.push_str("\\sffamily");
            font_end.insert_str(0, "\\rmfamily");
        }
        if font.bold {
            font_beg.push_str("\\bfseries");
            font_end.insert_str(0, "\\mdseries");
        }
        if font.italic || font.underline {
            font_beg.push_str("\\itshape");
            font_end.insert_str(0, "\\upshape");
        }

        let size = map_font_size(font.size);
        if !size.is_empty() {
            font_beg.push('\\');
            font_beg.push_str(size);
            font_end.push_str("\\normalsize");
        }

        font_beg.push(' ');
        font_end.push(' ');

        TexFont {
            font_beg,
            font_end,
            left_indent: style.left_margin,
            first_line_indent: style.first_indent + style.left_margin,
        }
    }

    pub fn is_centered(&self) -> bool {
        self.font_beg.contains("centering")
    }
}

/// Mode flags of one open document
#[derive(Debug, Clone, Default)]
pub struct DocMode {
    /// Between `start_table` and `end_table`
    pub in_table: bool,
    /// A labelled paragraph opened a list environment
    pub in_list: bool,
    /// Still inside the centered title block at the top of the document
    pub in_title: bool,
    /// A minipage is open for the current paragraph
    pub fix_indent: bool,
    /// Width reserved for a picture next to the current paragraph, in base indents
    pub pict_width: f64,
    /// Height reserved for that picture
    pub pict_height: f64,
}

impl DocMode {
    pub fn opened() -> Self {
        Self {
            in_title: true,
            ..Default::default()
        }
    }

    pub fn clear_picture(&mut self) {
        self.pict_width = 0.0;
        self.pict_height = 0.0;
    }
}

/// Attributes of the paragraph being written
#[derive(Debug, Clone, Default)]
pub struct ParagraphState {
    /// Closes the style fragments opened by the paragraph
    pub font_end: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::styles::FontStyle;

    #[test]
    fn test_options_presets() {
        assert!(LatexDocOptions::standalone().with_preamble);
        assert!(!LatexDocOptions::fragment().with_preamble);
        assert_eq!(LatexDocOptions::new().font_size, "12pt");
    }

    #[test]
    fn test_plain_style() {
        let font = TexFont::from_style(&ParagraphStyle::new());
        assert_eq!(font.font_beg, " ");
        assert_eq!(font.font_end, " ");
        assert!(!font.is_centered());
    }

    #[test]
    fn test_centered_bold_large() {
        let style = ParagraphStyle::new()
            .with_alignment(Alignment::Center)
            .with_font(FontStyle {
                bold: true,
                size: 16.0,
                ..Default::default()
            });
        let font = TexFont::from_style(&style);
        assert_eq!(font.font_beg, "{\\centering\\bfseries\\Large ");
        assert_eq!(font.font_end, "\\mdseries\n\n}\\normalsize ");
        assert!(font.is_centered());
    }

    #[test]
    fn test_sans_italic_underline() {
        let style = ParagraphStyle::new()
            .with_alignment(Alignment::Right)
            .with_font(FontStyle {
                face: FontFace::SansSerif,
                underline: true,
                ..Default::default()
            });
        let font = TexFont::from_style(&style);
        assert_eq!(font.font_beg, "\\hfill\\sffamily\\itshape ");
        assert_eq!(font.font_end, "\\upshape\\rmfamily ");
    }

    #[test]
    fn test_indents() {
        let style = ParagraphStyle::new().with_indents(1.0, -0.5);
        let font = TexFont::from_style(&style);
        assert_eq!(font.left_indent, 1.0);
        assert_eq!(font.first_line_indent, 0.5);
    }
}
