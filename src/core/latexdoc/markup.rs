//! Styled text and its inline LaTeX markup
//!
//! A note is plain text plus tags over character ranges. Tags are
//! applied segment by segment, so markup nests properly even when the
//! ranges overlap.

use serde::{Deserialize, Serialize};

use super::utils::{escape_for, map_font_size};
use crate::data::constants::NOTE_PARAGRAPH_BREAK;

/// Kind of an inline tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyledTextTagType {
    Bold,
    Italic,
    Underline,
    Superscript,
    FontSize,
    FontFace,
    FontColor,
    Highlight,
    Link,
}

/// One tag with the character ranges it covers, end exclusive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledTextTag {
    pub name: StyledTextTagType,
    #[serde(default)]
    pub value: Option<String>,
    pub ranges: Vec<(usize, usize)>,
}

impl StyledTextTag {
    pub fn new(name: StyledTextTagType, ranges: Vec<(usize, usize)>) -> Self {
        Self {
            name,
            value: None,
            ranges,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    fn covers(&self, start: usize, end: usize) -> bool {
        self.ranges.iter().any(|&(s, e)| s <= start && end <= e)
    }

    /// Opening and closing LaTeX for this tag, `None` for tags without
    /// a LaTeX rendering
    pub fn markup(&self) -> Option<(String, String)> {
        let wrap = |open: &str| Some((open.to_string(), "}".to_string()));
        match self.name {
            StyledTextTagType::Bold => wrap("\\textbf{"),
            StyledTextTagType::Italic => wrap("\\textit{"),
            StyledTextTagType::Underline => wrap("\\underline{"),
            StyledTextTagType::Superscript => wrap("\\textsuperscript{"),
            StyledTextTagType::FontSize => {
                let size = self.value.as_deref()?.trim().parse::<f64>().ok()?;
                match map_font_size(size) {
                    "" => None,
                    name => Some((format!("{{\\{} ", name), "}".to_string())),
                }
            }
            StyledTextTagType::FontFace => {
                let face = self.value.as_deref()?.to_uppercase();
                if face.contains("MONO") {
                    wrap("{\\ttfamily ")
                } else if face.contains("ROMAN") {
                    wrap("{\\rmfamily ")
                } else {
                    None
                }
            }
            StyledTextTagType::FontColor
            | StyledTextTagType::Highlight
            | StyledTextTagType::Link => None,
        }
    }
}

/// Text with inline style tags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyledText {
    pub text: String,
    #[serde(default)]
    pub tags: Vec<StyledTextTag>,
}

impl StyledText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tags: Vec::new(),
        }
    }

    pub fn with_tag(mut self, tag: StyledTextTag) -> Self {
        self.tags.push(tag);
        self
    }
}

/// How a note's line breaks are meant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteFormat {
    /// Lines flow; a blank line separates paragraphs
    #[default]
    Flowed,
    /// Spaces and line breaks are kept as written
    Preformatted,
}

impl NoteFormat {
    pub fn is_preformatted(self) -> bool {
        self == NoteFormat::Preformatted
    }
}

/// Escaped text of `note` with its tags turned into LaTeX markup
///
/// Flowed text has its blank lines turned into [`NOTE_PARAGRAPH_BREAK`],
/// always outside of any tag markup.
pub fn add_markup_from_styled(note: &StyledText, format: NoteFormat) -> String {
    let chars: Vec<char> = note.text.chars().collect();
    if format.is_preformatted() {
        return markup_range(&chars, 0, chars.len(), &note.tags, format);
    }

    let mut paragraphs = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i + 1 < chars.len() {
        if chars[i] == '\n' && chars[i + 1] == '\n' {
            paragraphs.push(markup_range(&chars, start, i, &note.tags, format));
            i += 2;
            start = i;
        } else {
            i += 1;
        }
    }
    paragraphs.push(markup_range(&chars, start, chars.len(), &note.tags, format));
    paragraphs.join(NOTE_PARAGRAPH_BREAK)
}

fn markup_range(
    chars: &[char],
    start: usize,
    end: usize,
    tags: &[StyledTextTag],
    format: NoteFormat,
) -> String {
    let escape = escape_for(format.is_preformatted());
    let marked: Vec<(&StyledTextTag, (String, String))> = tags
        .iter()
        .filter_map(|tag| tag.markup().map(|m| (tag, m)))
        .collect();

    let mut bounds = vec![start, end];
    for (tag, _) in &marked {
        for &(s, e) in &tag.ranges {
            bounds.extend([s.clamp(start, end), e.clamp(start, end)]);
        }
    }
    bounds.sort_unstable();
    bounds.dedup();

    let mut out = String::new();
    for pair in bounds.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let segment: String = chars[a..b].iter().collect();
        let active: Vec<&(String, String)> = marked
            .iter()
            .filter(|(tag, _)| tag.covers(a, b))
            .map(|(_, m)| m)
            .collect();
        for (open, _) in &active {
            out.push_str(open);
        }
        out.push_str(&escape(&segment));
        for (_, close) in active.iter().rev() {
            out.push_str(close);
        }
    }
    out
}
