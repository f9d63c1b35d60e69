//! Utility functions for LaTeX generation
//!
//! Escaping of running and preformatted text, hyperlink rewriting and
//! font size naming. All functions are pure.

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::data::constants::{FONT_NAMES, FONT_SIZES};
use crate::data::escapes;

lazy_static! {
    /// URLs inside already escaped text
    pub static ref URL_PATTERN: Regex = Regex::new(
        r#"(((https?|mailto):)(//([^\s/?#"]*))?([^\s?#"]*)(\?([^\s#"]*))?(#([^\s"]*))?)"#
    )
    .unwrap();
    /// Left alignment letter inside a cell format such as `{|l|}`
    pub static ref TABLE_FORMAT_PATTERN: Regex = Regex::new(r"(\{\|?)l(\|?\})").unwrap();
}

/// Escape the reserved characters `& $ % # _ { } ~ ^ \` in running text
///
/// Arrows the text fonts lack are spelled as math symbols.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match escapes::replacement(c) {
            Some(rep) => out.push_str(rep),
            None => out.push(c),
        }
    }
    out
}

/// Escape text that must keep its spaces and line breaks
///
/// Every space becomes a control space and every newline a forced line
/// break. A line starting with a space gets a small indent so TeX does
/// not drop it.
pub fn escape_latex_verbatim(text: &str) -> String {
    escape_latex(text)
        .replace(' ', "\\ ")
        .replace('\n', "~\\newline \n")
        .replace(
            "\\newline \n\\ ",
            "\\newline \n\\hspace*{0.1\\grbaseindent}\\ ",
        )
}

/// Choose the escape function for flowed or preformatted text
pub fn escape_for(preformatted: bool) -> fn(&str) -> String {
    if preformatted {
        escape_latex_verbatim
    } else {
        escape_latex
    }
}

/// Wrap URLs of escaped text in `\url{...}`
///
/// Underscores, ampersands and tildes are legal inside `\url`, so their
/// escapes are undone there. `#` and `%` stay escaped.
pub fn rewrite_urls(text: &str) -> Cow<'_, str> {
    URL_PATTERN.replace_all(text, |caps: &Captures| {
        let url = caps[1]
            .replace("\\_", "_")
            .replace("\\&", "&")
            .replace("\\~{}", "~");
        format!("\\url{{{}}}", url)
    })
}

/// LaTeX size command name for a font size in points
///
/// Returns an empty string for the normal size (12-13pt).
pub fn map_font_size(size: f64) -> &'static str {
    let idx = FONT_SIZES.iter().take_while(|&&bound| bound <= size).count();
    FONT_NAMES[idx]
}

/// Switch a left-aligned cell format to centered
pub fn center_cell_format(head: &str) -> String {
    TABLE_FORMAT_PATTERN
        .replace_all(head, "${1}c${2}")
        .into_owned()
}

/// Shortest round-trip spelling of a number, keeping a trailing `.0`
pub fn fmt_len(value: f64) -> String {
    format!("{:?}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const RESERVED: [char; 10] = ['&', '$', '%', '#', '_', '{', '}', '~', '^', '\\'];

    #[test]
    fn test_escape_each_reserved() {
        assert_eq!(escape_latex("a & b"), "a \\& b");
        assert_eq!(escape_latex("50%"), "50\\%");
        assert_eq!(escape_latex("$5"), "\\$5");
        assert_eq!(escape_latex("#1"), "\\#1");
        assert_eq!(escape_latex("a_b"), "a\\_b");
        assert_eq!(escape_latex("{x}"), "\\{x\\}");
        assert_eq!(escape_latex("~"), "\\~{}");
        assert_eq!(escape_latex("^"), "\\^{}");
        assert_eq!(escape_latex("\\"), "\\textbackslash{}");
    }

    #[test]
    fn test_escape_arrow() {
        assert_eq!(escape_latex("a → b"), "a $\\longrightarrow$ b");
    }

    #[test]
    fn test_escape_verbatim() {
        let out = escape_latex_verbatim("a b\n c");
        assert_eq!(
            out,
            "a\\ b~\\newline \n\\hspace*{0.1\\grbaseindent}\\ c"
        );
    }

    #[test]
    fn test_rewrite_urls() {
        let text = escape_latex("see https://example.org/a_b?q=1 now");
        let out = rewrite_urls(&text);
        assert_eq!(out, "see \\url{https://example.org/a_b?q=1} now");
        assert_eq!(rewrite_urls("no links here"), "no links here");
    }

    #[test]
    fn test_map_font_size() {
        assert_eq!(map_font_size(5.0), "tiny");
        assert_eq!(map_font_size(6.0), "scriptsize");
        assert_eq!(map_font_size(9.0), "footnotesize");
        assert_eq!(map_font_size(11.0), "small");
        assert_eq!(map_font_size(12.0), "");
        assert_eq!(map_font_size(13.5), "");
        assert_eq!(map_font_size(14.0), "large");
        assert_eq!(map_font_size(21.0), "huge");
        assert_eq!(map_font_size(40.0), "Huge");
    }

    #[test]
    fn test_center_cell_format() {
        assert_eq!(center_cell_format("\\multicolumn{1}{l}"), "\\multicolumn{1}{c}");
        assert_eq!(center_cell_format("\\multicolumn{2}{|l|}"), "\\multicolumn{2}{|c|}");
        assert_eq!(center_cell_format("\\multicolumn{1}{|l}"), "\\multicolumn{1}{|c}");
    }

    #[test]
    fn test_fmt_len() {
        assert_eq!(fmt_len(0.5), "0.5");
        assert_eq!(fmt_len(3.0), "3.0");
        assert_eq!(fmt_len(1.0 / 3.0), "0.3333333333333333");
    }

    /// A reserved character survives escaping only as part of an escape
    /// sequence that starts with a backslash.
    fn unescaped_reserved(out: &str) -> bool {
        let mut rest = out;
        while let Some(c) = rest.chars().next() {
            if c == '\\' {
                let tail = &rest[1..];
                let skip = ["textbackslash{}", "~{}", "^{}", "&", "%", "$", "#", "_", "{", "}"]
                    .iter()
                    .find(|seq| tail.starts_with(**seq))
                    .map(|seq| seq.len());
                match skip {
                    Some(n) => rest = &tail[n..],
                    None => return true,
                }
            } else if RESERVED.contains(&c) {
                return true;
            } else {
                rest = &rest[c.len_utf8()..];
            }
        }
        false
    }

    proptest! {
        #[test]
        fn prop_escape_leaves_no_reserved(input in "[&$%#_{}~^\\\\a-z ]{0,40}") {
            let out = escape_latex(&input);
            prop_assert!(!unescaped_reserved(&out), "{:?} -> {:?}", input, out);
        }

        #[test]
        fn prop_escape_keeps_plain_text(input in "[a-zA-Z0-9 .,;:!?]{0,40}") {
            prop_assert_eq!(escape_latex(&input), input);
        }
    }
}
