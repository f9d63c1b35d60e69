//! Constants shared by the document and table renderers
//!
//! Font size thresholds, table capacity limits and the private markers
//! that travel inside buffered cell text.

// ============================================================================
// Font sizes
// ============================================================================

/// Upper bounds (exclusive) in points for each LaTeX size name below.
/// Anything under 6pt is `tiny`, 12-13pt is the normal size and 22pt or
/// more is `Huge`.
pub const FONT_SIZES: [f64; 9] = [6.0, 8.0, 10.0, 12.0, 14.0, 16.0, 18.0, 20.0, 22.0];

/// LaTeX size command names, one more than [`FONT_SIZES`]
pub const FONT_NAMES: [&str; 10] = [
    "tiny",
    "scriptsize",
    "footnotesize",
    "small",
    "",
    "large",
    "Large",
    "LARGE",
    "huge",
    "Huge",
];

/// Base font size option for `\documentclass`
pub const DEFAULT_FONT_SIZE: &str = "12pt";

// ============================================================================
// Tables
// ============================================================================

/// Column ids are the letters `a`..=`z`
pub const MAX_TABLE_COLUMNS: usize = 26;

/// Width of the multicolumn id counter: `aaa` to `zzz` gives 17576 spans
/// per table.
pub const SPAN_COUNTER_WIDTH: usize = 3;

/// Marks the end of one paragraph inside a table cell.
///
/// Every literal `&` in user text is escaped to `\&` before it reaches a
/// cell, so two bare ampersands cannot come from content. The marker is
/// consumed by repacking and width measurement and never reaches the
/// output as-is.
pub const SEPARATION_PAT: &str = "&&";

/// Line break used where a separator stood in a rendered cell
pub const CELL_LINE_BREAK: &str = "~\\newline \n";

/// Macro that places a picture; cell text starting with it is a picture cell
pub const PICTURE_MACRO: &str = "\\grmkpicture";

/// Column separator between rendered cells
pub const COLUMN_SEPARATOR: &str = " & ";

/// Default row terminator
pub const ROW_TERMINATOR: &str = "\\\\ ";

// ============================================================================
// Text
// ============================================================================

/// Escaped form of the host's 13-underscore "unknown value" blank
pub const MISSING_DATA_BLANK: &str =
    "\\_\\_\\_\\_\\_\\_\\_\\_\\_\\_\\_\\_\\_";

/// Drawn rule that replaces [`MISSING_DATA_BLANK`]
pub const MISSING_DATA_RULE: &str = "\\underline{\\hspace{3\\grbaseindent}}";

/// Paragraph break inside note markup, split on by flowed notes
pub const NOTE_PARAGRAPH_BREAK: &str = "%\n%\n ";
