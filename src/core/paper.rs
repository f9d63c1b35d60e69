//! Paper size, orientation and margins
//!
//! Resolved once when a document is opened into the `\documentclass`
//! options and the `geometry` package line.

use serde::{Deserialize, Serialize};

/// Named paper size with its dimensions in cm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperSize {
    pub name: String,
    pub width: f64,
    pub height: f64,
}

impl PaperSize {
    pub fn new(name: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            name: name.into(),
            width,
            height,
        }
    }

    pub fn custom(width: f64, height: f64) -> Self {
        Self::new("Custom Size", width, height)
    }

    /// Paper option understood by `geometry` and the article class
    pub fn latex_name(&self) -> String {
        let name = self.name.to_lowercase();
        match name.as_str() {
            "custom size" => format!(
                "papersize={{{}cm,{}cm}}",
                fmt_cm(self.width),
                fmt_cm(self.height)
            ),
            "a" | "b" | "c" | "d" | "e" => format!("ansi{}paper", name),
            _ => format!("{}paper", name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

/// Page setup of one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaperStyle {
    pub size: PaperSize,
    pub orientation: Orientation,
    pub left_margin: f64,
    pub right_margin: f64,
    pub top_margin: f64,
    pub bottom_margin: f64,
}

impl Default for PaperStyle {
    fn default() -> Self {
        Self::a4()
    }
}

impl PaperStyle {
    pub fn a4() -> Self {
        Self {
            size: PaperSize::new("A4", 21.0, 29.7),
            orientation: Orientation::Portrait,
            left_margin: 2.0,
            right_margin: 2.0,
            top_margin: 2.0,
            bottom_margin: 2.0,
        }
    }

    pub fn letter() -> Self {
        Self {
            size: PaperSize::new("Letter", 21.59, 27.94),
            ..Self::a4()
        }
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_margins(mut self, left: f64, right: f64, top: f64, bottom: f64) -> Self {
        self.left_margin = left;
        self.right_margin = right;
        self.top_margin = top;
        self.bottom_margin = bottom;
        self
    }

    /// Margin options for `geometry`, collapsed where sides agree
    pub fn latex_margins(&self) -> String {
        let (l, r, t, b) = (
            self.left_margin,
            self.right_margin,
            self.top_margin,
            self.bottom_margin,
        );
        if l == r && r == t && t == b {
            return format!("margin={}cm", fmt_cm(l));
        }
        let mut margin = if l == r {
            format!("hmargin={}cm", fmt_cm(l))
        } else {
            format!("hmargin={{{}cm,{}cm}}", fmt_cm(l), fmt_cm(r))
        };
        if t == b {
            margin.push_str(&format!(",vmargin={}cm", fmt_cm(t)));
        } else {
            margin.push_str(&format!(",vmargin={{{}cm,{}cm}}", fmt_cm(t), fmt_cm(b)));
        }
        margin
    }

    /// `\documentclass` line for the given base font size
    pub fn document_class(&self, font_size: &str) -> String {
        format!(
            "\\documentclass[{},{},{}]{{article}}\n",
            font_size,
            self.size.latex_name(),
            self.orientation.as_str()
        )
    }

    /// `geometry` package line
    pub fn geometry(&self) -> String {
        format!(
            "\\usepackage[{},{}]{{geometry}}\n",
            self.size.latex_name(),
            self.latex_margins()
        )
    }
}

/// Shortest round-trip spelling of a length, keeping a trailing `.0`
pub(crate) fn fmt_cm(value: f64) -> String {
    format!("{:?}", value)
}
