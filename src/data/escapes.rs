//! LaTeX escape mappings
//!
//! Characters with a special meaning to TeX and their safe spelling in
//! running text. The replacement never contains another reserved
//! character outside of a command, so escaping is a single left-to-right
//! pass with no re-scanning.

use phf::phf_map;

/// Reserved TeX character to safe replacement
pub static LATEX_ESCAPES: phf::Map<char, &'static str> = phf_map! {
    '&' => "\\&",
    '%' => "\\%",
    '$' => "\\$",
    '#' => "\\#",
    '_' => "\\_",
    '{' => "\\{",
    '}' => "\\}",
    '~' => "\\~{}",
    '^' => "\\^{}",
    '\\' => "\\textbackslash{}",
};

/// Characters the default fonts cannot typeset, spelled out in math mode
pub static UNSUPPORTED_GLYPHS: phf::Map<char, &'static str> = phf_map! {
    '→' => "$\\longrightarrow$",
    '←' => "$\\longleftarrow$",
    '↔' => "$\\longleftrightarrow$",
};

/// Check if a character must be escaped in running text
#[inline]
pub fn is_reserved(c: char) -> bool {
    LATEX_ESCAPES.contains_key(&c)
}

/// Get the replacement for a character, if it needs one
#[inline]
pub fn replacement(c: char) -> Option<&'static str> {
    LATEX_ESCAPES
        .get(&c)
        .or_else(|| UNSUPPORTED_GLYPHS.get(&c))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_set() {
        for c in ['&', '$', '%', '#', '_', '{', '}', '~', '^', '\\'] {
            assert!(is_reserved(c), "{c} should be reserved");
        }
        assert!(!is_reserved('a'));
        assert!(!is_reserved('→'));
    }

    #[test]
    fn test_replacement() {
        assert_eq!(replacement('\\'), Some("\\textbackslash{}"));
        assert_eq!(replacement('→'), Some("$\\longrightarrow$"));
        assert_eq!(replacement('x'), None);
    }
}
