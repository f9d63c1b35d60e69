//! Identifiers for multicolumn span widths
//!
//! Each cell spanning several columns gets its own length
//! `\grspanwidth<id>`. TeX control sequence names cannot contain digits,
//! so ids count in base 26 over lowercase letters: `aaa`, `aab`, ... `zzz`.

use crate::data::constants::SPAN_COUNTER_WIDTH;
use crate::utils::error::{DocGenError, DocGenResult};

/// Finite sequence of letter ids, restarted for every table
#[derive(Debug, Clone)]
pub struct SpanCounter {
    width: usize,
    current: Option<Vec<u8>>,
}

impl SpanCounter {
    pub fn new() -> Self {
        Self::with_width(SPAN_COUNTER_WIDTH)
    }

    /// Counter over ids of `width` letters; `width` must be at least 1
    pub fn with_width(width: usize) -> Self {
        let width = width.max(1);
        SpanCounter {
            width,
            current: Some(vec![b'a'; width]),
        }
    }

    /// Next id, or a capacity error once every id was handed out
    pub fn next_id(&mut self) -> DocGenResult<String> {
        self.next()
            .ok_or(DocGenError::SpanCounterExhausted { width: self.width })
    }

    /// Number of ids the counter yields in total
    pub fn capacity(&self) -> usize {
        26usize.saturating_pow(self.width as u32)
    }
}

impl Default for SpanCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for SpanCounter {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let digits = self.current.take()?;
        let id: String = digits.iter().map(|&b| b as char).collect();

        let mut succ = digits;
        let mut carried = true;
        for d in succ.iter_mut().rev() {
            if *d < b'z' {
                *d += 1;
                carried = false;
                break;
            }
            *d = b'a';
        }
        if !carried {
            self.current = Some(succ);
        }
        Some(id)
    }
}
