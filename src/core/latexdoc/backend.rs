//! Output sink of one document
//!
//! All text is collected in memory and written to the target in one go
//! on close, so a document that fails half way leaves no partial file.

use crate::utils::error::{DocGenError, DocGenResult};
use crate::utils::files::OutputTarget;

#[derive(Debug, Default)]
pub struct LatexBackend {
    target: Option<OutputTarget>,
    buffer: String,
}

impl LatexBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new document, dropping anything left from a previous one
    pub fn open(&mut self, target: OutputTarget) {
        self.buffer.clear();
        self.target = Some(target);
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    pub fn write(&mut self, text: &str) -> DocGenResult<()> {
        if !self.is_open() {
            return Err(DocGenError::NotOpen);
        }
        self.buffer.push_str(text);
        Ok(())
    }

    /// Write the buffered text to the target; the text stays readable
    pub fn close(&mut self) -> DocGenResult<()> {
        let target = self.target.take().ok_or(DocGenError::NotOpen)?;
        target.commit(&self.buffer)?;
        Ok(())
    }

    pub fn contents(&self) -> &str {
        &self.buffer
    }

    pub fn into_contents(self) -> String {
        self.buffer
    }
}
