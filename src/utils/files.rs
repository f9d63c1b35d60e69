//! Output targets for generated documents
//!
//! A document is rendered into an in-memory buffer and handed to its
//! [`OutputTarget`] when it is closed. File targets always carry the
//! `.tex` extension; memory targets keep the text on the document only,
//! which is what tests and the replay driver use.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Extension every file target is forced to
pub const TEX_EXTENSION: &str = "tex";

/// Where a closed document goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write to the given `.tex` file on close
    File(PathBuf),
    /// Keep the text in memory only
    Memory,
}

impl OutputTarget {
    /// File target, appending `.tex` when the name lacks it
    pub fn file(path: impl AsRef<Path>) -> Self {
        OutputTarget::File(tex_filename(path))
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            OutputTarget::File(p) => Some(p),
            OutputTarget::Memory => None,
        }
    }

    /// Persist the finished document
    pub fn commit(&self, content: &str) -> io::Result<()> {
        match self {
            OutputTarget::File(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        fs::create_dir_all(parent)?;
                    }
                }
                let mut file = io::BufWriter::new(fs::File::create(path)?);
                file.write_all(content.as_bytes())?;
                file.flush()?;
                log::info!("wrote {} bytes to {}", content.len(), path.display());
                Ok(())
            }
            OutputTarget::Memory => Ok(()),
        }
    }
}

/// Make sure a file name ends with `.tex`
///
/// `report` becomes `report.tex`, `report.tex` is kept, and `report.txt`
/// becomes `report.txt.tex` since only the final extension counts.
pub fn tex_filename(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    match path.extension() {
        Some(ext) if ext == TEX_EXTENSION => path.to_path_buf(),
        _ => {
            let mut name = path.as_os_str().to_owned();
            name.push(".");
            name.push(TEX_EXTENSION);
            PathBuf::from(name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tex_filename_appends_extension() {
        assert_eq!(tex_filename("report"), PathBuf::from("report.tex"));
        assert_eq!(tex_filename("out/report.tex"), PathBuf::from("out/report.tex"));
        assert_eq!(tex_filename("report.txt"), PathBuf::from("report.txt.tex"));
    }

    #[test]
    fn test_memory_target_has_no_path() {
        assert!(OutputTarget::Memory.path().is_none());
        assert!(OutputTarget::Memory.commit("ignored").is_ok());
    }

    #[test]
    fn test_file_target_commit() {
        let dir = tempfile::tempdir().unwrap();
        let target = OutputTarget::file(dir.path().join("nested").join("doc"));
        target.commit("\\begin{document}%\n").unwrap();
        let written = fs::read_to_string(dir.path().join("nested").join("doc.tex")).unwrap();
        assert_eq!(written, "\\begin{document}%\n");
    }
}
