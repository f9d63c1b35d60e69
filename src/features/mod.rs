//! Feature modules - optional capabilities around the document backend
//!
//! This module contains:
//! - Picture conversion for formats LaTeX cannot include
//! - Replay of recorded document scripts

pub mod images;
pub mod replay;

// Re-export commonly used types
pub use images::{default_converter, ImageConverter, ImageError, ImageInfo, NoImageConverter};
#[cfg(feature = "images")]
pub use images::RasterConverter;
pub use replay::{DocCall, DocScript};
