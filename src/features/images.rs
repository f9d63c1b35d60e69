//! Picture preparation for `\includegraphics`
//!
//! pdfLaTeX reads JPEG and PNG only. Other formats are converted to a
//! JPEG next to the source through an [`ImageConverter`]; the default
//! converter uses the `image` crate when the `images` feature is on.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Extensions `\includegraphics` takes without conversion
pub const DIRECT_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Pixel size of a converted picture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
}

impl ImageInfo {
    pub fn is_portrait(&self) -> bool {
        self.height > self.width
    }
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image conversion not available in this build")]
    Unavailable,
    #[error("{0}")]
    Convert(String),
}

/// Converts a picture into a format LaTeX can include
pub trait ImageConverter {
    /// Write `src` as a JPEG to `dest` and report its pixel size
    fn convert(&self, src: &Path, dest: &Path) -> Result<ImageInfo, ImageError>;
}

/// Converter backed by the `image` crate
#[cfg(feature = "images")]
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterConverter;

#[cfg(feature = "images")]
impl ImageConverter for RasterConverter {
    fn convert(&self, src: &Path, dest: &Path) -> Result<ImageInfo, ImageError> {
        let img = ::image::open(src).map_err(|e| ImageError::Convert(e.to_string()))?;
        let info = ImageInfo {
            width: img.width(),
            height: img.height(),
        };
        // JPEG has no alpha channel
        ::image::DynamicImage::ImageRgb8(img.to_rgb8())
            .save_with_format(dest, ::image::ImageFormat::Jpeg)
            .map_err(|e| ImageError::Convert(e.to_string()))?;
        log::debug!("converted {} to {}", src.display(), dest.display());
        Ok(info)
    }
}

/// Converter for builds without image support; every conversion fails
#[derive(Debug, Clone, Copy, Default)]
pub struct NoImageConverter;

impl ImageConverter for NoImageConverter {
    fn convert(&self, _src: &Path, _dest: &Path) -> Result<ImageInfo, ImageError> {
        Err(ImageError::Unavailable)
    }
}

/// Best converter this build has
pub fn default_converter() -> Box<dyn ImageConverter> {
    #[cfg(feature = "images")]
    {
        Box::new(RasterConverter)
    }
    #[cfg(not(feature = "images"))]
    {
        Box::new(NoImageConverter)
    }
}

/// Whether `path` has to be converted before inclusion
pub fn needs_conversion(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);
    !matches!(ext, Some(ext) if DIRECT_EXTENSIONS.contains(&ext.as_str()))
}

/// File the converted picture is written to: the source with `.jpg`
pub fn converted_path(path: &Path) -> PathBuf {
    path.with_extension("jpg")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_conversion() {
        assert!(!needs_conversion(Path::new("a/photo.jpg")));
        assert!(!needs_conversion(Path::new("photo.JPEG")));
        assert!(!needs_conversion(Path::new("scan.png")));
        assert!(needs_conversion(Path::new("scan.gif")));
        assert!(needs_conversion(Path::new("scan")));
    }

    #[test]
    fn test_converted_path() {
        assert_eq!(converted_path(Path::new("a/b.tiff")), PathBuf::from("a/b.jpg"));
    }

    #[test]
    fn test_no_converter_fails() {
        let err = NoImageConverter
            .convert(Path::new("a.gif"), Path::new("a.jpg"))
            .unwrap_err();
        assert!(matches!(err, ImageError::Unavailable));
    }

    #[cfg(feature = "images")]
    #[test]
    fn test_raster_converter_writes_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("tall.png");
        ::image::RgbaImage::new(4, 8).save(&src).unwrap();
        let dest = converted_path(&dir.path().join("tall.gif"));

        let info = RasterConverter.convert(&src, &dest).unwrap();
        assert_eq!(info, ImageInfo { width: 4, height: 8 });
        assert!(info.is_portrait());
        assert!(dest.exists());
    }

    #[cfg(feature = "images")]
    #[test]
    fn test_raster_converter_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = RasterConverter
            .convert(&dir.path().join("missing.gif"), &dir.path().join("missing.jpg"))
            .unwrap_err();
        assert!(matches!(err, ImageError::Convert(_)));
    }
}
