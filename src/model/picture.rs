//! Picture leaves holding raw image bytes.

use std::fmt;
use std::sync::Arc;

use super::node::node_variant;
use crate::style::Style;

/// An embedded image.
#[derive(Debug, Clone, PartialEq)]
pub struct Picture {
    data: Vec<u8>,
    format: PictureFormat,
    description: Option<String>,
    style: Option<Arc<Style>>,
}

impl Picture {
    /// Create a picture, inferring its format from the data.
    pub fn new(data: Vec<u8>) -> Self {
        let format = PictureFormat::detect(&data);
        Self {
            data,
            format,
            description: None,
            style: None,
        }
    }

    /// Set the alternative text.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Raw image bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Inferred image format.
    pub fn format(&self) -> PictureFormat {
        self.format
    }

    /// Alternative text.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Size of the image data in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

node_variant!(Picture);

/// Image format inferred from magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PictureFormat {
    Jpeg,
    Png,
    Gif,
    Bmp,
    Tiff,
    Webp,
    Unknown,
}

impl PictureFormat {
    /// Detect the format from the leading bytes.
    pub fn detect(data: &[u8]) -> Self {
        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return PictureFormat::Jpeg;
        }

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return PictureFormat::Png;
        }

        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            return PictureFormat::Gif;
        }

        // TIFF: little-endian or big-endian byte order mark
        if data.starts_with(&[0x49, 0x49, 0x2A, 0x00]) || data.starts_with(&[0x4D, 0x4D, 0x00, 0x2A])
        {
            return PictureFormat::Tiff;
        }

        if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return PictureFormat::Webp;
        }

        if data.starts_with(b"BM") {
            return PictureFormat::Bmp;
        }

        PictureFormat::Unknown
    }

    /// MIME type.
    pub fn mime_type(self) -> &'static str {
        match self {
            PictureFormat::Jpeg => "image/jpeg",
            PictureFormat::Png => "image/png",
            PictureFormat::Gif => "image/gif",
            PictureFormat::Bmp => "image/bmp",
            PictureFormat::Tiff => "image/tiff",
            PictureFormat::Webp => "image/webp",
            PictureFormat::Unknown => "application/octet-stream",
        }
    }

    /// Conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            PictureFormat::Jpeg => "jpg",
            PictureFormat::Png => "png",
            PictureFormat::Gif => "gif",
            PictureFormat::Bmp => "bmp",
            PictureFormat::Tiff => "tiff",
            PictureFormat::Webp => "webp",
            PictureFormat::Unknown => "bin",
        }
    }
}

impl fmt::Display for PictureFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format() {
        let jpeg = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46];
        assert_eq!(PictureFormat::detect(&jpeg), PictureFormat::Jpeg);

        let png = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(PictureFormat::detect(&png), PictureFormat::Png);

        let webp = b"RIFF\x00\x00\x00\x00WEBPVP8 ".to_vec();
        assert_eq!(PictureFormat::detect(&webp), PictureFormat::Webp);

        assert_eq!(PictureFormat::detect(&[0, 0, 0]), PictureFormat::Unknown);
    }

    #[test]
    fn test_picture_infers_format() {
        let pic = Picture::new(b"GIF89a....".to_vec()).with_description("logo");
        assert_eq!(pic.format(), PictureFormat::Gif);
        assert_eq!(pic.format().mime_type(), "image/gif");
        assert_eq!(pic.description(), Some("logo"));
        assert_eq!(pic.size(), 10);
    }
}
