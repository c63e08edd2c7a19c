use image::{ImageFormat, ImageReader, RgbImage};
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

/// An encoded image as handed to the analysis routine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    file_name: String,
    mime_type: String,
    bytes: Arc<[u8]>,
}

impl ImageData {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let mime_type = mime_for(path);

        Ok(Self::new(file_name, mime_type, bytes))
    }

    /// JPEG-encode a captured video frame.
    pub fn from_rgb_frame(frame: &RgbImage) -> Result<Self, image::ImageError> {
        let mut jpeg_bytes = Cursor::new(Vec::new());
        frame.write_to(&mut jpeg_bytes, ImageFormat::Jpeg)?;

        Ok(Self::new("capture.jpg", "image/jpeg", jpeg_bytes.into_inner()))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Original pixel size, read from the encoded header.
    pub fn natural_size(&self) -> Option<(u32, u32)> {
        ImageReader::new(Cursor::new(&self.bytes[..]))
            .with_guessed_format()
            .ok()?
            .into_dimensions()
            .ok()
    }
}

fn mime_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("bmp") => "image/bmp",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captured_frame_keeps_its_size() {
        let frame = RgbImage::from_pixel(64, 48, image::Rgb([200, 40, 40]));
        let image = ImageData::from_rgb_frame(&frame).unwrap();

        assert_eq!(image.file_name(), "capture.jpg");
        assert_eq!(image.mime_type(), "image/jpeg");
        assert_eq!(image.natural_size(), Some((64, 48)));
    }

    #[test]
    fn undecodable_bytes_have_no_size() {
        let image = ImageData::new("notes.txt", "text/plain", b"hello".to_vec());
        assert_eq!(image.natural_size(), None);
    }

    #[test]
    fn mime_type_follows_extension() {
        assert_eq!(mime_for(Path::new("weld.JPG")), "image/jpeg");
        assert_eq!(mime_for(Path::new("weld.png")), "image/png");
        assert_eq!(mime_for(Path::new("weld")), "application/octet-stream");
    }
}
