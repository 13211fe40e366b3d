//! Source format detection for uploaded documents.
//!
//! The layout service accepts PDFs and common raster images. Uploads are
//! checked here before any analysis is requested.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Format of an uploaded source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// PDF document
    Pdf,
    /// PNG image
    Png,
    /// JPEG image
    Jpeg,
    /// TIFF image
    Tiff,
    /// BMP image
    Bmp,
    /// HEIF/HEIC image
    Heif,
}

impl SourceFormat {
    /// MIME type of the format.
    pub fn mime_type(self) -> &'static str {
        match self {
            SourceFormat::Pdf => "application/pdf",
            SourceFormat::Png => "image/png",
            SourceFormat::Jpeg => "image/jpeg",
            SourceFormat::Tiff => "image/tiff",
            SourceFormat::Bmp => "image/bmp",
            SourceFormat::Heif => "image/heif",
        }
    }

    /// Conventional file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            SourceFormat::Pdf => "pdf",
            SourceFormat::Png => "png",
            SourceFormat::Jpeg => "jpg",
            SourceFormat::Tiff => "tiff",
            SourceFormat::Bmp => "bmp",
            SourceFormat::Heif => "heic",
        }
    }

    /// Check if the format is a raster image.
    pub fn is_image(self) -> bool {
        !matches!(self, SourceFormat::Pdf)
    }

    /// Resolve a declared MIME type (parameters such as `; charset=` are ignored).
    pub fn from_mime_type(mime: &str) -> Result<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim().to_lowercase();
        match essence.as_str() {
            "application/pdf" => Ok(SourceFormat::Pdf),
            "image/png" => Ok(SourceFormat::Png),
            "image/jpeg" | "image/jpg" => Ok(SourceFormat::Jpeg),
            "image/tiff" => Ok(SourceFormat::Tiff),
            "image/bmp" => Ok(SourceFormat::Bmp),
            "image/heif" | "image/heic" => Ok(SourceFormat::Heif),
            _ => Err(Error::UnsupportedContentType(mime.to_string())),
        }
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SourceFormat::Pdf => "PDF",
            SourceFormat::Png => "PNG",
            SourceFormat::Jpeg => "JPEG",
            SourceFormat::Tiff => "TIFF",
            SourceFormat::Bmp => "BMP",
            SourceFormat::Heif => "HEIF",
        };
        f.write_str(name)
    }
}

const PDF_MAGIC: &[u8] = b"%PDF-";
const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";
const JPEG_MAGIC: &[u8] = b"\xFF\xD8\xFF";
const TIFF_LE_MAGIC: &[u8] = b"II*\x00";
const TIFF_BE_MAGIC: &[u8] = b"MM\x00*";
const BMP_MAGIC: &[u8] = b"BM";
const HEIF_BRANDS: &[&[u8]] = &[b"heic", b"heix", b"hevc", b"hevx", b"heim", b"heis", b"mif1", b"msf1"];

/// Bytes needed to recognize every supported format.
const HEADER_LEN: usize = 16;

/// Detect the source format from the leading bytes of a file.
///
/// # Returns
/// * `Ok(SourceFormat)` for PDFs and supported images
/// * `Err(Error::UnsupportedFormat)` otherwise
pub fn detect_format_from_bytes(data: &[u8]) -> Result<SourceFormat> {
    if data.starts_with(PDF_MAGIC) {
        return Ok(SourceFormat::Pdf);
    }
    if data.starts_with(PNG_MAGIC) {
        return Ok(SourceFormat::Png);
    }
    if data.starts_with(JPEG_MAGIC) {
        return Ok(SourceFormat::Jpeg);
    }
    if data.starts_with(TIFF_LE_MAGIC) || data.starts_with(TIFF_BE_MAGIC) {
        return Ok(SourceFormat::Tiff);
    }
    if data.len() >= 12 && &data[4..8] == b"ftyp" && HEIF_BRANDS.contains(&&data[8..12]) {
        return Ok(SourceFormat::Heif);
    }
    // "BM" alone is too weak; require the reserved header fields to be zero.
    if data.len() >= 10 && data.starts_with(BMP_MAGIC) && data[6..10] == [0, 0, 0, 0] {
        return Ok(SourceFormat::Bmp);
    }
    Err(Error::UnsupportedFormat)
}

/// Detect the source format of a file on disk.
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<SourceFormat> {
    let file = File::open(path)?;
    let mut header = Vec::with_capacity(HEADER_LEN);
    file.take(HEADER_LEN as u64).read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Check that bytes match the declared MIME type of an upload.
///
/// An undeclared or unsupported content type is rejected before the
/// bytes are looked at.
pub fn check_upload(content_type: &str, data: &[u8]) -> Result<SourceFormat> {
    let declared = SourceFormat::from_mime_type(content_type)?;
    let detected = detect_format_from_bytes(data)?;
    if declared != detected {
        log::warn!(
            "Upload declared as {} but looks like {}",
            declared.mime_type(),
            detected.mime_type()
        );
        return Err(Error::UnsupportedContentType(format!(
            "{} (content is {})",
            content_type, detected
        )));
    }
    Ok(detected)
}

/// PDF version from a PDF header (e.g. "1.7"), if well-formed.
pub fn pdf_version(data: &[u8]) -> Option<String> {
    let bytes = data.get(PDF_MAGIC.len()..PDF_MAGIC.len() + 3)?;
    match bytes {
        [major, b'.', minor] if major.is_ascii_digit() && minor.is_ascii_digit() => {
            Some(String::from_utf8_lossy(bytes).into_owned())
        }
        _ => None,
    }
}

/// Check if bytes are a supported source document.
pub fn is_supported_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_pdf() {
        let data = b"%PDF-1.7\n%\xe2\xe3\xcf\xd3";
        assert_eq!(detect_format_from_bytes(data).unwrap(), SourceFormat::Pdf);
        assert_eq!(pdf_version(data), Some("1.7".to_string()));
    }

    #[test]
    fn test_detect_images() {
        assert_eq!(
            detect_format_from_bytes(b"\x89PNG\r\n\x1a\n\x00\x00").unwrap(),
            SourceFormat::Png
        );
        assert_eq!(
            detect_format_from_bytes(b"\xFF\xD8\xFF\xE0\x00\x10JFIF").unwrap(),
            SourceFormat::Jpeg
        );
        assert_eq!(detect_format_from_bytes(b"II*\x00\x08\x00").unwrap(), SourceFormat::Tiff);
        assert_eq!(detect_format_from_bytes(b"MM\x00*\x00\x08").unwrap(), SourceFormat::Tiff);
        assert_eq!(
            detect_format_from_bytes(b"\x00\x00\x00\x18ftypheic\x00\x00").unwrap(),
            SourceFormat::Heif
        );
        assert_eq!(
            detect_format_from_bytes(b"BM\x36\x00\x0c\x00\x00\x00\x00\x00\x36\x00").unwrap(),
            SourceFormat::Bmp
        );
    }

    #[test]
    fn test_detect_unsupported() {
        assert!(matches!(
            detect_format_from_bytes(b"<!DOCTYPE html>"),
            Err(Error::UnsupportedFormat)
        ));
        assert!(matches!(detect_format_from_bytes(b""), Err(Error::UnsupportedFormat)));
        assert!(!is_supported_bytes(b"BMW is a car"));
        assert!(!is_supported_bytes(b"%PDF"));
    }

    #[test]
    fn test_pdf_version_malformed() {
        assert_eq!(pdf_version(b"%PDF-x.y"), None);
        assert_eq!(pdf_version(b"%PDF-"), None);
        assert_eq!(pdf_version(b"%PDF-2.0"), Some("2.0".to_string()));
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(SourceFormat::from_mime_type("application/pdf").unwrap(), SourceFormat::Pdf);
        assert_eq!(
            SourceFormat::from_mime_type("Image/JPEG; q=1").unwrap(),
            SourceFormat::Jpeg
        );
        assert!(matches!(
            SourceFormat::from_mime_type("text/html"),
            Err(Error::UnsupportedContentType(_))
        ));
        assert_eq!(SourceFormat::Png.mime_type(), "image/png");
        assert!(SourceFormat::Png.is_image());
        assert!(!SourceFormat::Pdf.is_image());
    }

    #[test]
    fn test_check_upload() {
        assert_eq!(
            check_upload("application/pdf", b"%PDF-1.4\n").unwrap(),
            SourceFormat::Pdf
        );
        let err = check_upload("text/plain", b"%PDF-1.4\n").unwrap_err();
        assert_eq!(err.status_code(), 400);
        let err = check_upload("image/png", b"%PDF-1.4\n").unwrap_err();
        assert!(matches!(err, Error::UnsupportedContentType(_)));
    }
}
