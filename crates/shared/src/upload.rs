use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::llm::InlineImage;

/// Report text used for PDF uploads; PDF text extraction is not performed.
pub const PDF_PLACEHOLDER_TEXT: &str = "[PDF content extracted would appear here]";

pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];
pub const REPORT_EXTENSIONS: [&str; 3] = ["pdf", "txt", "csv"];

/// A file as handed over by the client: declared MIME type plus base64 bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFile {
    #[serde(default)]
    pub file_name: Option<String>,
    pub mime_type: String,
    pub data_base64: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    fn from_mime_type(mime_type: &str) -> Option<Self> {
        match essence(mime_type).as_str() {
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Pdf,
    PlainText,
    Csv,
}

impl ReportFormat {
    fn from_mime_type(mime_type: &str) -> Option<Self> {
        match essence(mime_type).as_str() {
            "application/pdf" => Some(Self::Pdf),
            "text/plain" => Some(Self::PlainText),
            "text/csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("unsupported image type '{0}'; upload a JPG or PNG file")]
    UnsupportedImageType(String),
    #[error("unsupported report type '{0}'; upload a PDF, TXT or CSV file")]
    UnsupportedReportType(String),
    #[error("file content is not valid base64")]
    InvalidBase64,
    #[error("file is empty")]
    Empty,
    #[error("file exceeds the {limit} byte upload limit")]
    TooLarge { limit: usize },
    #[error("report is not valid UTF-8 text")]
    InvalidUtf8,
}

pub fn decode_image(file: &UploadedFile, max_bytes: usize) -> Result<InlineImage, UploadError> {
    let format = ImageFormat::from_mime_type(&file.mime_type)
        .ok_or_else(|| UploadError::UnsupportedImageType(file.mime_type.trim().to_string()))?;
    let data = decode_payload(&file.data_base64, max_bytes)?;

    Ok(InlineImage {
        mime_type: format.mime_type().to_string(),
        data,
    })
}

pub fn extract_report_text(file: &UploadedFile, max_bytes: usize) -> Result<String, UploadError> {
    let format = ReportFormat::from_mime_type(&file.mime_type)
        .ok_or_else(|| UploadError::UnsupportedReportType(file.mime_type.trim().to_string()))?;
    let data = decode_payload(&file.data_base64, max_bytes)?;

    match format {
        ReportFormat::Pdf => Ok(PDF_PLACEHOLDER_TEXT.to_string()),
        ReportFormat::PlainText | ReportFormat::Csv => {
            String::from_utf8(data).map_err(|_| UploadError::InvalidUtf8)
        }
    }
}

fn decode_payload(data_base64: &str, max_bytes: usize) -> Result<Vec<u8>, UploadError> {
    let trimmed = data_base64.trim();
    if trimmed.is_empty() {
        return Err(UploadError::Empty);
    }

    // Reject before decoding when the encoded size already implies an oversized file.
    if trimmed.len() / 4 * 3 > max_bytes.saturating_add(2) {
        return Err(UploadError::TooLarge { limit: max_bytes });
    }

    let data = STANDARD
        .decode(trimmed)
        .map_err(|_| UploadError::InvalidBase64)?;
    if data.is_empty() {
        return Err(UploadError::Empty);
    }
    if data.len() > max_bytes {
        return Err(UploadError::TooLarge { limit: max_bytes });
    }

    Ok(data)
}

fn essence(mime_type: &str) -> String {
    mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;

    use super::{PDF_PLACEHOLDER_TEXT, UploadError, UploadedFile, decode_image, extract_report_text};

    fn file(mime_type: &str, bytes: &[u8]) -> UploadedFile {
        UploadedFile {
            file_name: None,
            mime_type: mime_type.to_string(),
            data_base64: STANDARD.encode(bytes),
        }
    }

    #[test]
    fn decodes_supported_images_and_normalizes_jpg_mime() {
        let image = decode_image(&file("image/JPG", b"\xff\xd8\xff"), 1024)
            .expect("jpg should decode");
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.data, b"\xff\xd8\xff".to_vec());
    }

    #[test]
    fn rejects_unsupported_image_types() {
        let err = decode_image(&file("application/dicom", b"DICM"), 1024)
            .expect_err("dicom is not accepted");
        assert_eq!(
            err,
            UploadError::UnsupportedImageType("application/dicom".to_string())
        );
    }

    #[test]
    fn reads_text_and_csv_reports() {
        let text = extract_report_text(&file("text/plain; charset=utf-8", b"HbA1c 6.1%"), 1024)
            .expect("text should decode");
        assert_eq!(text, "HbA1c 6.1%");

        let csv = extract_report_text(&file("text/csv", b"test,value\nLDL,130"), 1024)
            .expect("csv should decode");
        assert_eq!(csv, "test,value\nLDL,130");
    }

    #[test]
    fn pdf_reports_use_placeholder_text() {
        let text = extract_report_text(&file("application/pdf", b"%PDF-1.7"), 1024)
            .expect("pdf should be accepted");
        assert_eq!(text, PDF_PLACEHOLDER_TEXT);
    }

    #[test]
    fn rejects_bad_payloads() {
        assert_eq!(
            extract_report_text(&file("text/plain", &[0xff, 0xfe, 0x00]), 1024),
            Err(UploadError::InvalidUtf8)
        );
        assert_eq!(
            extract_report_text(&file("text/plain", b"0123456789"), 4),
            Err(UploadError::TooLarge { limit: 4 })
        );

        let mut invalid = file("image/png", b"png");
        invalid.data_base64 = "not base64!".to_string();
        assert_eq!(decode_image(&invalid, 1024), Err(UploadError::InvalidBase64));

        invalid.data_base64 = "   ".to_string();
        assert_eq!(decode_image(&invalid, 1024), Err(UploadError::Empty));
    }
}
