use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// A document carried inline as base64, the way the model API expects files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineDocument {
    pub mime_type: String,
    /// Base64-encoded file content
    pub data: String,
}

/// User-supplied material for analysis: free text, an uploaded document, or
/// both. Blank text counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<InlineDocument>,
}

impl DocumentSource {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            file: None,
        }
    }

    pub fn from_file_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            text: None,
            file: Some(InlineDocument {
                mime_type: mime_type.into(),
                data: base64::engine::general_purpose::STANDARD.encode(bytes),
            }),
        }
    }

    pub fn trimmed_text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.trimmed_text().is_none() && self.file.is_none()
    }
}

/// Mime type for the upload formats the advisor accepts.
pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "pdf" => Some("application/pdf"),
        "csv" => Some("text/csv"),
        "txt" => Some("text/plain"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        _ => None,
    }
}

/// Plain-text formats are sent as text parts rather than inline files.
pub fn is_text_extension(ext: &str) -> bool {
    matches!(ext.to_ascii_lowercase().as_str(), "txt" | "csv")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_bytes_are_base64_encoded() {
        let source = DocumentSource::from_file_bytes(b"hello", "application/pdf");
        let file = source.file.unwrap();
        assert_eq!(file.data, "aGVsbG8=");
        assert_eq!(file.mime_type, "application/pdf");
    }

    #[test]
    fn test_blank_text_counts_as_empty() {
        assert!(DocumentSource::from_text("   \n").is_empty());
        assert!(DocumentSource::default().is_empty());
        assert!(!DocumentSource::from_text("loan contract").is_empty());
        assert!(!DocumentSource::from_file_bytes(b"%PDF", "application/pdf").is_empty());
    }

    #[test]
    fn test_mime_inference() {
        assert_eq!(mime_for_extension("pdf"), Some("application/pdf"));
        assert_eq!(mime_for_extension("JPG"), Some("image/jpeg"));
        assert_eq!(mime_for_extension("png"), Some("image/png"));
        assert_eq!(mime_for_extension("docx"), None);
        assert!(is_text_extension("txt"));
        assert!(is_text_extension("CSV"));
        assert!(!is_text_extension("pdf"));
    }
}
