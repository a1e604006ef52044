// src/models/document.rs

use std::{fmt, path::Path};

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const PPTX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// Document formats accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Pptx,
}

impl DocumentFormat {
    /// Resolves the format a client declared for an upload.
    ///
    /// The MIME type wins when it names a known format; otherwise the file
    /// extension decides. Content is never inspected.
    pub fn from_declared(content_type: Option<&str>, file_name: Option<&str>) -> Option<Self> {
        content_type
            .and_then(Self::from_mime)
            .or_else(|| file_name.and_then(Self::from_file_name))
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        // Ignore parameters such as "; charset=binary".
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            PDF_MIME => Some(Self::Pdf),
            DOCX_MIME => Some(Self::Docx),
            PPTX_MIME => Some(Self::Pptx),
            _ => None,
        }
    }

    pub fn from_file_name(name: &str) -> Option<Self> {
        let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "pptx" => Some(Self::Pptx),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Pptx => "pptx",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Text extracted from one uploaded document, pages concatenated in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentText(String);

impl DocumentText {
    pub fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

/// An uploaded file as received from the client.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn declared_format(&self) -> Option<DocumentFormat> {
        DocumentFormat::from_declared(self.content_type.as_deref(), self.file_name.as_deref())
    }

    /// What the client called the file, for messages.
    pub fn describe(&self) -> String {
        match (&self.file_name, &self.content_type) {
            (Some(name), _) => name.clone(),
            (None, Some(mime)) => mime.clone(),
            (None, None) => "unnamed upload".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_type_takes_precedence_over_extension() {
        assert_eq!(
            DocumentFormat::from_declared(Some(PDF_MIME), Some("notes.docx")),
            Some(DocumentFormat::Pdf)
        );
    }

    #[test]
    fn falls_back_to_extension_for_generic_mime() {
        assert_eq!(
            DocumentFormat::from_declared(Some("application/octet-stream"), Some("Slides.PPTX")),
            Some(DocumentFormat::Pptx)
        );
    }

    #[test]
    fn mime_parameters_are_ignored() {
        assert_eq!(
            DocumentFormat::from_mime("application/pdf; charset=binary"),
            Some(DocumentFormat::Pdf)
        );
    }

    #[test]
    fn unknown_formats_are_rejected() {
        assert_eq!(DocumentFormat::from_declared(Some("text/plain"), Some("a.txt")), None);
        assert_eq!(DocumentFormat::from_declared(None, Some("README")), None);
        assert_eq!(DocumentFormat::from_declared(None, None), None);
    }
}
