// src/services/extractor.rs

use std::{path::Path, sync::Arc};

use async_trait::async_trait;
use lopdf::Document;

use crate::{
    config::Config,
    models::document::{DocumentFormat, DocumentText, Upload},
};

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("unsupported file type '{0}': upload a PDF, Word (.docx) or PowerPoint (.pptx) file")]
    UnsupportedFormat(String),
    #[error("could not convert the {format} file to PDF: {detail}")]
    Conversion {
        format: DocumentFormat,
        detail: String,
    },
    #[error("could not read the PDF: {0}")]
    Pdf(String),
}

/// Converts office documents to PDF.
#[async_trait]
pub trait DocumentConverter: Send + Sync {
    async fn to_pdf(&self, bytes: &[u8], format: DocumentFormat) -> Result<Vec<u8>, ExtractError>;
}

/// Converter backed by a headless LibreOffice (`soffice`) process.
#[derive(Debug, Clone)]
pub struct SofficeConverter {
    binary: String,
}

impl SofficeConverter {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    async fn convert_in(
        &self,
        dir: &Path,
        bytes: &[u8],
        format: DocumentFormat,
    ) -> Result<Vec<u8>, ExtractError> {
        let conversion = |detail: String| ExtractError::Conversion { format, detail };

        let input = dir.join(format!("upload.{}", format.extension()));
        tokio::fs::write(&input, bytes)
            .await
            .map_err(|e| conversion(format!("failed to write temp file: {e}")))?;

        let output = tokio::process::Command::new(&self.binary)
            .arg("--headless")
            .arg("--convert-to")
            .arg("pdf")
            .arg("--outdir")
            .arg(dir)
            .arg(&input)
            .output()
            .await
            .map_err(|e| conversion(format!("failed to run {}: {e}", self.binary)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(conversion(format!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                stderr.trim()
            )));
        }

        tokio::fs::read(dir.join("upload.pdf"))
            .await
            .map_err(|e| conversion(format!("converter produced no PDF: {e}")))
    }
}

#[async_trait]
impl DocumentConverter for SofficeConverter {
    #[tracing::instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn to_pdf(&self, bytes: &[u8], format: DocumentFormat) -> Result<Vec<u8>, ExtractError> {
        let dir = tempfile::Builder::new()
            .prefix("docassist-")
            .tempdir()
            .map_err(|e| ExtractError::Conversion {
                format,
                detail: format!("failed to create temp dir: {e}"),
            })?;

        // On failure the directory is left to `TempDir`'s drop, which ignores
        // removal errors. Cleanup is only checked on the success path.
        let pdf = self.convert_in(dir.path(), bytes, format).await?;

        let path = dir.path().to_path_buf();
        if let Err(e) = dir.close() {
            tracing::warn!(path = %path.display(), "Failed to remove conversion temp dir: {}", e);
        }

        tracing::info!(pdf_size = pdf.len(), "Converted {} to PDF", format);
        Ok(pdf)
    }
}

/// Turns uploaded documents into plain text.
#[derive(Clone)]
pub struct TextExtractor {
    converter: Arc<dyn DocumentConverter>,
}

impl TextExtractor {
    pub fn new(converter: Arc<dyn DocumentConverter>) -> Self {
        Self { converter }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(SofficeConverter::new(config.converter_bin.clone())))
    }

    /// Extracts the text of an upload, using its declared format.
    pub async fn extract_upload(&self, upload: &Upload) -> Result<DocumentText, ExtractError> {
        let format = upload
            .declared_format()
            .ok_or_else(|| ExtractError::UnsupportedFormat(upload.describe()))?;
        self.extract(&upload.bytes, format).await
    }

    #[tracing::instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn extract(
        &self,
        bytes: &[u8],
        format: DocumentFormat,
    ) -> Result<DocumentText, ExtractError> {
        let pdf = match format {
            DocumentFormat::Pdf => bytes.to_vec(),
            DocumentFormat::Docx | DocumentFormat::Pptx => {
                self.converter.to_pdf(bytes, format).await?
            }
        };

        let text = tokio::task::spawn_blocking(move || pdf_text(&pdf))
            .await
            .map_err(|e| ExtractError::Pdf(format!("extraction task failed: {e}")))??;

        tracing::info!(chars = text.chars().count(), "Text extraction complete");
        Ok(DocumentText::new(text))
    }
}

/// Concatenates the text of every page in page order.
///
/// Each page keeps the trailing newline lopdf ends its text with; nothing is
/// inserted between pages. A page whose text cannot be extracted contributes
/// nothing.
fn pdf_text(pdf: &[u8]) -> Result<String, ExtractError> {
    let doc = Document::load_mem(pdf).map_err(|e| ExtractError::Pdf(e.to_string()))?;

    let pages = doc.get_pages();
    tracing::debug!(page_count = pages.len(), "Loaded PDF");

    let mut text = String::new();
    for page_number in pages.keys() {
        match doc.extract_text(&[*page_number]) {
            Ok(page_text) => text.push_str(&page_text),
            Err(e) => tracing::debug!(page_number, "Skipping page without extractable text: {}", e),
        }
    }
    Ok(text)
}
