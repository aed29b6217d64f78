use crate::errors::{AppError, AppResult};

/// Document text extraction collaborator. Runs in-process but is isolated
/// behind a trait so tests can substitute fixed text for real PDFs.
pub trait DocumentTextExtractor: Send + Sync {
    fn extract_text(&self, document: &[u8]) -> AppResult<String>;
}

pub struct PdfTextExtractor;

impl DocumentTextExtractor for PdfTextExtractor {
    fn extract_text(&self, document: &[u8]) -> AppResult<String> {
        pdf_extract::extract_text_from_mem(document)
            .map_err(|e| AppError::ExtractionError(format!("Not a readable PDF: {}", e)))
    }
}
