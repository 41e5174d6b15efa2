use tracing::info;

use crate::error::IngestError;
use crate::reader::PdfReader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Pdf,
    Text,
}

/// The full text of one paper, never empty.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    text: String,
    kind: SourceKind,
}

impl SourceDocument {
    pub fn from_text(text: impl Into<String>) -> Result<Self, IngestError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(IngestError::EmptyText);
        }
        Ok(Self {
            text,
            kind: SourceKind::Text,
        })
    }

    pub fn from_pdf(bytes: &[u8]) -> Result<Self, IngestError> {
        let text = PdfReader::read_text(bytes)
            .map_err(|e| IngestError::UnreadablePdf(format!("{:#}", e)))?;

        if text.trim().is_empty() {
            return Err(IngestError::NoExtractableText);
        }

        info!(bytes = bytes.len(), chars = text.chars().count(), "Extracted text from PDF");
        Ok(Self {
            text,
            kind: SourceKind::Pdf,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// The first `max_chars` characters of the document.
    pub fn excerpt(&self, max_chars: usize) -> &str {
        match self.text.char_indices().nth(max_chars) {
            Some((end, _)) => &self.text[..end],
            None => &self.text,
        }
    }
}
