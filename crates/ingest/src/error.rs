use thiserror::Error;

/// Reasons a request's source text could not be produced.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("No text provided")]
    EmptyText,

    /// The upload could not be parsed as a PDF at all.
    #[error("Unreadable PDF: {0}")]
    UnreadablePdf(String),

    /// The PDF parsed, but no page carried a text layer.
    #[error("PDF contains no extractable text")]
    NoExtractableText,
}
