use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dialogue::{DirectorError, PreferenceError};
use ingest::IngestError;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

pub const NO_PDF: &str = "No PDF file provided";
pub const NO_FILENAME: &str = "No selected file";
pub const EXTRACTION_FAILED: &str = "Failed to extract text from PDF";
pub const GENERATION_FAILED: &str = "Failed to generate conversation";

/// Every failure the HTTP surface reports. Rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    /// An extractor rejected the body; keeps the extractor's status (413
    /// for an oversized body).
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Preferences(#[from] PreferenceError),

    #[error(transparent)]
    Generation(#[from] DirectorError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn rejected(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError::Rejected {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Ingest(_) | ApiError::Preferences(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Rejected { status, .. } => *status,
            ApiError::Generation(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the client. Upstream and internal details stay in
    /// the logs.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::BadRequest(message) | ApiError::Rejected { message, .. } => message.clone(),
            ApiError::Ingest(IngestError::EmptyText) => "No text provided".to_string(),
            ApiError::Ingest(IngestError::UnreadablePdf(_) | IngestError::NoExtractableText) => {
                EXTRACTION_FAILED.to_string()
            }
            ApiError::Preferences(e) => e.to_string(),
            ApiError::Generation(_) => GENERATION_FAILED.to_string(),
            ApiError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            warn!(error = %self, "Rejected request");
        }

        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}
