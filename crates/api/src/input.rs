use axum::{
    Json, async_trait,
    body::Bytes,
    extract::{FromRequest, Multipart, Request, multipart::MultipartError},
    http::{StatusCode, header::CONTENT_TYPE},
};
use dialogue::{Preferences, RawPreferences};
use serde::Deserialize;

use crate::error::{ApiError, NO_FILENAME, NO_PDF};

/// Where the paper's text comes from.
#[derive(Debug)]
pub enum PaperSource {
    Pdf { filename: String, bytes: Bytes },
    Text(String),
}

/// A parsed `POST /api/generate-podcast` body, either `multipart/form-data`
/// (`pdf`, `preferences`, `text` parts) or JSON (`text`, `preferences`).
#[derive(Debug)]
pub struct PodcastRequest {
    pub source: PaperSource,
    pub preferences: Preferences,
}

#[derive(Deserialize)]
struct JsonBody {
    text: Option<String>,
    preferences: Option<RawPreferences>,
}

#[async_trait]
impl<S> FromRequest<S> for PodcastRequest
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| body_rejection(e.status(), e.body_text()))?;
            Self::from_multipart(multipart).await
        } else if content_type.starts_with("application/json") {
            let Json(body) = Json::<JsonBody>::from_request(req, state)
                .await
                .map_err(|e| body_rejection(e.status(), e.body_text()))?;

            let text = body
                .text
                .filter(|t| !t.trim().is_empty())
                .ok_or_else(|| ApiError::bad_request("No text provided"))?;
            let preferences = Preferences::try_from(body.preferences.unwrap_or_default())?;

            Ok(Self {
                source: PaperSource::Text(text),
                preferences,
            })
        } else {
            Err(ApiError::bad_request(
                "Expected a multipart/form-data or application/json body",
            ))
        }
    }
}

impl PodcastRequest {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut pdf = None;
        let mut text = None;
        let mut preferences = None;

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "pdf" => {
                    let filename = field.file_name().unwrap_or_default().to_string();
                    let bytes = field.bytes().await.map_err(multipart_error)?;
                    pdf = Some((filename, bytes));
                }
                "preferences" => {
                    let raw = field.text().await.map_err(multipart_error)?;
                    preferences = Some(parse_preferences(&raw)?);
                }
                "text" => {
                    text = Some(field.text().await.map_err(multipart_error)?);
                }
                _ => {}
            }
        }

        let source = match (pdf, text) {
            (Some((filename, _)), _) if filename.trim().is_empty() => {
                return Err(ApiError::bad_request(NO_FILENAME));
            }
            (Some((filename, bytes)), _) => PaperSource::Pdf { filename, bytes },
            (None, Some(text)) if !text.trim().is_empty() => PaperSource::Text(text),
            _ => return Err(ApiError::bad_request(NO_PDF)),
        };

        Ok(Self {
            source,
            preferences: preferences.unwrap_or_default(),
        })
    }
}

/// Oversized bodies keep their 413; every other body problem is a 400.
fn body_rejection(status: StatusCode, message: String) -> ApiError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::rejected(status, message)
    } else {
        ApiError::bad_request(message)
    }
}

fn multipart_error(e: MultipartError) -> ApiError {
    body_rejection(e.status(), e.body_text())
}

/// Decode the JSON-encoded `preferences` form field.
pub fn parse_preferences(raw: &str) -> Result<Preferences, ApiError> {
    if raw.trim().is_empty() {
        return Ok(Preferences::default());
    }
    let raw: RawPreferences = serde_json::from_str(raw)
        .map_err(|e| ApiError::bad_request(format!("Invalid preferences: {}", e)))?;
    Ok(Preferences::try_from(raw)?)
}
