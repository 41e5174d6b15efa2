pub mod llm;
pub mod parser;
pub mod prompt;
pub mod schema;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use llm::{GeminiClient, LanguageModel, OllamaClient};
pub use schema::{DEFAULT_TITLE, DEFAULT_TOPIC, KeyPointSlot, KeyPoints, PaperMetadata};

use ingest::SourceDocument;
use std::sync::Arc;
use tracing::{info, warn};

/// Characters of the paper shown to the model when asking for title/topic.
pub const METADATA_EXCERPT_CHARS: usize = 2000;
/// Characters of the paper shown to the model when asking for key points.
pub const KEY_POINTS_EXCERPT_CHARS: usize = 3000;

#[derive(Debug, Clone)]
pub struct PaperAnalysis {
    pub metadata: PaperMetadata,
    pub key_points: KeyPoints,
}

/// Best-effort extraction of paper metadata and discussion points. Never
/// fails: a model error degrades to the defaults.
pub struct Extractor {
    model: Arc<dyn LanguageModel>,
}

impl Extractor {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    pub async fn extract_metadata(&self, document: &SourceDocument) -> PaperMetadata {
        let prompt = prompt::build_metadata_prompt(document.excerpt(METADATA_EXCERPT_CHARS));

        match self.model.generate(&prompt).await {
            Ok(reply) => {
                let metadata = parser::parse_metadata(&reply);
                info!(title = %metadata.title, topic = %metadata.topic, "Extracted paper metadata");
                metadata
            }
            Err(e) => {
                warn!(
                    model = self.model.name(),
                    error = %e,
                    "Metadata extraction failed, using defaults"
                );
                PaperMetadata::fallback()
            }
        }
    }

    pub async fn extract_key_points(&self, document: &SourceDocument) -> KeyPoints {
        let prompt = prompt::build_key_points_prompt(document.excerpt(KEY_POINTS_EXCERPT_CHARS));

        match self.model.generate(&prompt).await {
            Ok(reply) => {
                let points = parser::parse_key_points(&reply);
                info!(points = points.filled(), "Extracted key points");
                points
            }
            Err(e) => {
                warn!(
                    model = self.model.name(),
                    error = %e,
                    "Key point extraction failed, continuing without context"
                );
                KeyPoints::default()
            }
        }
    }

    /// Metadata first, then key points; the calls run one after the other.
    pub async fn analyze(&self, document: &SourceDocument) -> PaperAnalysis {
        let metadata = self.extract_metadata(document).await;
        let key_points = self.extract_key_points(document).await;
        PaperAnalysis {
            metadata,
            key_points,
        }
    }
}
