pub mod director;
pub mod preferences;
pub mod prompt;
pub mod stages;
pub mod style;
pub mod transcript;

pub use director::{Director, DirectorError, FailurePolicy};
pub use preferences::{
    Audience, DetailLevel, IncludedSections, Length, Pace, PreferenceError, Preferences,
    RawPreferences, Section, Tone,
};
pub use stages::{STAGES, Stage, StageKind, expected_turns};
pub use style::StyleDirective;
pub use transcript::{ConversationTurn, FALLBACK_MESSAGE, Speaker, Transcript, TranscriptBuilder};

use extract::{Extractor, LanguageModel};
use ingest::SourceDocument;
use std::sync::Arc;

/// Paper in, script out: metadata and key points first, then the staged
/// conversation, all against the same model.
pub struct PodcastGenerator {
    extractor: Extractor,
    director: Director,
}

impl PodcastGenerator {
    pub fn new(model: Arc<dyn LanguageModel>, policy: FailurePolicy) -> Self {
        Self {
            extractor: Extractor::new(model.clone()),
            director: Director::new(model, policy),
        }
    }

    pub async fn generate(
        &self,
        document: &SourceDocument,
        preferences: &Preferences,
    ) -> Result<Transcript, DirectorError> {
        let analysis = self.extractor.analyze(document).await;
        self.director
            .run(&analysis.metadata, &analysis.key_points, preferences)
            .await
    }
}
