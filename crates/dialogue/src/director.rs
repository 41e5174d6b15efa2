use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use extract::{KeyPoints, LanguageModel, PaperMetadata};

use crate::preferences::Preferences;
use crate::prompt::PromptContext;
use crate::stages::{self, Stage, StageKind};
use crate::style::StyleDirective;
use crate::transcript::{ConversationTurn, Speaker, Transcript, TranscriptBuilder};

/// What to do when a dialogue call fails (after any retries the model
/// itself performs).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop and report the failure; no partial transcript.
    #[default]
    Abort,
    /// Record a flagged filler turn and carry on.
    Degrade,
}

#[derive(Debug, Error)]
pub enum DirectorError {
    #[error("{speaker} turn of the {stage} stage failed: {source}")]
    Upstream {
        stage: StageKind,
        speaker: Speaker,
        #[source]
        source: anyhow::Error,
    },
}

/// Runs the stage table against a model, one call at a time.
pub struct Director {
    model: Arc<dyn LanguageModel>,
    policy: FailurePolicy,
}

impl Director {
    pub fn new(model: Arc<dyn LanguageModel>, policy: FailurePolicy) -> Self {
        Self { model, policy }
    }

    pub async fn run(
        &self,
        metadata: &PaperMetadata,
        key_points: &KeyPoints,
        preferences: &Preferences,
    ) -> Result<Transcript, DirectorError> {
        let style = StyleDirective::from(preferences).to_string();
        let mut transcript = TranscriptBuilder::new();

        for stage in stages::enabled_stages(&preferences.included_sections) {
            let key_point = stage.context.map(|slot| key_points.context(slot)).unwrap_or("");
            let mut ctx = PromptContext {
                metadata,
                key_point,
                host_line: None,
            };

            let host_turn = self.speak(stage, Speaker::Host, (stage.host)(&ctx), &style).await?;

            if let Some(guest) = stage.guest {
                if !host_turn.degraded {
                    ctx.host_line = Some(&host_turn.message);
                }
                let guest_turn = self.speak(stage, Speaker::Guest, guest(&ctx), &style).await?;
                transcript.push(host_turn);
                transcript.push(guest_turn);
            } else {
                transcript.push(host_turn);
            }
        }

        info!(
            turns = transcript.len(),
            title = %metadata.title,
            "Conversation generated"
        );
        Ok(transcript.finish(metadata))
    }

    async fn speak(
        &self,
        stage: &Stage,
        speaker: Speaker,
        prompt: String,
        style: &str,
    ) -> Result<ConversationTurn, DirectorError> {
        let prompt = format!("{}\n\n{}", prompt, style);
        debug!(
            stage = %stage.kind,
            speaker = %speaker,
            prompt_chars = prompt.len(),
            "Generating turn"
        );

        match self.model.generate(&prompt).await {
            Ok(message) => Ok(ConversationTurn::new(speaker, message.trim())),
            Err(e) => match self.policy {
                FailurePolicy::Abort => Err(DirectorError::Upstream {
                    stage: stage.kind,
                    speaker,
                    source: e,
                }),
                FailurePolicy::Degrade => {
                    warn!(
                        stage = %stage.kind,
                        speaker = %speaker,
                        error = %e,
                        "Model call failed, recording degraded turn"
                    );
                    Ok(ConversationTurn::degraded(speaker))
                }
            },
        }
    }
}
