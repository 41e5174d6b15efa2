use anyhow::Result;
use dialogue::PodcastGenerator;
use extract::LanguageModel;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::metrics::Metrics;
use crate::retry::{ResilientModel, RetryPolicy};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: AppConfig,
    pub generator: PodcastGenerator,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    /// Build state around the provider named in `config`.
    pub fn new(config: AppConfig) -> Result<Self> {
        let model = config.llm.build_model()?;
        Ok(Self::with_model(config, model))
    }

    /// Build state around an already constructed model. The model is wrapped
    /// with the configured retry policy.
    pub fn with_model(config: AppConfig, model: Arc<dyn LanguageModel>) -> Self {
        let metrics = Metrics::new();
        let policy = RetryPolicy::from(&config.retry);
        let resilient = ResilientModel::new(model, policy, metrics.clone());
        let generator = PodcastGenerator::new(Arc::new(resilient), config.failure_policy);

        Self {
            config,
            generator,
            metrics,
        }
    }
}
