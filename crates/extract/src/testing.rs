//! Scripted [`LanguageModel`] for exercising the pipeline without a network.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::llm::LanguageModel;

enum Reply {
    Text(String),
    Fail(String),
}

/// Answers each prompt with the first rule whose needle the prompt contains,
/// or with a numbered `"line N"` otherwise. Every prompt is recorded.
#[derive(Default)]
pub struct ScriptedModel {
    rules: Vec<(String, Reply)>,
    fail_all: bool,
    counter: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// A model on which every call fails.
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    pub fn reply_when(mut self, needle: &str, reply: &str) -> Self {
        self.rules.push((needle.to_string(), Reply::Text(reply.to_string())));
        self
    }

    pub fn fail_when(mut self, needle: &str, error: &str) -> Self {
        self.rules.push((needle.to_string(), Reply::Fail(error.to_string())));
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    pub fn calls(&self) -> usize {
        self.prompts().len()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        if self.fail_all {
            anyhow::bail!("scripted failure");
        }

        match self.rules.iter().find(|(needle, _)| prompt.contains(needle.as_str())) {
            Some((_, Reply::Text(text))) => Ok(text.clone()),
            Some((_, Reply::Fail(error))) => anyhow::bail!("{}", error),
            None => {
                let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
                Ok(format!("line {}", n))
            }
        }
    }
}
