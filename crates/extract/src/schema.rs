use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "Untitled Research Paper";
pub const DEFAULT_TOPIC: &str = "General Research";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperMetadata {
    pub title: String,
    pub topic: String,
}

impl PaperMetadata {
    pub fn fallback() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            topic: DEFAULT_TOPIC.to_string(),
        }
    }
}

/// The role a key point plays in the conversation. Position `n` in the
/// model's reply always maps to the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyPointSlot {
    Objective,
    Methodology,
    Findings,
    Implications,
    FutureDirections,
}

impl KeyPointSlot {
    pub const ALL: [KeyPointSlot; 5] = [
        KeyPointSlot::Objective,
        KeyPointSlot::Methodology,
        KeyPointSlot::Findings,
        KeyPointSlot::Implications,
        KeyPointSlot::FutureDirections,
    ];

    /// 1-based position used by the `PointN:` labels.
    pub fn from_position(position: usize) -> Option<Self> {
        position.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

/// Up to five discussion points. Any slot may be missing when the model
/// returned fewer points or the call failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPoints {
    pub objective: Option<String>,
    pub methodology: Option<String>,
    pub findings: Option<String>,
    pub implications: Option<String>,
    pub future_directions: Option<String>,
}

impl KeyPoints {
    pub fn get(&self, slot: KeyPointSlot) -> Option<&str> {
        self.slot_ref(slot).as_deref()
    }

    pub fn set(&mut self, slot: KeyPointSlot, point: impl Into<String>) {
        *self.slot_mut(slot) = Some(point.into());
    }

    /// The point for `slot`, or an empty string when it is missing.
    pub fn context(&self, slot: KeyPointSlot) -> &str {
        self.get(slot).unwrap_or("")
    }

    pub fn filled(&self) -> usize {
        KeyPointSlot::ALL
            .iter()
            .filter(|slot| self.get(**slot).is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.filled() == 0
    }

    fn slot_ref(&self, slot: KeyPointSlot) -> &Option<String> {
        match slot {
            KeyPointSlot::Objective => &self.objective,
            KeyPointSlot::Methodology => &self.methodology,
            KeyPointSlot::Findings => &self.findings,
            KeyPointSlot::Implications => &self.implications,
            KeyPointSlot::FutureDirections => &self.future_directions,
        }
    }

    fn slot_mut(&mut self, slot: KeyPointSlot) -> &mut Option<String> {
        match slot {
            KeyPointSlot::Objective => &mut self.objective,
            KeyPointSlot::Methodology => &mut self.methodology,
            KeyPointSlot::Findings => &mut self.findings,
            KeyPointSlot::Implications => &mut self.implications,
            KeyPointSlot::FutureDirections => &mut self.future_directions,
        }
    }
}
