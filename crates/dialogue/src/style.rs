use std::fmt;

use crate::preferences::{Audience, DetailLevel, Length, Pace, Preferences, Tone};

/// Instructions derived from listener preferences, appended verbatim to
/// every dialogue prompt. One sentence per axis, always in the order
/// length, tone, detail level, audience, pace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleDirective {
    fragments: [&'static str; 5],
}

impl StyleDirective {
    pub fn fragments(&self) -> &[&'static str; 5] {
        &self.fragments
    }
}

impl From<&Preferences> for StyleDirective {
    fn from(prefs: &Preferences) -> Self {
        Self {
            fragments: [
                length_instruction(prefs.length),
                tone_instruction(prefs.tone),
                detail_instruction(prefs.detail_level),
                audience_instruction(prefs.target_audience),
                pace_instruction(prefs.speaking_pace),
            ],
        }
    }
}

impl fmt::Display for StyleDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Style guidelines:")?;
        for fragment in &self.fragments {
            write!(f, "\n- {}", fragment)?;
        }
        Ok(())
    }
}

fn length_instruction(length: Length) -> &'static str {
    match length {
        Length::Short => "Keep each response brief, no more than two or three sentences.",
        Length::Medium => "Keep each response to a short paragraph of four or five sentences.",
        Length::Long => {
            "Give fuller responses of up to two paragraphs, exploring each point in depth."
        }
    }
}

fn tone_instruction(tone: Tone) -> &'static str {
    match tone {
        Tone::Casual => {
            "Use a relaxed, conversational tone with everyday language and a little humor."
        }
        Tone::Professional => "Use a clear, polished, professional tone.",
        Tone::Academic => "Use a formal, scholarly tone with precise terminology.",
    }
}

fn detail_instruction(level: DetailLevel) -> &'static str {
    match level {
        DetailLevel::Overview => {
            "Stay at a high level and focus on the big picture rather than technical details."
        }
        DetailLevel::Balanced => "Balance the key technical details with accessible explanations.",
        DetailLevel::Detailed => {
            "Go into technical depth, including specific methods, numbers and results."
        }
    }
}

fn audience_instruction(audience: Audience) -> &'static str {
    match audience {
        Audience::General => {
            "Assume listeners have no specialist background and explain any jargon."
        }
        Audience::Academic => {
            "Assume listeners are researchers familiar with the field's terminology."
        }
        Audience::Industry => {
            "Assume listeners are industry practitioners and emphasize practical applications."
        }
    }
}

fn pace_instruction(pace: Pace) -> &'static str {
    match pace {
        Pace::Slow => "Speak at a slow, deliberate pace with short sentences.",
        Pace::Normal => "Speak at a natural conversational pace.",
        Pace::Fast => "Speak at a brisk, energetic pace and keep things moving.",
    }
}
