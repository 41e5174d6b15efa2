use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PreferenceError {
    #[error("Invalid value '{value}' for preference '{field}' (expected one of: {expected})")]
    InvalidValue {
        field: &'static str,
        value: String,
        expected: String,
    },
}

/// A closed set of wire values for one preference axis.
macro_rules! preference_enum {
    (
        $(#[$meta:meta])*
        $name:ident, field = $field:literal, default = $default:ident,
        { $($variant:ident => $value:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum $name {
            $(#[serde(rename = $value)] $variant),+
        }

        impl $name {
            /// Field name in the request's `preferences` object.
            pub const FIELD: &'static str = $field;
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }

            pub fn parse(value: &str) -> Result<Self, PreferenceError> {
                match value.trim().to_ascii_lowercase().as_str() {
                    $($value => Ok($name::$variant),)+
                    _ => Err(PreferenceError::InvalidValue {
                        field: $field,
                        value: value.to_string(),
                        expected: Self::ALL
                            .iter()
                            .map(|v| v.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                    }),
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }
    };
}

preference_enum!(Tone, field = "tone", default = Casual, {
    Casual => "casual",
    Professional => "professional",
    Academic => "academic",
});

preference_enum!(DetailLevel, field = "detailLevel", default = Balanced, {
    Overview => "overview",
    Balanced => "balanced",
    Detailed => "detailed",
});

preference_enum!(Audience, field = "targetAudience", default = General, {
    General => "general",
    Academic => "academic",
    Industry => "industry",
});

preference_enum!(Length, field = "length", default = Medium, {
    Short => "short",
    Medium => "medium",
    Long => "long",
});

preference_enum!(Pace, field = "speakingPace", default = Normal, {
    Slow => "slow",
    Normal => "normal",
    Fast => "fast",
});

/// Optional parts of the conversation a listener can switch off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Methodology,
    Results,
    Implications,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncludedSections {
    pub methodology: bool,
    pub results: bool,
    pub implications: bool,
}

impl Default for IncludedSections {
    fn default() -> Self {
        Self {
            methodology: true,
            results: true,
            implications: true,
        }
    }
}

impl IncludedSections {
    pub fn includes(&self, section: Section) -> bool {
        match section {
            Section::Methodology => self.methodology,
            Section::Results => self.results,
            Section::Implications => self.implications,
        }
    }
}

/// Validated listener preferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub tone: Tone,
    pub detail_level: DetailLevel,
    pub target_audience: Audience,
    pub length: Length,
    pub speaking_pace: Pace,
    pub included_sections: IncludedSections,
}

/// Preferences as they arrive on the wire. Every field is optional; values
/// are checked when converting into [`Preferences`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPreferences {
    pub tone: Option<String>,
    pub detail_level: Option<String>,
    pub target_audience: Option<String>,
    pub length: Option<String>,
    pub speaking_pace: Option<String>,
    pub included_sections: Option<IncludedSections>,
}

impl TryFrom<RawPreferences> for Preferences {
    type Error = PreferenceError;

    fn try_from(raw: RawPreferences) -> Result<Self, Self::Error> {
        Ok(Self {
            tone: parse_or_default(raw.tone.as_deref(), Tone::parse)?,
            detail_level: parse_or_default(raw.detail_level.as_deref(), DetailLevel::parse)?,
            target_audience: parse_or_default(raw.target_audience.as_deref(), Audience::parse)?,
            length: parse_or_default(raw.length.as_deref(), Length::parse)?,
            speaking_pace: parse_or_default(raw.speaking_pace.as_deref(), Pace::parse)?,
            included_sections: raw.included_sections.unwrap_or_default(),
        })
    }
}

fn parse_or_default<T: Default>(
    value: Option<&str>,
    parse: fn(&str) -> Result<T, PreferenceError>,
) -> Result<T, PreferenceError> {
    match value {
        Some(v) => parse(v),
        None => Ok(T::default()),
    }
}
