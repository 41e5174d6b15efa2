use serde::Serialize;
use std::fmt;

use extract::KeyPointSlot;

use crate::preferences::{IncludedSections, Section};
use crate::prompt::{self, PromptContext};

pub type PromptTemplate = fn(&PromptContext<'_>) -> String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Introduction,
    Objective,
    Methodology,
    Findings,
    Implications,
    Conclusion,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StageKind::Introduction => "introduction",
            StageKind::Objective => "objective",
            StageKind::Methodology => "methodology",
            StageKind::Findings => "findings",
            StageKind::Implications => "implications",
            StageKind::Conclusion => "conclusion",
        };
        f.write_str(name)
    }
}

/// One row of the conversation plan.
#[derive(Clone, Copy)]
pub struct Stage {
    pub kind: StageKind,
    /// Section flag that must be on for the stage to run; `None` always runs.
    pub gate: Option<Section>,
    /// Key point handed to the templates. Fixed per stage, so skipping one
    /// stage never changes what another stage sees.
    pub context: Option<KeyPointSlot>,
    pub host: PromptTemplate,
    pub guest: Option<PromptTemplate>,
}

impl Stage {
    pub fn is_enabled(&self, sections: &IncludedSections) -> bool {
        self.gate.is_none_or(|section| sections.includes(section))
    }

    pub fn turns(&self) -> usize {
        if self.guest.is_some() { 2 } else { 1 }
    }
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage")
            .field("kind", &self.kind)
            .field("gate", &self.gate)
            .field("context", &self.context)
            .field("has_guest", &self.guest.is_some())
            .finish()
    }
}

pub static STAGES: [Stage; 6] = [
    Stage {
        kind: StageKind::Introduction,
        gate: None,
        context: None,
        host: prompt::introduction_host,
        guest: Some(prompt::introduction_guest),
    },
    Stage {
        kind: StageKind::Objective,
        gate: Some(Section::Methodology),
        context: Some(KeyPointSlot::Objective),
        host: prompt::objective_host,
        guest: Some(prompt::guest_answer),
    },
    Stage {
        kind: StageKind::Methodology,
        gate: Some(Section::Methodology),
        context: Some(KeyPointSlot::Methodology),
        host: prompt::methodology_host,
        guest: Some(prompt::guest_answer),
    },
    Stage {
        kind: StageKind::Findings,
        gate: Some(Section::Results),
        context: Some(KeyPointSlot::Findings),
        host: prompt::findings_host,
        guest: Some(prompt::guest_answer),
    },
    Stage {
        kind: StageKind::Implications,
        gate: Some(Section::Implications),
        context: Some(KeyPointSlot::Implications),
        host: prompt::implications_host,
        guest: Some(prompt::guest_answer),
    },
    Stage {
        kind: StageKind::Conclusion,
        gate: None,
        context: Some(KeyPointSlot::FutureDirections),
        host: prompt::conclusion_host,
        guest: None,
    },
];

/// Stages that will run for the given section flags, in speaking order.
pub fn enabled_stages(sections: &IncludedSections) -> impl Iterator<Item = &'static Stage> + '_ {
    STAGES.iter().filter(move |stage| stage.is_enabled(sections))
}

/// Number of turns a full run produces for the given section flags.
pub fn expected_turns(sections: &IncludedSections) -> usize {
    enabled_stages(sections).map(Stage::turns).sum()
}
