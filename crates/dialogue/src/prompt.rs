//! Prompt templates for each conversation stage. Templates never include
//! the style directive; the director appends it to whatever they return.

use extract::PaperMetadata;

/// Inputs a stage template may draw on.
#[derive(Debug, Clone, Copy)]
pub struct PromptContext<'a> {
    pub metadata: &'a PaperMetadata,
    /// The stage's key point, or `""` when none was extracted.
    pub key_point: &'a str,
    /// What the host just said, once the host has spoken in this stage.
    pub host_line: Option<&'a str>,
}

fn host_persona(metadata: &PaperMetadata) -> String {
    format!(
        "You are the host of a podcast discussing the research paper titled '{}', \
        which focuses on {}. You are an enthusiastic, friendly and knowledgeable \
        interviewer who breaks down complex concepts and keeps the conversation engaging. \
        Reply only with the words you say out loud: no stage directions, no speaker labels.",
        metadata.title, metadata.topic
    )
}

fn guest_persona(metadata: &PaperMetadata) -> String {
    format!(
        "You are the guest on a podcast, an expert in {} who knows the research paper \
        '{}' inside out. You explain its ideas with insight and genuine enthusiasm. \
        Reply only with the words you say out loud: no stage directions, no speaker labels.",
        metadata.topic, metadata.title
    )
}

fn context_block(key_point: &str) -> String {
    if key_point.trim().is_empty() {
        String::new()
    } else {
        format!("\n\nContext from the paper: {}", key_point)
    }
}

fn host_line_block(host_line: Option<&str>) -> String {
    match host_line {
        Some(line) => format!("\n\nThe host just said:\n\"{}\"", line),
        None => String::new(),
    }
}

pub fn introduction_host(ctx: &PromptContext<'_>) -> String {
    format!(
        r#"{}

TASK: Open the episode. Welcome the listeners warmly and introduce today's paper and why it matters.

RULES:
- Do not give yourself a name
- Do not say "I'm your host" or anything similar
- Do not say "we have with us" or introduce the guest by name"#,
        host_persona(ctx.metadata)
    )
}

pub fn introduction_guest(ctx: &PromptContext<'_>) -> String {
    format!(
        r#"{}{}

TASK: Greet the listeners and share, in a sentence or two, what excites you most about this research.

RULES:
- Do not introduce yourself
- Do not state your name, title or affiliation"#,
        guest_persona(ctx.metadata),
        host_line_block(ctx.host_line)
    )
}

pub fn objective_host(ctx: &PromptContext<'_>) -> String {
    format!(
        "{}\n\nTASK: Ask the guest about the main objective of the research and why it is significant.{}",
        host_persona(ctx.metadata),
        context_block(ctx.key_point)
    )
}

pub fn methodology_host(ctx: &PromptContext<'_>) -> String {
    format!(
        "{}\n\nTASK: Ask the guest how the research was carried out and what makes the approach interesting.{}",
        host_persona(ctx.metadata),
        context_block(ctx.key_point)
    )
}

pub fn findings_host(ctx: &PromptContext<'_>) -> String {
    format!(
        "{}\n\nTASK: Ask the guest about the most important findings and anything that surprised the researchers.{}",
        host_persona(ctx.metadata),
        context_block(ctx.key_point)
    )
}

pub fn implications_host(ctx: &PromptContext<'_>) -> String {
    format!(
        "{}\n\nTASK: Ask the guest what this work means for the field and for the world beyond it.{}",
        host_persona(ctx.metadata),
        context_block(ctx.key_point)
    )
}

pub fn guest_answer(ctx: &PromptContext<'_>) -> String {
    format!(
        "{}{}\n\nTASK: Answer the host's question, drawing on this part of the paper.{}",
        guest_persona(ctx.metadata),
        host_line_block(ctx.host_line),
        context_block(ctx.key_point)
    )
}

pub fn conclusion_host(ctx: &PromptContext<'_>) -> String {
    format!(
        r#"{}

TASK: Close the episode. Thank the guest, briefly recap what was discussed, mention where this research could go next, and say goodbye to the listeners.

RULES:
- Do not name yourself or the guest{}"#,
        host_persona(ctx.metadata),
        context_block(ctx.key_point)
    )
}
