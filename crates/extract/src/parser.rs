//! Parsing of free-form model replies.
//!
//! Replies are read with one grammar: a line of the form `key: value`,
//! optionally preceded by list or heading markers (`-`, `*`, `#`) and with
//! the key optionally wrapped in `**bold**`. Keys compare case-insensitively
//! and the first occurrence of a key wins. Anything else is ignored.

use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

use crate::schema::{DEFAULT_TITLE, DEFAULT_TOPIC, KeyPointSlot, KeyPoints, PaperMetadata};

static POINT_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^point\s*([0-9]+)$").unwrap());
static LIST_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+[.)]\s+").unwrap());

#[derive(Debug, Clone, Default)]
pub struct Fields {
    entries: Vec<(String, String)>,
}

impl Fields {
    /// Value of `key`, if present and non-empty.
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = key.to_lowercase();
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn parse_fields(reply: &str) -> Fields {
    let mut fields = Fields::default();
    for line in reply.lines() {
        if let Some((key, value)) = parse_line(line) {
            if fields.entries.iter().all(|(k, _)| *k != key) {
                fields.entries.push((key, value.to_string()));
            }
        }
    }
    fields
}

/// Split one line into a lowercased key and its trimmed value.
pub fn parse_line(line: &str) -> Option<(String, &str)> {
    let (key, value) = strip_marker(line).split_once(':')?;
    let key = key.trim().trim_matches('*').trim();
    if key.is_empty() {
        return None;
    }
    let value = value.trim().trim_matches('*').trim();
    Some((key.to_lowercase(), value))
}

/// Drop leading bullet, heading and `1.` / `1)` list markers.
fn strip_marker(line: &str) -> &str {
    let line = line
        .trim()
        .trim_start_matches(|c: char| matches!(c, '-' | '#' | '•') || c.is_whitespace());
    match LIST_NUMBER.find(line) {
        Some(m) => &line[m.end()..],
        None => line,
    }
}

/// Read `Title:` / `Topic:` from a reply, falling back per field.
pub fn parse_metadata(reply: &str) -> PaperMetadata {
    let fields = parse_fields(reply);

    let title = fields.get("title").map(str::to_string).unwrap_or_else(|| {
        warn!("No title line in model reply, using default");
        DEFAULT_TITLE.to_string()
    });
    let topic = fields.get("topic").map(str::to_string).unwrap_or_else(|| {
        warn!("No topic line in model reply, using default");
        DEFAULT_TOPIC.to_string()
    });

    PaperMetadata { title, topic }
}

/// Read up to five key points.
///
/// Lines labelled `PointN:` fill slot N. If the reply carries no labels at
/// all, its first five non-empty lines fill the slots in order, skipping
/// lead-in lines such as `Here are the key points:`.
pub fn parse_key_points(reply: &str) -> KeyPoints {
    let mut points = KeyPoints::default();
    let mut labelled = false;

    for line in reply.lines() {
        let Some((key, value)) = parse_line(line) else {
            continue;
        };
        let Some(position) = POINT_LABEL
            .captures(&key)
            .and_then(|c| c[1].parse::<usize>().ok())
        else {
            continue;
        };
        labelled = true;

        match KeyPointSlot::from_position(position) {
            Some(slot) if points.get(slot).is_none() && !value.is_empty() => {
                points.set(slot, value);
            }
            Some(_) => {}
            None => warn!(position, "Ignoring key point outside the five slots"),
        }
    }

    if !labelled {
        let lines = reply
            .lines()
            .filter(|l| !matches!(parse_line(l), Some((_, ""))))
            .map(|l| strip_marker(l).trim_start_matches('*').trim())
            .filter(|l| !l.is_empty());
        for (slot, line) in KeyPointSlot::ALL.into_iter().zip(lines) {
            points.set(slot, line);
        }
    }

    if points.filled() < KeyPointSlot::ALL.len() {
        warn!(filled = points.filled(), "Model returned fewer than five key points");
    }

    points
}
