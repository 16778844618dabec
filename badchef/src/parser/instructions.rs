//! Recipe instruction normalization.
//!
//! The backend has stored instructions in several shapes over time: a
//! single paragraph, newline-delimited steps, and a JSON-encoded list of
//! sections with their own steps. None of them is treated as canonical;
//! [`Instructions::parse`] detects which one it is looking at.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::capitalize;

lazy_static! {
    static ref STEP_PREFIX_RE: Regex =
        Regex::new(r"(?i)^\s*(?:step\s*)?\d+\s*[.):-]\s*|^\s*[-*\x{2022}]+\s*").unwrap();
}

/// A titled group of steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub steps: Vec<String>,
}

/// Normalized instructions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Instructions {
    /// One block of prose.
    Plain(String),
    /// Ordered steps.
    Steps(Vec<String>),
    /// Steps grouped under section titles.
    Sections(Vec<Section>),
}

impl Instructions {
    /// Detect the shape of a raw instructions field and normalize it.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();

        if trimmed.starts_with('[') || trimmed.starts_with('{') {
            if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
                if let Some(parsed) = from_json(&value) {
                    return parsed;
                }
            }
            log::debug!("instructions look like JSON but did not match a known shape");
        }

        let mut lines: Vec<String> = trimmed
            .lines()
            .map(clean_step)
            .filter(|l| !l.is_empty())
            .collect();

        match lines.len() {
            0 => Instructions::Steps(Vec::new()),
            1 => Instructions::Plain(lines.remove(0)),
            _ => Instructions::Steps(lines),
        }
    }

    /// Check if there is nothing to show.
    pub fn is_empty(&self) -> bool {
        match self {
            Instructions::Plain(text) => text.is_empty(),
            Instructions::Steps(steps) => steps.is_empty(),
            Instructions::Sections(sections) => sections.iter().all(|s| s.steps.is_empty()),
        }
    }

    /// Total number of steps. Prose counts as one.
    pub fn step_count(&self) -> usize {
        match self {
            Instructions::Plain(text) => usize::from(!text.is_empty()),
            Instructions::Steps(steps) => steps.len(),
            Instructions::Sections(sections) => sections.iter().map(|s| s.steps.len()).sum(),
        }
    }

    /// Render as display lines, numbering steps within each section.
    pub fn to_lines(&self) -> Vec<String> {
        match self {
            Instructions::Plain(text) => vec![text.clone()],
            Instructions::Steps(steps) => number(steps),
            Instructions::Sections(sections) => sections
                .iter()
                .flat_map(|s| {
                    let mut out = Vec::with_capacity(s.steps.len() + 1);
                    if !s.title.is_empty() {
                        out.push(format!("{}:", s.title));
                    }
                    out.extend(number(&s.steps));
                    out
                })
                .collect(),
        }
    }
}

fn number(steps: &[String]) -> Vec<String> {
    steps
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {}", i + 1, s))
        .collect()
}

fn clean_step(line: &str) -> String {
    capitalize(STEP_PREFIX_RE.replace(line, "").trim())
}

fn from_json(value: &Value) -> Option<Instructions> {
    match value {
        Value::Array(items) if items.iter().all(Value::is_string) => Some(Instructions::Steps(
            items
                .iter()
                .filter_map(Value::as_str)
                .map(clean_step)
                .filter(|s| !s.is_empty())
                .collect(),
        )),
        Value::Array(items) => items
            .iter()
            .map(section_from_json)
            .collect::<Option<Vec<_>>>()
            .map(Instructions::Sections),
        Value::Object(map) => match map.get("sections").or_else(|| map.get("steps")) {
            Some(inner) => from_json(inner),
            None => None,
        },
        _ => None,
    }
}

fn section_from_json(value: &Value) -> Option<Section> {
    let obj = value.as_object()?;

    let title = ["section", "title", "name"]
        .iter()
        .find_map(|k| obj.get(*k).and_then(Value::as_str))
        .unwrap_or_default()
        .trim()
        .to_owned();

    let steps = match obj.get("steps").or_else(|| obj.get("instructions"))? {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(clean_step)
            .filter(|s| !s.is_empty())
            .collect(),
        Value::String(text) => text
            .lines()
            .map(clean_step)
            .filter(|s| !s.is_empty())
            .collect(),
        _ => return None,
    };

    Some(Section { title, steps })
}
