//! Section and placeholder extraction for ZMX sources.
//!
//! This is pattern matching over raw text, not a parser. Guarantees:
//! - only the first `<template>`, `<style>` and `<script>` block is used
//! - an absent section is an empty string
//! - placeholders `{name}` / `{name:default}` do not nest

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::ComponentSource;

/// Placeholder pattern, shared verbatim with the generated runtime.
///
/// The body may hold anything except `}`; a `{` inside it is plain text.
pub const PLACEHOLDER_PATTERN: &str = r"\{([^}]+)\}";

lazy_static! {
    static ref TEMPLATE_REGEX: Regex = Regex::new(r"(?s)<template>(.*?)</template>").unwrap();
    static ref STYLE_REGEX: Regex = Regex::new(r"(?s)<style>(.*?)</style>").unwrap();
    static ref SCRIPT_REGEX: Regex = Regex::new(r"(?s)<script>(.*?)</script>").unwrap();
    static ref PLACEHOLDER_REGEX: Regex = Regex::new(PLACEHOLDER_PATTERN).unwrap();
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Split one source unit into its sections.
pub fn extract_sections(name: &str, source: &str) -> ComponentSource {
    ComponentSource {
        name: name.to_string(),
        template_text: first_section(&TEMPLATE_REGEX, source),
        style_text: first_section(&STYLE_REGEX, source),
        script_text: first_section(&SCRIPT_REGEX, source),
    }
}

fn first_section(re: &Regex, source: &str) -> String {
    re.captures(source)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Placeholders
// ---------------------------------------------------------------------------

/// One `{name}` or `{name:default}` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub name: String,
    pub default: Option<String>,
}

impl Placeholder {
    /// Split a placeholder body on its first colon and trim both halves.
    fn from_body(body: &str) -> Self {
        match body.split_once(':') {
            Some((name, default)) => Self {
                name: js_trim(name).to_string(),
                default: Some(js_trim(default).to_string()),
            },
            None => Self {
                name: js_trim(body).to_string(),
                default: None,
            },
        }
    }
}

/// Trim the same set of characters as JS `String.prototype.trim`.
///
/// Unicode `White_Space` plus U+FEFF, minus U+0085.
fn js_trim(s: &str) -> &str {
    s.trim_matches(|c: char| (c.is_whitespace() && c != '\u{85}') || c == '\u{FEFF}')
}

/// All placeholders of a template, left to right.
pub fn extract_placeholders(template: &str) -> Vec<Placeholder> {
    PLACEHOLDER_REGEX
        .captures_iter(template)
        .filter_map(|caps| caps.get(1))
        .map(|m| Placeholder::from_body(m.as_str()))
        .collect()
}

/// Placeholder names in first-appearance order. Duplicates are kept.
pub fn extract_props(template: &str) -> Vec<String> {
    extract_placeholders(template)
        .into_iter()
        .map(|p| p.name)
        .collect()
}

/// Substitute placeholders the way the generated `render` does.
///
/// A prop wins when present and non-empty, then the default, then `""`.
/// Substituted values are not rescanned.
pub fn render_template(template: &str, props: &HashMap<String, String>) -> String {
    PLACEHOLDER_REGEX
        .replace_all(template, |caps: &Captures| {
            let placeholder = Placeholder::from_body(&caps[1]);
            match props.get(&placeholder.name) {
                Some(value) if !value.is_empty() => value.clone(),
                _ => placeholder.default.unwrap_or_default(),
            }
        })
        .into_owned()
}
