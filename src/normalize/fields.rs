//! Domain-specific field normalizers: aliases, node addresses, job tags,
//! closed-enum resolution.

use serde_json::Value;

use crate::model::{ImagePullPolicy, PipelineInputType, RestartPolicy};

use super::value::to_string_value;

const ALIAS_MAX_LEN: usize = 36;
const ALIAS_MIN_LEN: usize = 3;

const NODE_ADDRESS_PREFIX: &str = "0xai_";
const NODE_ADDRESS_BARE_PREFIX: &str = "0xai";

const COUNTRY_TAG_PREFIX: &str = "CT:";
const COUNTRY_SEPARATOR: &str = "||";

/// Trim, replace anything outside `[A-Za-z0-9_-]` with `-`, truncate to 36
/// chars. Results shorter than 3 chars yield `fallback` instead: aliases
/// must be at least 3 chars.
pub fn sanitize_alias(value: &str, fallback: &str) -> String {
    let cleaned: String = value
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .take(ALIAS_MAX_LEN)
        .collect();
    if cleaned.len() < ALIAS_MIN_LEN {
        fallback.to_string()
    } else {
        cleaned
    }
}

/// Canonicalize a node address to carry the `0xai_` prefix exactly once.
/// Idempotent; empty input stays empty.
pub fn normalize_node_address(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.starts_with(NODE_ADDRESS_PREFIX) {
        return trimmed.to_string();
    }
    let bare = trimmed
        .strip_prefix(NODE_ADDRESS_BARE_PREFIX)
        .unwrap_or(trimmed);
    format!("{NODE_ADDRESS_PREFIX}{bare}")
}

/// A flat job-tag list split into plain tags and country codes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobTagSplit {
    pub tags: Vec<String>,
    pub countries: Vec<String>,
}

/// Split a flat tag list: `CT:`-prefixed tags carry `||`-joined country
/// codes (wildcard `*` and empty segments discarded), everything else
/// passes through unchanged.
pub fn parse_job_tags<S: AsRef<str>>(raw_tags: &[S]) -> JobTagSplit {
    let mut split = JobTagSplit::default();
    for tag in raw_tags {
        let tag = tag.as_ref();
        match tag.strip_prefix(COUNTRY_TAG_PREFIX) {
            Some(countries) => {
                for code in countries.split(COUNTRY_SEPARATOR) {
                    let code = code.trim();
                    if !code.is_empty() && code != "*" {
                        split.countries.push(code.to_string());
                    }
                }
            }
            None => split.tags.push(tag.to_string()),
        }
    }
    split
}

fn matches_policy(raw: &str, label: &str, wire: &str) -> bool {
    raw.eq_ignore_ascii_case(label) || raw.eq_ignore_ascii_case(wire)
}

impl RestartPolicy {
    /// Case-insensitive resolution against the closed list, accepting both
    /// the Titlecase label and the lowercase wire form. Unmatched or empty
    /// input falls back to the canonical default.
    pub fn resolve(value: Option<&Value>) -> Self {
        let raw = to_string_value(value);
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|p| matches_policy(raw, p.label(), p.wire_value()))
            .unwrap_or_default()
    }
}

impl ImagePullPolicy {
    pub fn resolve(value: Option<&Value>) -> Self {
        let raw = to_string_value(value);
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|p| matches_policy(raw, p.label(), p.wire_value()))
            .unwrap_or_default()
    }
}

impl PipelineInputType {
    pub fn resolve(value: Option<&Value>) -> Self {
        let raw = to_string_value(value);
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|t| raw.eq_ignore_ascii_case(t.wire_value()))
            .unwrap_or_default()
    }
}
