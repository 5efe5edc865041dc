//! Version-tagged collections of reasoning entries.
//!
//! A bundle is what the renderer consumes. Reading one from JSON is lenient:
//! an `entries` field that is missing, `null`, or not an array yields an
//! empty bundle, and array elements that are not valid entries are skipped.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::entry::{ReasoningEntry, parse_reasoning_entry};
use crate::error::ParseError;

/// Version tag for bundles produced by the reasoning v1 pipeline.
pub const REASONING_V1: &str = "v1";

/// Version tag for bundles produced while the v1 pipeline is switched off.
pub const LEGACY: &str = "legacy";

/// Ordered, version-tagged reasoning entries.
///
/// Order is significant and preserved; entries are never sorted or deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasoningBundle {
    #[serde(default, deserialize_with = "lenient_version")]
    pub version: String,
    #[serde(default, deserialize_with = "lenient_entries")]
    pub entries: Vec<ReasoningEntry>,
}

/// An annotation line that could not be parsed while assembling a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedAnnotation {
    /// 1-based position in the input sequence.
    pub line: usize,
    pub error: ParseError,
}

/// Tally of a bundle's entries by weight direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BundleSummary {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    /// Saturating sum of all weights.
    pub net_weight: i64,
}

impl ReasoningBundle {
    pub fn new(version: impl Into<String>, entries: Vec<ReasoningEntry>) -> Self {
        Self {
            version: version.into(),
            entries,
        }
    }

    /// Parse annotation lines into a bundle.
    ///
    /// Successfully parsed lines keep their input order; lines that fail are
    /// returned separately. Blank lines are skipped without being rejected.
    pub fn from_annotations<I, S>(
        version: impl Into<String>,
        lines: I,
    ) -> (Self, Vec<RejectedAnnotation>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries = Vec::new();
        let mut rejected = Vec::new();

        for (idx, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }
            match parse_reasoning_entry(line) {
                Ok(entry) => entries.push(entry),
                Err(error) => rejected.push(RejectedAnnotation {
                    line: idx + 1,
                    error,
                }),
            }
        }

        debug!(
            accepted = entries.len(),
            rejected = rejected.len(),
            "assembled reasoning bundle"
        );
        (Self::new(version, entries), rejected)
    }

    /// Read a bundle from a JSON document.
    ///
    /// Only malformed JSON syntax is an error; shape problems degrade as
    /// described in the module docs.
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(s)?;
        Ok(Self::from_json_value(&value))
    }

    /// Read a bundle from an arbitrary JSON value. Never fails.
    ///
    /// Anything other than an object is treated as an empty, untagged bundle.
    pub fn from_json_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            warn!("reasoning bundle is not a JSON object; treating as empty");
            return Self::default();
        };
        Self {
            version: version_from_value(obj.get("version")),
            entries: entries_from_value(obj.get("entries")),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn summary(&self) -> BundleSummary {
        self.entries
            .iter()
            .fold(BundleSummary::default(), |mut acc, entry| {
                match entry.weight() {
                    w if w > 0 => acc.positive += 1,
                    w if w < 0 => acc.negative += 1,
                    _ => acc.neutral += 1,
                }
                acc.net_weight = acc.net_weight.saturating_add(entry.weight());
                acc
            })
    }
}

// ── Lenient field readers ──

fn lenient_version<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(version_from_value(Some(&value)))
}

fn lenient_entries<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<ReasoningEntry>, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(entries_from_value(Some(&value)))
}

fn version_from_value(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

fn entries_from_value(value: Option<&Value>) -> Vec<ReasoningEntry> {
    let items = match value {
        Some(Value::Array(items)) => items,
        None | Some(Value::Null) => return Vec::new(),
        Some(other) => {
            warn!(found = %json_kind(other), "reasoning entries are not an array; treating as empty");
            return Vec::new();
        }
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            match ReasoningEntry::deserialize(item) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!(index, error = %err, "skipping malformed reasoning entry");
                    None
                }
            }
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
