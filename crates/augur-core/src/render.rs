//! Row rendering for reasoning bundles.
//!
//! Produces one [`Row`] per entry, in bundle order, with a three-way style
//! class picked from the sign of the weight. Rendering never fails: a bundle
//! without usable entries renders as zero rows.

use serde::Serialize;
use serde_json::Value;

use crate::bundle::ReasoningBundle;
use crate::entry::ReasoningEntry;

/// Visual treatment of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowStyle {
    /// Positive weight.
    Good,
    /// Negative weight.
    Bad,
    /// Zero weight.
    Neutral,
}

impl RowStyle {
    pub fn for_weight(weight: i64) -> Self {
        match weight {
            w if w > 0 => Self::Good,
            w if w < 0 => Self::Bad,
            _ => Self::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Bad => "bad",
            Self::Neutral => "neutral",
        }
    }

    /// Utility class used by the web front end for the weight badge.
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::Good => "text-emerald-600",
            Self::Bad => "text-red-600",
            Self::Neutral => "text-amber-600",
        }
    }
}

/// One rendered line: label, signed weight text, style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub label: String,
    /// `+5` for positive weights, `0` and `-3` otherwise.
    pub weight: String,
    pub style: RowStyle,
}

impl Row {
    pub fn from_entry(entry: &ReasoningEntry) -> Self {
        let weight = entry.weight();
        Self {
            label: entry.rule().to_string(),
            weight: if weight > 0 {
                format!("+{weight}")
            } else {
                weight.to_string()
            },
            style: RowStyle::for_weight(weight),
        }
    }

    /// Borrowed view used for JSON output.
    pub fn view(&self) -> RowView<'_> {
        RowView {
            label: &self.label,
            weight: &self.weight,
            style: self.style,
            class: self.style.class_name(),
        }
    }
}

/// Serialisable form of a [`Row`] that also carries the style's class name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView<'a> {
    pub label: &'a str,
    pub weight: &'a str,
    pub style: RowStyle,
    pub class: &'static str,
}

/// Render a bundle to rows, preserving entry order.
pub fn render(bundle: &ReasoningBundle) -> Vec<Row> {
    bundle.entries.iter().map(Row::from_entry).collect()
}

/// Render an untyped bundle document.
///
/// Missing or malformed bundles, and bundles whose `entries` is absent or not
/// an array, render as zero rows.
pub fn render_value(value: &Value) -> Vec<Row> {
    render(&ReasoningBundle::from_json_value(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::REASONING_V1;
    use serde_json::json;

    fn bundle(entries: &[(&str, i64)]) -> ReasoningBundle {
        ReasoningBundle::new(
            REASONING_V1,
            entries
                .iter()
                .map(|(r, w)| ReasoningEntry::new(r, *w).unwrap())
                .collect(),
        )
    }

    #[test]
    fn zero_weight_is_neutral_without_sign() {
        let rows = render(&bundle(&[("X", 0)]));
        assert_eq!(
            rows,
            vec![Row {
                label: "X".into(),
                weight: "0".into(),
                style: RowStyle::Neutral,
            }]
        );
    }

    #[test]
    fn positive_gets_plus_and_negative_keeps_minus() {
        let rows = render(&bundle(&[("Good omen", 5), ("Bad sign", -3)]));
        assert_eq!(rows[0].weight, "+5");
        assert_eq!(rows[0].style, RowStyle::Good);
        assert_eq!(rows[1].weight, "-3");
        assert_eq!(rows[1].style, RowStyle::Bad);
    }

    #[test]
    fn order_is_preserved() {
        let rows = render(&bundle(&[("c", 1), ("a", -1), ("b", 0), ("a", -1)]));
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["c", "a", "b", "a"]);
    }

    #[test]
    fn absent_entries_render_nothing() {
        assert!(render_value(&json!({"version": "v1"})).is_empty());
        assert!(render_value(&json!({"version": "v1", "entries": null})).is_empty());
        assert!(render_value(&json!({"version": "v1", "entries": "oops"})).is_empty());
        assert!(render_value(&Value::Null).is_empty());
    }

    #[test]
    fn render_value_reads_valid_bundle() {
        let rows = render_value(&json!({
            "version": "v1",
            "entries": [{"rule": "X", "weight": 0}]
        }));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].style, RowStyle::Neutral);
        assert_eq!(rows[0].weight, "0");
    }

    #[test]
    fn row_view_json_includes_class() {
        let rows = render(&bundle(&[("Good omen", 5), ("Calm", 0)]));
        let views: Vec<RowView<'_>> = rows.iter().map(Row::view).collect();
        assert_eq!(
            serde_json::to_value(&views).unwrap(),
            json!([
                {"label": "Good omen", "weight": "+5", "style": "good", "class": "text-emerald-600"},
                {"label": "Calm", "weight": "0", "style": "neutral", "class": "text-amber-600"},
            ])
        );
    }

    #[test]
    fn style_strings() {
        assert_eq!(RowStyle::Good.as_str(), "good");
        assert_eq!(RowStyle::Bad.class_name(), "text-red-600");
        assert_eq!(
            serde_json::to_value(RowStyle::Neutral).unwrap(),
            json!("neutral")
        );
    }
}
