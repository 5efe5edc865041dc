//! Terminal display for reasoning bundles.
//!
//! Prints rendered rows as aligned columns: label, signed weight, style tag,
//! followed by a tally footer.

use augur_core::{BundleSummary, ReasoningBundle, Row, render};

const LABEL_WIDTH: usize = 40;
const WEIGHT_WIDTH: usize = 6;

// ── Public API ──

/// Print a bundle as a block of rows with a summary footer.
pub fn print_bundle(bundle: &ReasoningBundle) {
    println!("=== {} ===", header(bundle));

    let rows = render(bundle);
    if rows.is_empty() {
        println!("  (no entries)");
        return;
    }

    for row in &rows {
        println!("{}", format_row(row));
    }
    println!();
    println!("{}", format_summary(&bundle.summary()));
}

// ── Formatting ──

fn header(bundle: &ReasoningBundle) -> String {
    if bundle.version.is_empty() {
        "reasoning (untagged)".to_string()
    } else {
        format!("reasoning {}", bundle.version)
    }
}

fn format_row(row: &Row) -> String {
    format!(
        "  {:<LABEL_WIDTH$} {:>WEIGHT_WIDTH$}  [{}]",
        shorten(&row.label),
        row.weight,
        row.style.as_str()
    )
}

fn format_summary(summary: &BundleSummary) -> String {
    let net = if summary.net_weight > 0 {
        format!("+{}", summary.net_weight)
    } else {
        summary.net_weight.to_string()
    };
    format!(
        "  {:<LABEL_WIDTH$} {:>WEIGHT_WIDTH$}  ({} good, {} bad, {} neutral)",
        "net", net, summary.positive, summary.negative, summary.neutral
    )
}

/// Cut labels wider than the label column, marking the cut with `...`.
fn shorten(label: &str) -> String {
    if label.chars().count() > LABEL_WIDTH {
        let kept: String = label.chars().take(LABEL_WIDTH - 3).collect();
        format!("{kept}...")
    } else {
        label.to_string()
    }
}
