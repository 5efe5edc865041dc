mod display;

use std::io::{self, BufRead, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;
use augur_core::bundle::{LEGACY, REASONING_V1};
use augur_core::{FlagSources, ReasoningBundle, Row, RowView, render};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "augur", version, about = "Parse and render weighted reasoning annotations")]
struct Cli {
    /// URL query string checked for `useReasoningV1`, e.g. "?useReasoningV1=true".
    /// Replaces the `QUERY_STRING` environment variable when given.
    #[arg(long, global = true)]
    query: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse annotations such as "Good omen (5%)" (reads stdin lines when none are given).
    Parse {
        annotations: Vec<String>,

        /// Print the bundle as JSON instead of rows.
        #[arg(long)]
        json: bool,
    },
    /// Render a reasoning bundle JSON document ("-" or omitted reads stdin).
    Render {
        file: Option<PathBuf>,

        /// Print rows as JSON (label, weight, style, class) instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Print whether the reasoning v1 pipeline is active.
    Flag,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    tracing::info!("augur v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let v1 = flag_sources(cli.query.as_deref()).resolve();

    match cli.command {
        Command::Parse { annotations, json } => run_parse(annotations, json, v1),
        Command::Render { file, json } => run_render(file.as_deref(), json),
        Command::Flag => {
            println!("{v1}");
            Ok(())
        }
    }
}

/// Ambient sources, with `--query` taking the place of the query source when given.
fn flag_sources(query: Option<&str>) -> FlagSources {
    let sources = FlagSources::ambient();
    match query {
        Some(qs) => sources.with_query_string(qs),
        None => sources,
    }
}

fn run_parse(annotations: Vec<String>, json: bool, v1: bool) -> anyhow::Result<()> {
    let lines = if annotations.is_empty() {
        io::stdin()
            .lock()
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .context("reading annotations from stdin")?
    } else {
        annotations
    };

    let version = bundle_version(v1);
    let (bundle, rejected) = ReasoningBundle::from_annotations(version, &lines);
    tracing::info!(
        version,
        accepted = bundle.len(),
        rejected = rejected.len(),
        "parsed annotations"
    );

    for r in &rejected {
        eprintln!("  line {} [{}]: {}", r.line, r.error.kind().as_str(), r.error);
    }

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&bundle).context("serialising bundle")?
        );
    } else if v1 {
        display::print_bundle(&bundle);
    } else {
        for line in legacy_lines(&bundle) {
            println!("{line}");
        }
    }
    Ok(())
}

/// Version tag for bundles built while the v1 pipeline is on or off.
fn bundle_version(v1: bool) -> &'static str {
    if v1 { REASONING_V1 } else { LEGACY }
}

/// Legacy output: each entry in its canonical parenthetical form.
fn legacy_lines(bundle: &ReasoningBundle) -> Vec<String> {
    bundle.entries.iter().map(ToString::to_string).collect()
}

fn run_render(file: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let text = match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading bundle from stdin")?;
            buf
        }
    };

    let bundle = ReasoningBundle::from_json_str(&text).context("parsing bundle JSON")?;
    if json {
        let rows = render(&bundle);
        let views: Vec<RowView<'_>> = rows.iter().map(Row::view).collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&views).context("serialising rows")?
        );
    } else {
        display::print_bundle(&bundle);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_follows_flag() {
        assert_eq!(bundle_version(true), "v1");
        assert_eq!(bundle_version(false), "legacy");
    }

    #[test]
    fn legacy_lines_are_canonical() {
        let (bundle, rejected) = ReasoningBundle::from_annotations(
            bundle_version(false),
            ["Good omen 5%", "nothing here", "Bad sign -3%", "  Calm (0%)  "],
        );
        assert_eq!(rejected.len(), 1);
        assert_eq!(bundle.version, "legacy");
        assert_eq!(
            legacy_lines(&bundle),
            vec!["Good omen (5%)", "Bad sign (-3%)", "Calm (0%)"]
        );
    }

    #[test]
    fn query_flag_overrides_ambient_query() {
        assert!(flag_sources(Some("?useReasoningV1=true")).resolve());
        assert!(!flag_sources(Some("useReasoningV1=false")).resolve());
    }
}
