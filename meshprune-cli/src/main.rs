mod config;
mod explain;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use config::{ConfigMerger, MergedConfig};
use meshprune_core::adapters::{FsContactSource, FsWritePort};
use meshprune_core::export::DISCLAIMER;
use meshprune_core::pipeline::{ToolError, run_export, run_review, write_review_artifacts};
use meshprune_core::settings::{BulkAction, ExportSettings, ReviewSettings};
use meshprune_render::{render_review_md, render_review_text};
use meshprune_types::report::ToolInfo;
use std::process::ExitCode;
use tracing::{debug, error, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "meshprune",
    version,
    about = "Suggest which Meshcore contacts to drop and write a cleaned export."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Classify every contact in an export and show keep/remove suggestions.
    Review(ReviewArgs),
    /// Write a cleaned export containing the selected contacts.
    Export(ExportArgs),
    /// Explain what a retention rule does and when it suggests removal.
    Explain(ExplainArgs),
    /// List all retention rules.
    ListRules(ListRulesArgs),
}

#[derive(Debug, clap::Args)]
struct RuleArgs {
    /// Evaluation instant as RFC 3339 (default: now).
    #[arg(long, value_parser = parse_now)]
    now: Option<DateTime<Utc>>,

    /// Days without activity after which a contact counts as stale.
    #[arg(long)]
    stale_after_days: Option<i64>,

    /// Extra routing path values to treat as "flood" (no custom path).
    #[arg(long = "flood-marker")]
    flood_markers: Vec<String>,

    /// Config file (default: meshprune.toml next to the input file).
    #[arg(long)]
    config: Option<Utf8PathBuf>,
}

#[derive(Debug, Parser)]
struct ReviewArgs {
    /// Meshcore contacts export (JSON).
    input: Utf8PathBuf,

    /// Output format for stdout.
    #[arg(long, value_enum, default_value = "text")]
    format: ReviewFormat,

    /// Also write review.json and review.md into this directory.
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,

    #[command(flatten)]
    rules: RuleArgs,
}

#[derive(Debug, Parser)]
struct ExportArgs {
    /// Meshcore contacts export (JSON).
    input: Utf8PathBuf,

    /// Keep the contact with this id, whatever the suggestion.
    #[arg(long = "keep")]
    keep: Vec<usize>,

    /// Drop the contact with this id, whatever the suggestion.
    #[arg(long = "remove")]
    remove: Vec<usize>,

    /// Select every contact before applying --keep/--remove.
    #[arg(long, conflicts_with = "remove_all")]
    keep_all: bool,

    /// Deselect every contact before applying --keep/--remove.
    #[arg(long)]
    remove_all: bool,

    /// Accept the export disclaimer. Without it nothing is written.
    #[arg(long, default_value_t = false)]
    accept_disclaimer: bool,

    /// Directory for the cleaned file (default: next to the input).
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,

    /// Suffix appended to the input's base name.
    #[arg(long)]
    suffix: Option<String>,

    #[command(flatten)]
    rules: RuleArgs,
}

#[derive(Debug, Parser)]
struct ExplainArgs {
    /// Rule key or rule id to explain (e.g., "repeater", "retain.sensor").
    rule: String,
}

#[derive(Debug, Parser)]
struct ListRulesArgs {
    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ReviewFormat {
    Text,
    Markdown,
    Json,
}

fn parse_now(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp: {e}"))
}

fn main() -> ExitCode {
    match real_main() {
        Ok(()) => ExitCode::from(0),
        Err(ToolError::ConsentRequired) => {
            eprintln!("{DISCLAIMER}");
            eprintln!();
            eprintln!("Re-run with --accept-disclaimer to write the cleaned file.");
            ExitCode::from(2)
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::from(1)
        }
    }
}

fn real_main() -> Result<(), ToolError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Review(args) => cmd_review(args),
        Command::Export(args) => cmd_export(args),
        Command::Explain(args) => Ok(cmd_explain(args)?),
        Command::ListRules(args) => Ok(cmd_list_rules(args)?),
    }
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "meshprune".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    }
}

fn input_dir(input: &Utf8Path) -> Utf8PathBuf {
    match input.parent() {
        Some(p) if !p.as_str().is_empty() => p.to_path_buf(),
        _ => Utf8PathBuf::from("."),
    }
}

fn merged_config(input: &Utf8Path, rules: &RuleArgs) -> anyhow::Result<MergedConfig> {
    let file_config = config::load_or_default(rules.config.as_deref(), &input_dir(input))?;
    Ok(ConfigMerger::new(file_config).merge_rule_args(rules.stale_after_days, &rules.flood_markers))
}

fn review_settings(merged: &MergedConfig, rules: &RuleArgs) -> anyhow::Result<ReviewSettings> {
    if merged.stale_after_days < 0 {
        anyhow::bail!(
            "--stale-after-days must not be negative (got {})",
            merged.stale_after_days
        );
    }
    Ok(ReviewSettings {
        now: rules.now,
        stale_after_days: merged.stale_after_days,
        flood_markers: merged.flood_markers.clone(),
    })
}

fn cmd_review(args: ReviewArgs) -> Result<(), ToolError> {
    let merged = merged_config(&args.input, &args.rules)?;
    let settings = review_settings(&merged, &args.rules)?;
    debug!(input = %args.input, ?settings, "review");

    let source = FsContactSource::new(args.input.clone());
    let outcome = run_review(&settings, &source, tool_info())?;

    if let Some(out_dir) = &args.out_dir {
        write_review_artifacts(&outcome, out_dir, &FsWritePort)?;
    }

    let rendered = match args.format {
        ReviewFormat::Text => render_review_text(&outcome.report),
        ReviewFormat::Markdown => render_review_md(&outcome.report),
        ReviewFormat::Json => {
            let mut json = serde_json::to_string_pretty(&outcome.report)
                .context("serialize review")?;
            json.push('\n');
            json
        }
    };
    print!("{rendered}");
    Ok(())
}

fn cmd_export(args: ExportArgs) -> Result<(), ToolError> {
    let merged = merged_config(&args.input, &args.rules)?;
    let review = review_settings(&merged, &args.rules)?;

    let out_dir = args
        .out_dir
        .clone()
        .or_else(|| merged.out_dir.clone())
        .unwrap_or_else(|| input_dir(&args.input));
    let bulk = if args.keep_all {
        Some(BulkAction::KeepAll)
    } else if args.remove_all {
        Some(BulkAction::RemoveAll)
    } else {
        None
    };

    let settings = ExportSettings {
        review,
        out_dir,
        suffix: args.suffix.clone().unwrap_or_else(|| merged.suffix.clone()),
        bulk,
        keep: args.keep.clone(),
        remove: args.remove.clone(),
        accept_disclaimer: args.accept_disclaimer,
    };
    debug!(input = %args.input, ?settings, "export");

    let source = FsContactSource::new(args.input.clone());
    let outcome = run_export(&settings, &source, &FsWritePort, tool_info())?;

    for id in &outcome.unknown_ids {
        warn!(id = *id, "no contact with this id; ignored");
    }

    println!(
        "Wrote {} of {} contacts to {}",
        outcome.report.summary.keep, outcome.report.summary.total, outcome.path
    );
    Ok(())
}

fn cmd_explain(args: ExplainArgs) -> anyhow::Result<()> {
    use explain::{format_category, list_rule_keys, lookup_rule};

    let Some(rule) = lookup_rule(&args.rule) else {
        let available = list_rule_keys().join(", ");
        anyhow::bail!(
            "Unknown rule key: '{}'\n\nAvailable rules: {}",
            args.rule,
            available
        );
    };

    println!("================================================================================");
    println!("RULE: {}", rule.title);
    println!("================================================================================");
    println!();
    println!("Key:      {}", rule.key);
    println!("Rule ID:  {}", rule.rule_id);
    println!("Applies:  {}", format_category(rule.category));
    println!();

    println!("DESCRIPTION");
    println!("--------------------------------------------------------------------------------");
    println!("{}", rule.description);
    println!();

    println!("WHEN IT SUGGESTS REMOVAL");
    println!("--------------------------------------------------------------------------------");
    println!("{}", rule.remove_when);
    println!();

    println!("IF YOU DISAGREE");
    println!("--------------------------------------------------------------------------------");
    println!("{}", rule.remediation);
    println!();

    Ok(())
}

fn cmd_list_rules(args: ListRulesArgs) -> anyhow::Result<()> {
    use explain::{RULE_REGISTRY, format_category};

    match args.format {
        OutputFormat::Text => {
            println!("Retention rules:\n");
            println!("  {:<18} {:<10} TITLE", "KEY", "APPLIES");
            println!("  {:<18} {:<10} -----", "---", "-------");
            for rule in RULE_REGISTRY {
                println!(
                    "  {:<18} {:<10} {}",
                    rule.key,
                    format_category(rule.category),
                    rule.title
                );
            }
            println!();
            println!("Use 'meshprune explain <key>' for details.");
        }
        OutputFormat::Json => {
            let rules: Vec<_> = RULE_REGISTRY
                .iter()
                .map(|r| {
                    serde_json::json!({
                        "key": r.key,
                        "rule_id": r.rule_id,
                        "title": r.title,
                        "applies_to": r.category.map(|c| c.as_str()),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rules)?);
        }
    }
    Ok(())
}
