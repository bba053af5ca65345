//! repmark: batch passes over the exercise record corpus.
//!
//! Rewrites the corpus file in place (apply / force-fix / regen-queries) or
//! reports discrepancies without writing anything (audit). Summaries are
//! printed to stdout as pretty JSON; logs go to stderr.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use repmark_core::{PassMode, RuleSet};
use repmark_corpus::{commit_corpus, read_corpus, run_audit, run_pass};

#[derive(Parser)]
#[command(name = "repmark")]
#[command(author, version, about = "Batch passes over the exercise record corpus")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Insert or correct the tracksWeight flag across the corpus
    Apply {
        /// Corpus file to rewrite
        #[arg(short, long)]
        file: PathBuf,

        /// JSON rule-set file overriding the built-in tables
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print a unified diff instead of writing the file
        #[arg(long)]
        dry_run: bool,
    },

    /// Report stored flags that disagree with the rules, writing nothing
    Audit {
        /// Corpus file to examine
        #[arg(short, long)]
        file: PathBuf,

        /// JSON rule-set file overriding the built-in tables
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Only audit records in this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Rewrite force-listed ids to their curated verdicts, stored values included
    ForceFix {
        /// Corpus file to rewrite
        #[arg(short, long)]
        file: PathBuf,

        /// JSON rule-set file overriding the built-in tables
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print a unified diff instead of writing the file
        #[arg(long)]
        dry_run: bool,
    },

    /// Regenerate stored search queries from record names
    RegenQueries {
        /// Corpus file to rewrite
        #[arg(short, long)]
        file: PathBuf,

        /// JSON rule-set file overriding the built-in tables
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print a unified diff instead of writing the file
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Apply {
            file,
            config,
            dry_run,
        } => cmd_rewrite(&file, config.as_deref(), PassMode::Apply, dry_run),
        Commands::Audit {
            file,
            config,
            category,
        } => cmd_audit(&file, config.as_deref(), category.as_deref()),
        Commands::ForceFix {
            file,
            config,
            dry_run,
        } => cmd_rewrite(&file, config.as_deref(), PassMode::ForceFix, dry_run),
        Commands::RegenQueries {
            file,
            config,
            dry_run,
        } => cmd_rewrite(&file, config.as_deref(), PassMode::RegenQueries, dry_run),
    }
}

fn load_rules(config: Option<&Path>) -> anyhow::Result<RuleSet> {
    Ok(match config {
        Some(path) => RuleSet::from_file(path)?,
        None => RuleSet::default(),
    })
}

fn cmd_rewrite(
    file: &Path,
    config: Option<&Path>,
    mode: PassMode,
    dry_run: bool,
) -> anyhow::Result<()> {
    let rules = load_rules(config)?;
    let corpus = read_corpus(file)?;
    let outcome = run_pass(&corpus, &rules, mode)?;

    // Writing an unchanged corpus would only churn the file's mtime.
    let committed = !dry_run && !outcome.is_noop();
    if dry_run {
        print!("{}", render_diff(file, &corpus, &outcome.corpus));
    } else if committed {
        commit_corpus(file, &outcome.corpus)?;
    }

    let summary = serde_json::json!({
        "mode": outcome.summary.mode,
        "file": file.to_string_lossy(),
        "records_seen": outcome.summary.records_seen,
        "changed": outcome.summary.changed,
        "unchanged": outcome.summary.unchanged,
        "skipped": outcome.summary.skipped,
        "committed": committed,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}

fn cmd_audit(file: &Path, config: Option<&Path>, category: Option<&str>) -> anyhow::Result<()> {
    let rules = load_rules(config)?;
    let corpus = read_corpus(file)?;
    let report = run_audit(&corpus, &rules, category)?;

    // Discrepancies are the report's payload, not a failed run.
    let output = serde_json::json!({
        "file": file.to_string_lossy(),
        "records_seen": report.records_seen,
        "discrepancies": report.discrepancies,
        "skipped": report.skipped,
        "clean": report.is_clean(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

/// Render the dry-run diff: how the corpus would change on disk.
fn render_diff(path: &Path, current: &str, rewritten: &str) -> String {
    let diff = similar::TextDiff::from_lines(current, rewritten);
    let mut output = String::new();

    output.push_str(&format!("--- {} (current)\n", path.display()));
    output.push_str(&format!("+++ {} (rewritten)\n", path.display()));

    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            similar::ChangeTag::Delete => "-",
            similar::ChangeTag::Insert => "+",
            similar::ChangeTag::Equal => " ",
        };
        output.push_str(&format!("{}{}", sign, change));
    }

    output
}
