use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use revaccept_core::{accept_all_revisions, RevisionCounts, WmlDocument};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")");

#[derive(Parser)]
#[command(name = "revaccept")]
#[command(about = "Accept all tracked changes in a .docx file", long_about = None)]
#[command(version, long_version = LONG_VERSION)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply every insertion, drop every deletion, and write the result
    Accept {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(long)]
        json: bool,
    },
    /// Report the tracked changes in a document without modifying it
    Info {
        #[arg(short, long)]
        file: PathBuf,

        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct PartReport {
    part: String,
    #[serde(flatten)]
    counts: RevisionCounts,
}

#[derive(Serialize)]
struct Report {
    file: String,
    #[serde(flatten)]
    total: RevisionCounts,
    parts: Vec<PartReport>,
}

impl Report {
    fn new(path: &Path, by_part: Vec<(String, RevisionCounts)>) -> Self {
        let parts: Vec<PartReport> = by_part
            .into_iter()
            .map(|(part, counts)| PartReport { part, counts })
            .collect();
        Self {
            file: path.display().to_string(),
            total: parts.iter().map(|p| p.counts).sum(),
            parts,
        }
    }

    fn print(&self, json: bool) -> Result<()> {
        if json {
            println!("{}", serde_json::to_string_pretty(self)?);
            return Ok(());
        }
        println!("{}", self.file);
        for part in self.parts.iter().filter(|p| !p.counts.is_empty()) {
            println!(
                "  {}: {} insertions, {} deletions",
                part.part, part.counts.insertions, part.counts.deletions
            );
        }
        println!(
            "  total: {} insertions, {} deletions",
            self.total.insertions, self.total.deletions
        );
        Ok(())
    }
}

fn load(path: &Path) -> Result<WmlDocument> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    WmlDocument::from_bytes(&bytes).with_context(|| format!("failed to load {}", path.display()))
}

/// Resolve `doc` and report what was resolved, part by part.
fn accept(path: &Path, doc: &mut WmlDocument) -> Report {
    Report::new(path, accept_all_revisions(doc).into_parts())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Accept {
            input,
            output,
            json,
        } => {
            let mut doc = load(&input)?;
            let report = accept(&input, &mut doc);

            let bytes = doc
                .to_bytes()
                .with_context(|| format!("failed to serialize {}", input.display()))?;
            std::fs::write(&output, bytes)
                .with_context(|| format!("failed to write {}", output.display()))?;
            info!(output = %output.display(), "wrote resolved document");

            report.print(json)
        }
        Commands::Info { file, json } => {
            let doc = load(&file)?;
            Report::new(&file, doc.revisions_by_part()).print(json)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
