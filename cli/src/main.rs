//! Command line interface for untoc outline extraction.

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use untoc::{
    batch, build_strategy, model::DocumentText, report, EngineConfig, JsonFormat, StrategyKind,
};

#[derive(Parser)]
#[command(
    name = "untoc",
    version,
    about = "Infer document outlines from positioned text elements",
    long_about = "Reads document text dumps (JSON arrays of positioned text lines) and \
                  recovers the title and H1-H4 heading hierarchy without relying on \
                  embedded bookmarks."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract the outline of a single document dump
    Extract {
        /// Input document dump (JSON)
        input: PathBuf,

        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Extraction strategy: auto, context, font-size
        #[arg(short, long, default_value = "auto")]
        strategy: String,

        /// Heading acceptance threshold for the context strategy
        #[arg(short, long)]
        threshold: Option<f32>,

        /// Emit single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Extract outlines for every document dump in a directory
    Batch {
        /// Directory of document dumps
        input_dir: PathBuf,

        /// Directory for the per-document reports
        output_dir: PathBuf,

        /// Extraction strategy: auto, context, font-size
        #[arg(short, long, default_value = "auto")]
        strategy: String,

        /// Heading acceptance threshold for the context strategy
        #[arg(short, long)]
        threshold: Option<f32>,

        /// Emit single-line JSON reports
        #[arg(long)]
        compact: bool,

        /// Also write the run summary (counts, timings, failures) here
        #[arg(long)]
        summary: Option<PathBuf>,
    },
}

fn build_config(threshold: Option<f32>) -> EngineConfig {
    let config = EngineConfig::default();
    match threshold {
        Some(t) => config.with_threshold(t),
        None => config,
    }
}

fn format_for(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn run() -> untoc::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Extract {
            input,
            output,
            strategy,
            threshold,
            compact,
        } => {
            let kind: StrategyKind = strategy.parse()?;
            let config = build_config(threshold);
            let strategy = build_strategy(kind, &config, None)?;

            log::info!("extracting outline from {}", input.display());
            let json = fs::read_to_string(&input)?;
            let doc = DocumentText::from_json(&json)?;
            let outline = strategy.extract_outline(&doc)?;
            let rendered = report::to_json(&outline, format_for(compact))?;

            match output {
                Some(path) => {
                    fs::write(&path, rendered)?;
                    eprintln!(
                        "{} {} ({} headings)",
                        "Wrote".green().bold(),
                        path.display(),
                        outline.headings.len()
                    );
                }
                None => println!("{rendered}"),
            }
        }

        Command::Batch {
            input_dir,
            output_dir,
            strategy,
            threshold,
            compact,
            summary: summary_path,
        } => {
            let kind: StrategyKind = strategy.parse()?;
            let config = build_config(threshold);
            let strategy = build_strategy(kind, &config, None)?;

            let files = batch::discover_documents(&input_dir)?;
            let bar = ProgressBar::new(files.len() as u64);
            bar.set_style(
                ProgressStyle::with_template(
                    "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
            );
            bar.set_message(format!("strategy: {kind}"));

            let summary = batch::process_directory_with(
                &input_dir,
                &output_dir,
                strategy.as_ref(),
                format_for(compact),
                |_| bar.inc(1),
            )?;
            bar.finish_and_clear();

            if let Some(path) = summary_path {
                fs::write(&path, serde_json::to_string_pretty(&summary)?)?;
            }

            println!(
                "{} {}/{} documents in {}ms",
                "Processed".green().bold(),
                summary.succeeded,
                summary.total,
                summary.duration_ms
            );
            for failure in &summary.failures {
                eprintln!(
                    "  {} {}: {}",
                    "failed".yellow(),
                    failure.name,
                    failure.message
                );
            }
            if summary.failed > 0 {
                eprintln!(
                    "{} {} document(s) produced empty reports",
                    "Warning:".yellow().bold(),
                    summary.failed
                );
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}
