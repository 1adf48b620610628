//! Batch outline extraction over a directory of document dumps.
//!
//! Each `*.json` file in the input directory is a serialized
//! [`DocumentText`]. Documents are processed in parallel; one report is
//! written per input, and a failed document produces an empty report
//! plus a failure record rather than aborting the run.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::ExtractionStrategy;
use crate::error::{Error, Result};
use crate::model::{DocumentText, Outline};
use crate::report::{to_json, JsonFormat};

/// One failed document within a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureRecord {
    /// Input file name
    pub name: String,
    /// What went wrong
    pub message: String,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Strategy used for the run
    pub strategy: String,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// When the run finished
    pub finished_at: DateTime<Utc>,
    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
    /// Documents discovered
    pub total: usize,
    /// Documents that produced an outline
    pub succeeded: usize,
    /// Documents that failed
    pub failed: usize,
    /// Per-document failure details
    pub failures: Vec<FailureRecord>,
}

/// Discover `*.json` document dumps in a directory, sorted by name so
/// runs are reproducible.
pub fn discover_documents(input_dir: &Path) -> Result<Vec<PathBuf>> {
    if !input_dir.is_dir() {
        return Err(Error::Config(format!(
            "input directory not found: {}",
            input_dir.display()
        )));
    }
    let mut files: Vec<PathBuf> = fs::read_dir(input_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .map(|ext| ext.eq_ignore_ascii_case("json"))
                    .unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}

fn process_one(path: &Path, strategy: &dyn ExtractionStrategy) -> Result<Outline> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let json = fs::read_to_string(path).map_err(|e| Error::for_document(&name, e.to_string()))?;
    let doc =
        DocumentText::from_json(&json).map_err(|e| Error::for_document(&name, e.to_string()))?;
    strategy
        .extract_outline(&doc)
        .map_err(|e| Error::for_document(&name, e.to_string()))
}

/// Extract outlines for every document dump in `input_dir`, writing one
/// report per input into `output_dir` under the same file stem.
pub fn process_directory(
    input_dir: &Path,
    output_dir: &Path,
    strategy: &dyn ExtractionStrategy,
    format: JsonFormat,
) -> Result<RunSummary> {
    process_directory_with(input_dir, output_dir, strategy, format, |_| {})
}

/// Like [`process_directory`], invoking `on_document` with each file name
/// as it completes. The callback runs on worker threads.
pub fn process_directory_with(
    input_dir: &Path,
    output_dir: &Path,
    strategy: &dyn ExtractionStrategy,
    format: JsonFormat,
    on_document: impl Fn(&str) + Sync,
) -> Result<RunSummary> {
    let files = discover_documents(input_dir)?;
    fs::create_dir_all(output_dir)?;

    let started_at = Utc::now();
    let clock = Instant::now();
    log::info!(
        "batch: {} documents, strategy '{}'",
        files.len(),
        strategy.name()
    );

    let results: Vec<Option<FailureRecord>> = files
        .par_iter()
        .map(|path| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            let out_path = output_dir.join(&name);

            let (outline, failure) = match process_one(path, strategy) {
                Ok(outline) => {
                    log::debug!(
                        "{}: '{}', {} headings",
                        name,
                        outline.title,
                        outline.headings.len()
                    );
                    (outline, None)
                }
                Err(e) => {
                    log::warn!("{}: {}", name, e);
                    (
                        Outline::empty(),
                        Some(FailureRecord {
                            name: name.clone(),
                            message: e.to_string(),
                        }),
                    )
                }
            };

            // A failed document still gets a report file, so downstream
            // consumers see one output per input.
            let outcome =
                match to_json(&outline, format).and_then(|json| Ok(fs::write(&out_path, json)?)) {
                    Ok(()) => failure,
                    Err(e) => {
                        log::warn!("{}: failed to write report: {}", name, e);
                        Some(failure.unwrap_or(FailureRecord {
                            name: name.clone(),
                            message: e.to_string(),
                        }))
                    }
                };
            on_document(&name);
            outcome
        })
        .collect();

    let failures: Vec<FailureRecord> = results.into_iter().flatten().collect();
    let finished_at = Utc::now();
    let summary = RunSummary {
        strategy: strategy.name().to_string(),
        started_at,
        finished_at,
        duration_ms: clock.elapsed().as_millis() as u64,
        total: files.len(),
        succeeded: files.len() - failures.len(),
        failed: failures.len(),
        failures,
    };
    log::info!(
        "batch: {}/{} succeeded in {}ms",
        summary.succeeded,
        summary.total,
        summary.duration_ms
    );
    Ok(summary)
}
