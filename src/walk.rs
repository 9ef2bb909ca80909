use crate::config::ConfigTable;
use crate::convert::{extension_of, output_path_for, ConvertOutcome, Converter};
use crate::errors::Lit2mdError;
use crate::types::{ConversionJob, ConvertedFile};
use log::debug;
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Everything discovered under an input root before any conversion runs.
#[derive(Debug, Default)]
pub struct WalkPlan {
    /// Output directories to mirror, parents before children.
    pub directories: Vec<PathBuf>,
    pub jobs: Vec<ConversionJob>,
    /// Input files with no configured extension.
    pub skipped: Vec<PathBuf>,
    pub errors: Vec<Lit2mdError>,
}

/// Result of a whole run. Converted files keep discovery order.
#[derive(Debug, Default)]
pub struct WalkReport {
    pub converted: Vec<ConvertedFile>,
    pub skipped: Vec<PathBuf>,
    pub errors: Vec<Lit2mdError>,
}

impl WalkReport {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Map `target` under `base` onto the same relative spot under `output`.
fn mirror_path(base: &Path, target: &Path, output: &Path) -> PathBuf {
    match target.strip_prefix(base) {
        Ok(rel) if rel.as_os_str().is_empty() => output.to_path_buf(),
        Ok(rel) => output.join(rel),
        Err(_) => output.join(target.file_name().unwrap_or(target.as_os_str())),
    }
}

/// A single input file written into an existing output directory lands inside it.
fn output_root(input: &Path, output: &Path) -> PathBuf {
    match input.file_name() {
        Some(name) if input.is_file() && output.is_dir() => output.join(name),
        _ => output.to_path_buf(),
    }
}

/// True for the directory the run is writing into, so earlier output is never read back.
fn is_output_dir(entry: &walkdir::DirEntry, output: Option<&Path>) -> bool {
    match output {
        Some(output) if entry.depth() > 0 && entry.file_type().is_dir() => {
            fs::canonicalize(entry.path()).map_or(false, |p| p == output)
        }
        _ => false,
    }
}

fn discovery_error(root: &Path, err: walkdir::Error) -> Lit2mdError {
    let path = err.path().unwrap_or(root).to_path_buf();
    let source: io::Error = err.into();
    Lit2mdError::from_read(&path, source)
}

/// Walk `input` depth-first and decide what to do with every entry.
///
/// Errors are recorded against their path and the walk carries on with the siblings.
pub fn plan(input: &Path, output: &Path, table: &ConfigTable) -> WalkPlan {
    let mut plan = WalkPlan::default();
    let output = output_root(input, output);
    let canonical_output = fs::canonicalize(&output).ok();

    let walker = WalkDir::new(input)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| !is_output_dir(e, canonical_output.as_deref()));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                plan.errors.push(discovery_error(input, err));
                continue;
            }
        };
        let path = entry.path();
        let target = mirror_path(input, path, &output);

        if entry.file_type().is_dir() {
            plan.directories.push(target);
            continue;
        }
        if !entry.file_type().is_file() {
            debug!("Skipping non-regular file: {}", path.display());
            plan.skipped.push(path.to_path_buf());
            continue;
        }

        if extension_of(path).and_then(|ext| table.lookup(ext)).is_some() {
            plan.jobs.push(ConversionJob {
                input: path.to_path_buf(),
                output: output_path_for(&target),
            });
        } else {
            debug!("Skipping unconfigured extension: {}", path.display());
            plan.skipped.push(path.to_path_buf());
        }
    }

    plan
}

/// Mirror `input` onto `output`, converting every configured file in parallel.
///
/// Every job runs to completion even when others fail; all errors end up in the report.
pub fn walk(input: &Path, output: &Path, converter: &Converter) -> WalkReport {
    let plan = plan(input, output, converter.table());
    let mut report = WalkReport {
        converted: Vec::with_capacity(plan.jobs.len()),
        skipped: plan.skipped,
        errors: plan.errors,
    };

    for dir in &plan.directories {
        match fs::create_dir_all(dir) {
            Ok(()) => debug!("Ensured directory {}", dir.display()),
            Err(e) => report.errors.push(Lit2mdError::from_write(dir, e)),
        }
    }

    let results: Vec<_> = plan
        .jobs
        .par_iter()
        .map(|job| (job, converter.convert_job(job)))
        .collect();

    for (job, result) in results {
        match result {
            Ok(ConvertOutcome::Converted(file)) => report.converted.push(file),
            Ok(ConvertOutcome::Skipped) => report.skipped.push(job.input.clone()),
            Err(e) => report.errors.push(e),
        }
    }

    report
}
