//! Conversion run: read, decode, convert and write every input

use anyhow::{Context as _, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::summary::print_summary;
use super::Context;
use crate::convert::convert_text;
use crate::error::{ConvertError, ConvertResult};
use crate::model::{Config, ConversionReport, ReportFile};
use crate::utils::encoding::decode_with_fallback;
use crate::utils::path::{output_path_for, read_bytes, write_file};

/// Where and how one file is converted
#[derive(Debug, Clone, Copy)]
pub struct Job<'a> {
    pub config: &'a Config,
    pub out_root: &'a Path,
    pub cwd: &'a Path,
    pub dry_run: bool,
}

impl<'a> Job<'a> {
    pub fn from_context(ctx: &'a Context) -> Self {
        Self {
            config: &ctx.config,
            out_root: &ctx.out_root,
            cwd: &ctx.cwd,
            dry_run: ctx.dry_run,
        }
    }
}

/// Convert one file and return its report
pub fn process_file(src: &Path, job: Job<'_>) -> ConvertResult<ConversionReport> {
    let bytes = read_bytes(src)?;
    let decoded = decode_with_fallback(&bytes, &job.config.input.encodings);

    let mut report = ConversionReport::new(src);
    report.input_encoding = decoded.encoding;

    let converted = convert_text(&decoded.text, &job.config.passes, &mut report);
    let out_path = output_path_for(src, job.out_root, job.cwd);

    if !job.dry_run {
        write_file(&out_path, &converted)?;
    }
    info!(
        src = %src.display(),
        out = %out_path.display(),
        rewrites = report.total(),
        "converted"
    );

    report.output_path = Some(out_path);
    Ok(report)
}

/// Result of converting a batch of inputs
#[derive(Debug, Default)]
pub struct RunOutcome {
    /// One report per converted file, in input order
    pub reports: Vec<ConversionReport>,
    /// Inputs that did not exist
    pub skipped: Vec<PathBuf>,
}

/// Convert every input in parallel; missing inputs are skipped
pub fn convert_all(inputs: &[PathBuf], job: Job<'_>) -> ConvertResult<RunOutcome> {
    let (existing, skipped): (Vec<&PathBuf>, Vec<&PathBuf>) =
        inputs.iter().partition(|src| src.is_file());
    for src in &skipped {
        warn!(path = %src.display(), "input not found, skipping");
    }

    let reports = existing
        .par_iter()
        .map(|src| process_file(src, job))
        .collect::<ConvertResult<Vec<_>>>()?;

    Ok(RunOutcome {
        reports,
        skipped: skipped.into_iter().cloned().collect(),
    })
}

/// Serialize all reports to `path` as TOML
pub fn write_report(path: &Path, reports: &[ConversionReport]) -> ConvertResult<()> {
    let content = ReportFile::new(reports.to_vec())
        .to_toml()
        .map_err(ConvertError::report)?;
    write_file(path, &content)
}

/// Execute a full run for the parsed command line
pub fn execute(ctx: &Context, inputs: &[PathBuf]) -> Result<()> {
    let outcome = convert_all(inputs, Job::from_context(ctx))?;

    if let Some(path) = &ctx.report_file {
        write_report(path, &outcome.reports)
            .with_context(|| format!("failed to write report {}", path.display()))?;
    }

    if !ctx.quiet {
        print_summary(ctx, &outcome);
    }
    Ok(())
}
