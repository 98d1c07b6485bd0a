//! Conversion summary printer

use colored::Colorize;

use super::run::RunOutcome;
use super::Context;
use crate::model::ConversionReport;

/// Plain-text lines describing one report: header, counters, then warnings
pub fn report_lines(report: &ConversionReport) -> Vec<String> {
    let out = report
        .output_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string());

    let mut lines = vec![format!(
        "{} -> {} ({} -> {})",
        report.source.display(),
        out,
        report.input_encoding,
        report.output_encoding
    )];
    for (kind, n) in report.nonzero() {
        lines.push(format!("    {}: {}", kind, n));
    }
    for warning in &report.warnings {
        lines.push(format!(
            "    Line {}: {}",
            warning.line_number, warning.message
        ));
    }
    lines
}

/// Print the end-of-run summary
pub fn print_summary(ctx: &Context, outcome: &RunOutcome) {
    let title = if ctx.dry_run {
        "=== Conversion Summary (dry run) ==="
    } else {
        "=== Conversion Summary ==="
    };
    println!("{}", title.bold());

    for report in &outcome.reports {
        let mut lines = report_lines(report).into_iter();
        if let Some(header) = lines.next() {
            ctx.print_success(&header);
        }
        let counters = report.nonzero().count();
        for (idx, line) in lines.enumerate() {
            if idx < counters {
                println!("{}", line.dimmed());
            } else {
                println!("  {} {}", "⚠".yellow(), line.trim_start());
            }
        }
    }

    for src in &outcome.skipped {
        ctx.print_warning(&format!("Input not found, skipped: {}", src.display()));
    }

    let rewrites: usize = outcome.reports.iter().map(ConversionReport::total).sum();
    let warnings: usize = outcome.reports.iter().map(|r| r.warnings.len()).sum();
    println!();
    println!(
        "{}",
        format!(
            "{} file(s) converted, {} rewrite(s), {} warning(s), {} skipped",
            outcome.reports.len(),
            rewrites,
            warnings,
            outcome.skipped.len()
        )
        .dimmed()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ConversionWarning, RewriteKind};
    use std::path::PathBuf;

    #[test]
    fn test_report_lines() {
        let mut report = ConversionReport::new("fx/glow.anm");
        report.output_path = Some(PathBuf::from("converted/fx/glow.anm2"));
        report.input_encoding = "Shift_JIS".into();
        report.add(RewriteKind::BlendConverted, 2);
        report.bump(RewriteKind::InsertedSamplerClamp);
        report.add_warning(ConversionWarning::new(7, "not vectorized"));

        assert_eq!(
            report_lines(&report),
            vec![
                "fx/glow.anm -> converted/fx/glow.anm2 (Shift_JIS -> utf-8)",
                "    blend_converted: 2",
                "    inserted_sampler_clamp: 1",
                "    Line 7: not vectorized",
            ]
        );
    }

    #[test]
    fn test_report_lines_without_output() {
        let report = ConversionReport::new("a.obj");
        let lines = report_lines(&report);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("a.obj -> -"));
    }
}
