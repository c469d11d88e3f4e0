// Evaluation artifacts

use std::path::PathBuf;

use sentival_recon::{EvaluationReport, VerdictThresholds};

use crate::csv::{write_errors, CsvFormat};
use crate::error::IoError;
use crate::fs::{remove_if_exists, write_atomic};
use crate::heatmap::render_svg;
use crate::report::render_report;

/// Where an evaluation run writes its artifacts.
#[derive(Debug, Clone)]
pub struct EvaluationOutputs {
    pub errors: PathBuf,
    pub report: PathBuf,
    pub heatmap: PathBuf,
}

/// What a run actually wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenOutputs {
    /// `None` when the run had no errors.
    pub errors: Option<PathBuf>,
    pub report: PathBuf,
    pub heatmap: PathBuf,
    /// An error subset from a previous run was deleted.
    pub stale_errors_removed: bool,
}

/// Render and write the heatmap, error subset and text report.
///
/// Everything is rendered before the first write, so a rendering failure
/// leaves previous outputs untouched. With zero errors no error file is
/// written and a stale one is removed.
pub fn write_evaluation(
    report: &EvaluationReport,
    outputs: &EvaluationOutputs,
    thresholds: &VerdictThresholds,
    fmt: &CsvFormat,
) -> Result<WrittenOutputs, IoError> {
    let svg = render_svg(&report.confusion, report.accuracy)?;
    let text = render_report(report, thresholds);

    write_atomic(&outputs.heatmap, svg.as_bytes())?;

    let (errors, stale_errors_removed) = if report.errors.is_empty() {
        let removed = remove_if_exists(&outputs.errors)?;
        if removed {
            log::info!("removed stale {}", outputs.errors.display());
        }
        (None, removed)
    } else {
        write_errors(&outputs.errors, &report.errors, fmt)?;
        (Some(outputs.errors.clone()), false)
    };

    // Report is always UTF-8
    write_atomic(&outputs.report, text.as_bytes())?;

    Ok(WrittenOutputs {
        errors,
        report: outputs.report.clone(),
        heatmap: outputs.heatmap.clone(),
        stale_errors_removed,
    })
}
