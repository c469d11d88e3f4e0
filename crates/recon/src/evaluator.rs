//! Scores automated labels against manual ones.
//!
//! Pure: takes the annotated rows, returns an [`EvaluationReport`]. Writing
//! the report, error subset and heatmap is the io crate's job.

use std::fmt;

use crate::confusion::ConfusionMatrix;
use crate::error::ValidationError;
use crate::label::{is_blank, Sentiment};
use crate::metrics::ClassificationMetrics;
use crate::model::{columns, ErrorRecord, EvaluationReport, SampleRecord};
use crate::verdict::VerdictThresholds;

/// Lifecycle of one evaluation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationStage {
    Loaded,
    Validated,
    Normalized,
    Scored,
    Reported,
}

impl fmt::Display for EvaluationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loaded => write!(f, "loaded"),
            Self::Validated => write!(f, "validated"),
            Self::Normalized => write!(f, "normalized"),
            Self::Scored => write!(f, "scored"),
            Self::Reported => write!(f, "reported"),
        }
    }
}

/// An annotated row with both labels parsed.
struct LabeledRow<'a> {
    row: usize,
    record: &'a SampleRecord,
    automated: Sentiment,
    manual: Sentiment,
}

/// Run the evaluation up to `Scored`.
pub fn evaluate(
    rows: &[SampleRecord],
    thresholds: &VerdictThresholds,
) -> Result<EvaluationReport, ValidationError> {
    log::debug!("evaluation stage: {} ({} rows)", EvaluationStage::Loaded, rows.len());

    let annotated = completeness_check(rows)?;
    let unannotated = rows.len() - annotated.len();
    log::debug!("evaluation stage: {}", EvaluationStage::Validated);

    let labeled = normalize(&annotated)?;
    log::debug!("evaluation stage: {}", EvaluationStage::Normalized);

    let mut confusion = ConfusionMatrix::new();
    let mut errors = Vec::new();
    for row in &labeled {
        confusion.record(row.manual, row.automated);
        if row.automated != row.manual {
            errors.push(ErrorRecord {
                row: row.row,
                id: row.record.id.clone(),
                text: row.record.text.clone(),
                automated: row.automated,
                manual: row.manual,
            });
        }
    }

    let metrics = ClassificationMetrics::from_confusion_matrix(&confusion);
    let accuracy = confusion.accuracy();
    let verdict = thresholds.classify(accuracy);
    log::debug!(
        "evaluation stage: {} (accuracy {accuracy:.4}, {} errors)",
        EvaluationStage::Scored,
        errors.len()
    );

    Ok(EvaluationReport {
        total_rows: rows.len(),
        annotated: labeled.len(),
        unannotated,
        correct: confusion.correct(),
        accuracy,
        confusion,
        metrics,
        verdict,
        errors,
    })
}

/// Keep rows with a manual label. Fails when none remain.
fn completeness_check(rows: &[SampleRecord]) -> Result<Vec<(usize, &SampleRecord)>, ValidationError> {
    let annotated: Vec<(usize, &SampleRecord)> = rows
        .iter()
        .enumerate()
        .filter(|(_, r)| !is_blank(r.manual.as_deref()))
        .collect();

    let missing = rows.len() - annotated.len();
    if missing > 0 {
        log::info!("{missing} of {} rows have no manual label and are excluded", rows.len());
    }

    if annotated.is_empty() {
        return Err(ValidationError::InsufficientData(format!(
            "none of the {} rows carry a manual label",
            rows.len()
        )));
    }
    Ok(annotated)
}

fn normalize<'a>(annotated: &[(usize, &'a SampleRecord)]) -> Result<Vec<LabeledRow<'a>>, ValidationError> {
    annotated
        .iter()
        .map(|&(row, record)| {
            let manual_raw = record.manual.as_deref().unwrap_or("");
            Ok(LabeledRow {
                row,
                record,
                automated: parse(record, columns::AUTOMATED, &record.automated)?,
                manual: parse(record, columns::MANUAL, manual_raw)?,
            })
        })
        .collect()
}

fn parse(record: &SampleRecord, column: &'static str, raw: &str) -> Result<Sentiment, ValidationError> {
    Sentiment::parse_label(raw).ok_or_else(|| ValidationError::UnknownLabel {
        record_id: record.id.clone(),
        column,
        value: raw.to_string(),
    })
}
