//! Per-class precision/recall/F1 and the classification report table.

use serde::Serialize;

use crate::confusion::ConfusionMatrix;
use crate::label::Sentiment;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub label: Sentiment,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Averaged precision/recall/F1 across the alphabet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AveragedMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationMetrics {
    pub per_class: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub macro_avg: AveragedMetrics,
    pub weighted_avg: AveragedMetrics,
}

impl ClassificationMetrics {
    /// One-vs-rest metrics for every class in the alphabet. A class with no
    /// predictions (or no true instances) scores 0 rather than NaN.
    pub fn from_confusion_matrix(cm: &ConfusionMatrix) -> Self {
        let per_class: Vec<ClassMetrics> = Sentiment::ALL
            .iter()
            .map(|&label| {
                let tp = cm.true_positives(label) as f64;
                let fp = cm.false_positives(label) as f64;
                let fn_ = cm.false_negatives(label) as f64;

                let precision = if tp + fp > 0.0 { tp / (tp + fp) } else { 0.0 };
                let recall = if tp + fn_ > 0.0 { tp / (tp + fn_) } else { 0.0 };
                let f1 = if precision + recall > 0.0 {
                    2.0 * precision * recall / (precision + recall)
                } else {
                    0.0
                };

                ClassMetrics {
                    label,
                    precision,
                    recall,
                    f1,
                    support: cm.support(label),
                }
            })
            .collect();

        let total_support: usize = per_class.iter().map(|m| m.support).sum();
        let n = per_class.len() as f64;

        // Over the whole alphabet, absent classes included
        let macro_avg = AveragedMetrics {
            precision: per_class.iter().map(|m| m.precision).sum::<f64>() / n,
            recall: per_class.iter().map(|m| m.recall).sum::<f64>() / n,
            f1: per_class.iter().map(|m| m.f1).sum::<f64>() / n,
            support: total_support,
        };

        let weighted = |value: fn(&ClassMetrics) -> f64| -> f64 {
            if total_support == 0 {
                return 0.0;
            }
            per_class
                .iter()
                .map(|m| value(m) * m.support as f64)
                .sum::<f64>()
                / total_support as f64
        };
        let weighted_avg = AveragedMetrics {
            precision: weighted(|m| m.precision),
            recall: weighted(|m| m.recall),
            f1: weighted(|m| m.f1),
            support: total_support,
        };

        Self {
            accuracy: cm.accuracy(),
            per_class,
            macro_avg,
            weighted_avg,
        }
    }

    pub fn class(&self, label: Sentiment) -> &ClassMetrics {
        &self.per_class[label.index()]
    }

    /// sklearn-style text table: per-class rows, accuracy, macro and weighted averages.
    pub fn to_report_table(&self) -> String {
        let mut report = String::new();

        report.push_str(&format!(
            "{:>12} {:>10} {:>10} {:>10} {:>10}\n\n",
            "", "precision", "recall", "f1-score", "support"
        ));

        for m in &self.per_class {
            report.push_str(&format!(
                "{:>12} {:>10.2} {:>10.2} {:>10.2} {:>10}\n",
                m.label.as_str(),
                m.precision,
                m.recall,
                m.f1,
                m.support
            ));
        }
        report.push('\n');

        report.push_str(&format!(
            "{:>12} {:>10} {:>10} {:>10.2} {:>10}\n",
            "accuracy", "", "", self.accuracy, self.macro_avg.support
        ));

        for (name, avg) in [("macro avg", &self.macro_avg), ("weighted avg", &self.weighted_avg)] {
            report.push_str(&format!(
                "{:>12} {:>10.2} {:>10.2} {:>10.2} {:>10}\n",
                name, avg.precision, avg.recall, avg.f1, avg.support
            ));
        }

        report
    }
}
