//! Fixed 3×3 confusion matrix over the sentiment alphabet.

use std::fmt;

use serde::Serialize;

use crate::label::Sentiment;

const N: usize = Sentiment::ALL.len();

/// `cells[true][predicted]`, rows and columns in `Sentiment::ALL` order.
///
/// Rows are the manual labels, columns the automated ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    labels: [Sentiment; N],
    cells: [[usize; N]; N],
}

impl ConfusionMatrix {
    pub fn new() -> Self {
        Self {
            labels: Sentiment::ALL,
            cells: [[0; N]; N],
        }
    }

    /// Build from parallel true/predicted slices.
    pub fn from_labels(y_true: &[Sentiment], y_pred: &[Sentiment]) -> Self {
        assert_eq!(y_true.len(), y_pred.len(), "label slices must have same length");
        let mut cm = Self::new();
        for (&t, &p) in y_true.iter().zip(y_pred) {
            cm.record(t, p);
        }
        cm
    }

    pub fn record(&mut self, truth: Sentiment, predicted: Sentiment) {
        self.cells[truth.index()][predicted.index()] += 1;
    }

    pub fn get(&self, truth: Sentiment, predicted: Sentiment) -> usize {
        self.cells[truth.index()][predicted.index()]
    }

    pub fn cells(&self) -> &[[usize; N]; N] {
        &self.cells
    }

    pub fn true_positives(&self, class: Sentiment) -> usize {
        self.get(class, class)
    }

    /// Predicted as `class` but was something else.
    pub fn false_positives(&self, class: Sentiment) -> usize {
        let c = class.index();
        (0..N).filter(|&i| i != c).map(|i| self.cells[i][c]).sum()
    }

    /// Was `class` but predicted as something else.
    pub fn false_negatives(&self, class: Sentiment) -> usize {
        let c = class.index();
        (0..N).filter(|&j| j != c).map(|j| self.cells[c][j]).sum()
    }

    /// Number of true instances of `class`.
    pub fn support(&self, class: Sentiment) -> usize {
        self.cells[class.index()].iter().sum()
    }

    pub fn total(&self) -> usize {
        self.cells.iter().flatten().sum()
    }

    pub fn correct(&self) -> usize {
        (0..N).map(|i| self.cells[i][i]).sum()
    }

    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.correct() as f64 / total as f64
    }

    /// Largest cell, used to scale heatmap colors.
    pub fn max_cell(&self) -> usize {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }
}

impl Default for ConfusionMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row_labels: Vec<String> = self.labels.iter().map(|l| format!("{l} (real)")).collect();
        let col_labels: Vec<String> = self.labels.iter().map(|l| format!("{l} (pred)")).collect();
        let row_width = row_labels.iter().map(|l| l.len()).max().unwrap_or(0);

        write!(f, "{:row_width$}", "")?;
        for col in &col_labels {
            write!(f, "  {col:>10}")?;
        }
        writeln!(f)?;

        for (i, row) in row_labels.iter().enumerate() {
            write!(f, "{row:<row_width$}")?;
            for j in 0..N {
                write!(f, "  {:>10}", self.cells[i][j])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
