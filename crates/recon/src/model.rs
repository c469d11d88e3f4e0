use serde::Serialize;

use crate::confusion::ConfusionMatrix;
use crate::label::Sentiment;
use crate::metrics::ClassificationMetrics;
use crate::verdict::Verdict;

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

/// Column names shared by every table the engine reads or writes.
pub mod columns {
    pub const ID: &str = "id_publicacion";
    pub const PARTICIPANT: &str = "id_participante";
    pub const TEXT: &str = "texto_publicacion";
    pub const AUTOMATED: &str = "sentimiento";
    pub const MANUAL: &str = "sentimiento_manual";

    /// Sample export layout. Annotation tooling depends on this order.
    pub const SAMPLE: [&str; 5] = [ID, PARTICIPANT, TEXT, AUTOMATED, MANUAL];

    /// Error subset layout.
    pub const ERRORS: [&str; 4] = [ID, TEXT, AUTOMATED, MANUAL];
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A classified post: feature row joined with its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    pub participant_id: String,
    pub text: String,
    pub sentiment: Sentiment,
}

/// One row of the annotation sheet. `manual` is `None` until a human fills it.
///
/// Labels stay raw here; the evaluator normalizes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleRecord {
    pub id: String,
    pub participant_id: String,
    pub text: String,
    pub automated: String,
    pub manual: Option<String>,
}

impl SampleRecord {
    /// Fresh annotation row for a post, manual label empty.
    pub fn from_post(post: &Post) -> Self {
        Self {
            id: post.id.clone(),
            participant_id: post.participant_id.clone(),
            text: post.text.clone(),
            automated: post.sentiment.as_str().to_string(),
            manual: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// A row where the automated and manual labels disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorRecord {
    /// Position of the row in the annotated input.
    pub row: usize,
    pub id: String,
    pub text: String,
    pub automated: Sentiment,
    pub manual: Sentiment,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub total_rows: usize,
    pub annotated: usize,
    pub unannotated: usize,
    pub correct: usize,
    pub accuracy: f64,
    pub confusion: ConfusionMatrix,
    pub metrics: ClassificationMetrics,
    pub verdict: Verdict,
    pub errors: Vec<ErrorRecord>,
}
