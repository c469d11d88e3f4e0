//! `sentival-recon`: stratified sampling and label reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded records, returns samples and
//! evaluation reports. No CLI or IO dependencies.

pub mod confusion;
pub mod error;
pub mod evaluator;
pub mod label;
pub mod metrics;
pub mod model;
pub mod sampler;
pub mod verdict;

pub use confusion::ConfusionMatrix;
pub use error::ValidationError;
pub use evaluator::{evaluate, EvaluationStage};
pub use label::Sentiment;
pub use metrics::ClassificationMetrics;
pub use model::{ErrorRecord, EvaluationReport, Post, SampleRecord};
pub use sampler::{create_sample, stratified_sample};
pub use verdict::{Verdict, VerdictThresholds};
