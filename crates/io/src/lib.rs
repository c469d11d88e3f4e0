// File I/O operations

pub mod csv;
pub mod encoding;
pub mod error;
pub mod fs;
pub mod heatmap;
pub mod persist;
pub mod report;

pub use csv::{load_annotated, load_corpus, write_errors, write_sample, CsvFormat};
pub use encoding::TextEncoding;
pub use error::IoError;
pub use persist::{write_evaluation, EvaluationOutputs, WrittenOutputs};
