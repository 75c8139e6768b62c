//! Corpusprep engine: file-backed line sources, staged output and the run pipeline.
mod decode;
mod persist;
mod pipeline;
mod source;
mod summary;

pub use decode::{decode_utf8_ignoring_errors, DecodedLine};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError, StagedFile};
pub use pipeline::{run, NoProgress, ProgressSink, RunError, RunOutcome, RunPlan};
pub use source::{count_lines, LineSource, SourceError};
pub use summary::{write_summary, RunSummary, SummaryError};
