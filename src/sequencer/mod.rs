//! Run orchestration: the sequencer, fallback resolution, cancellation,
//! and run reporting.

pub mod cancel;
pub mod engine;
pub mod fallback;
pub mod report;

pub use cancel::CancelToken;
pub use engine::{RunOptions, RunProgress, Sequencer};
pub use fallback::{FallbackResolver, Resolution};
pub use report::{format_duration, ReportEntry, RunReport, RunStatus};
