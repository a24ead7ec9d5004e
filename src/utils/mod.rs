pub mod logging;
pub mod progress;

pub use progress::{NoopObserver, PipelineObserver, ProgressEvent, TracingObserver};
