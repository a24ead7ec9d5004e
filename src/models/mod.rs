pub mod batch;
pub mod outcome;
pub mod video;

pub use batch::Batch;
pub use outcome::{ItemOutcome, ProcessingResult, SummaryOutcome, TranscriptOutcome};
pub use video::Video;
