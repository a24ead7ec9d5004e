pub mod summary_service;
pub mod transcript_service;

pub use summary_service::SummaryService;
pub use transcript_service::TranscriptService;
