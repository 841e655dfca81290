pub mod config;
pub mod contracts;
pub mod document;
pub mod error;
pub mod gemini;
pub mod schema;
pub mod service;

pub use config::AdvisorConfig;
pub use contracts::{
    AnalysisResult, ChatRole, ChatTurn, ComparisonResult, JargonTerm, OfferSummary, RiskLevel,
};
pub use document::{is_text_extension, mime_for_extension, DocumentSource, InlineDocument};
pub use error::AdvisorError;
pub use gemini::GeminiAdvisor;
pub use service::{AdvisoryService, MIN_COMPARE_OFFERS};

/// Standard result type for all advisory operations
pub type AdvisorResult<T> = Result<T, AdvisorError>;
