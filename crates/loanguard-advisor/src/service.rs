use async_trait::async_trait;

use crate::contracts::{AnalysisResult, ChatTurn, ComparisonResult};
use crate::document::DocumentSource;
use crate::AdvisorResult;

/// A comparison needs at least this many non-empty offers.
pub const MIN_COMPARE_OFFERS: usize = 2;

/// The full advisory surface the presentation layer relies on. Every call is
/// independent and stateless; conversation context travels with the caller.
#[async_trait]
pub trait AdvisoryService: Send + Sync {
    /// Analyze one contract (text, uploaded document, or both) and return the
    /// structured risk breakdown.
    async fn analyze_document(&self, source: &DocumentSource) -> AdvisorResult<AnalysisResult>;

    /// Compare two or more credit offers and return the ranked verdict.
    async fn compare_offers(&self, sources: &[DocumentSource])
        -> AdvisorResult<ComparisonResult>;

    /// One conversational exchange. The caller supplies the entire prior
    /// history each time; nothing is kept between calls.
    async fn converse(&self, message: &str, history: &[ChatTurn]) -> AdvisorResult<String>;
}
