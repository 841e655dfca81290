//! Response contracts consumed verbatim from the advisory model. The shapes
//! are enforced upstream through the declared response schema; a response
//! that does not parse into these types is a malformed-response error.

use serde::{Deserialize, Serialize};

/// Overall risk classification of an analyzed contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// A piece of financial jargon with its plain-language explanation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JargonTerm {
    pub term: String,
    pub explanation: String,
}

/// Structured outcome of a single-document contract analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub summary: String,
    pub hidden_fees: Vec<String>,
    pub risks: Vec<String>,
    pub jargon_explained: Vec<JargonTerm>,
    pub savings_tips: Vec<String>,
    pub risk_level: RiskLevel,
    pub negotiation_script: String,
}

/// Cost profile of one offer inside a comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferSummary {
    pub title: String,
    /// Display text, e.g. "45 000 PLN total repayable"
    pub total_cost: String,
    /// Annual percentage rate of charge as reported by the model
    pub rrso: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

/// Structured outcome of a multi-offer comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub winner: String,
    pub mathematical_analysis: String,
    pub offer_summaries: Vec<OfferSummary>,
    pub final_verdict: String,
}

/// Speaker of one conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Model => "model",
        }
    }
}

/// One turn of caller-supplied conversation history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}
