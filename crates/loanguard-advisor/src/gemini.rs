use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::config::AdvisorConfig;
use crate::contracts::{AnalysisResult, ChatTurn, ComparisonResult};
use crate::document::DocumentSource;
use crate::error::AdvisorError;
use crate::schema::{analysis_response_schema, comparison_response_schema};
use crate::service::{AdvisoryService, MIN_COMPARE_OFFERS};
use crate::AdvisorResult;

const SYSTEM_INSTRUCTION: &str = r#"You are an advanced AI financial advisor on a mission to optimize the client's finances mathematically. You act as an intelligent financial assistant and credit offer comparison engine.

Your duties:
1. Merciless mathematical analysis: compare APRC, the total cost of credit, commissions and insurance add-ons.
2. Offer ranking: given several offers, as text or as files, point out the mathematically most favourable one and justify it with numbers.
3. Hazard detection: hunt for abusive clauses and hidden costs.
4. Negotiation: prepare arguments for talking the margin down, grounded in the competing offers.
5. Objectivity: you are on the client's side, not the bank's. Your goal is to minimize the interest handed over to the bank.

Always answer in the language of the submitted documents or question."#;

const ANALYSIS_TEXT_FRAME: &str = "Contract text for analysis:";
const ANALYSIS_FILE_INSTRUCTION: &str =
    "Review the document above. Focus on the clauses that can be negotiated.";
const COMPARISON_LEAD: &str = "Compare the credit offers below mathematically; they arrive as \
     documents or plain text. Point out the financially best one.";

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
struct GeminiRequest {
    #[serde(skip_serializing_if = "Option::is_none", rename = "systemInstruction")]
    system_instruction: Option<GeminiSystemInstruction>,
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "generationConfig")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Clone, Serialize)]
struct GeminiSystemInstruction {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "inlineData")]
    inline_data: Option<GeminiInlineData>,
}

impl GeminiPart {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    fn inline(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: None,
            inline_data: Some(GeminiInlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiInlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Clone, Serialize)]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "responseMimeType")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "responseSchema")]
    response_schema: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

/// Text of the first candidate, with multi-part payloads joined in order.
fn candidate_text(completion: &GeminiResponse) -> String {
    completion
        .candidates
        .first()
        .map(|c| {
            c.content
                .parts
                .iter()
                .filter_map(|p| p.text.as_deref())
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Prompt assembly
// ---------------------------------------------------------------------------

fn analysis_contents(source: &DocumentSource) -> Vec<GeminiContent> {
    let mut parts = Vec::new();
    if let Some(text) = source.trimmed_text() {
        parts.push(GeminiPart::text(format!("{ANALYSIS_TEXT_FRAME}\n\n{text}")));
    }
    if let Some(file) = &source.file {
        parts.push(GeminiPart::inline(file.mime_type.clone(), file.data.clone()));
        parts.push(GeminiPart::text(ANALYSIS_FILE_INSTRUCTION));
    }
    vec![GeminiContent {
        role: "user".into(),
        parts,
    }]
}

fn comparison_contents(sources: &[&DocumentSource]) -> Vec<GeminiContent> {
    let mut parts = vec![GeminiPart::text(COMPARISON_LEAD)];
    for (index, source) in sources.iter().enumerate() {
        let number = index + 1;
        parts.push(GeminiPart::text(format!("--- START OFFER #{number} ---")));
        if let Some(text) = source.trimmed_text() {
            parts.push(GeminiPart::text(text));
        }
        if let Some(file) = &source.file {
            parts.push(GeminiPart::inline(file.mime_type.clone(), file.data.clone()));
        }
        parts.push(GeminiPart::text(format!("--- END OFFER #{number} ---")));
    }
    vec![GeminiContent {
        role: "user".into(),
        parts,
    }]
}

fn chat_contents(message: &str, history: &[ChatTurn]) -> Vec<GeminiContent> {
    let mut contents: Vec<GeminiContent> = history
        .iter()
        .map(|turn| GeminiContent {
            role: turn.role.as_str().to_string(),
            parts: vec![GeminiPart::text(turn.text.clone())],
        })
        .collect();
    contents.push(GeminiContent {
        role: "user".into(),
        parts: vec![GeminiPart::text(message)],
    });
    contents
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Gemini-backed implementation of the advisory surface.
pub struct GeminiAdvisor {
    config: AdvisorConfig,
    temperature: Option<f64>,
    http: reqwest::Client,
}

impl GeminiAdvisor {
    pub fn new(config: AdvisorConfig) -> AdvisorResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AdvisorError::Config(e.to_string()))?;
        Ok(Self {
            config,
            temperature: None,
            http,
        })
    }

    pub fn from_env() -> AdvisorResult<Self> {
        Self::new(AdvisorConfig::from_env()?)
    }

    /// Point the client at a different endpoint (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, self.config.api_key
        )
    }

    /// Structured calls declare a JSON mime type and schema; chat leaves the
    /// config off entirely unless a temperature override is set.
    fn generation_config(&self, response_schema: Option<Value>) -> Option<GeminiGenerationConfig> {
        let structured = response_schema.is_some();
        if !structured && self.temperature.is_none() {
            return None;
        }
        Some(GeminiGenerationConfig {
            temperature: self.temperature,
            response_mime_type: structured.then(|| "application/json".to_string()),
            response_schema,
        })
    }

    async fn generate(
        &self,
        contents: Vec<GeminiContent>,
        response_schema: Option<Value>,
    ) -> AdvisorResult<String> {
        let structured = response_schema.is_some();
        let generation_config = self.generation_config(response_schema);

        let request = GeminiRequest {
            system_instruction: Some(GeminiSystemInstruction {
                parts: vec![GeminiPart::text(SYSTEM_INSTRUCTION)],
            }),
            contents,
            generation_config,
        };

        tracing::debug!(model = %self.config.model, structured, "dispatching advisory request");

        let response = self
            .http
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "advisory request rejected");
            return Err(AdvisorError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AdvisorError::MalformedResponse(e.to_string()))?;

        let text = candidate_text(&completion);
        if text.is_empty() {
            return Err(AdvisorError::MalformedResponse(
                "response carried no text parts".into(),
            ));
        }
        Ok(text)
    }
}

#[async_trait::async_trait]
impl AdvisoryService for GeminiAdvisor {
    async fn analyze_document(&self, source: &DocumentSource) -> AdvisorResult<AnalysisResult> {
        if source.is_empty() {
            return Err(AdvisorError::EmptyInput);
        }
        let text = self
            .generate(analysis_contents(source), Some(analysis_response_schema()))
            .await?;
        serde_json::from_str(&text).map_err(|e| AdvisorError::MalformedResponse(e.to_string()))
    }

    async fn compare_offers(
        &self,
        sources: &[DocumentSource],
    ) -> AdvisorResult<ComparisonResult> {
        let non_empty: Vec<&DocumentSource> = sources.iter().filter(|s| !s.is_empty()).collect();
        if non_empty.len() < MIN_COMPARE_OFFERS {
            return Err(AdvisorError::InsufficientOffers {
                provided: non_empty.len(),
                required: MIN_COMPARE_OFFERS,
            });
        }
        let text = self
            .generate(
                comparison_contents(&non_empty),
                Some(comparison_response_schema()),
            )
            .await?;
        serde_json::from_str(&text).map_err(|e| AdvisorError::MalformedResponse(e.to_string()))
    }

    async fn converse(&self, message: &str, history: &[ChatTurn]) -> AdvisorResult<String> {
        self.generate(chat_contents(message, history), None).await
    }
}
