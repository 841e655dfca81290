use std::fs;
use std::future::Future;
use std::path::Path;

use clap::Args;
use serde_json::Value;

use loanguard_advisor::contracts::ChatTurn;
use loanguard_advisor::document::{self, DocumentSource};
use loanguard_advisor::gemini::GeminiAdvisor;
use loanguard_advisor::service::AdvisoryService;
use loanguard_advisor::AdvisorResult;

use crate::input;

/// A comparison run is capped at four offers.
const MAX_COMPARE_OFFERS: usize = 4;

/// Arguments for contract analysis
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Contract text pasted directly on the command line
    #[arg(long)]
    pub text: Option<String>,

    /// Path to a contract document (pdf, txt, csv, jpg, jpeg, png)
    #[arg(long)]
    pub file: Option<String>,
}

/// Arguments for offer comparison
#[derive(Args)]
pub struct CompareArgs {
    /// Path to an offer document; repeat for each offer
    #[arg(long)]
    pub file: Vec<String>,

    /// Offer text pasted directly; repeat for each offer
    #[arg(long)]
    pub text: Vec<String>,
}

/// Arguments for one conversational exchange
#[derive(Args)]
pub struct ChatArgs {
    /// The user message to send
    #[arg(long)]
    pub message: String,

    /// Path to a JSON or YAML file with prior turns ([{"role": "user", "text": "..."}])
    #[arg(long)]
    pub history: Option<String>,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let source = if let Some(text) = args.text {
        DocumentSource::from_text(text)
    } else if let Some(ref path) = args.file {
        load_document(path)?
    } else if let Some(text) = input::stdin::read_stdin_text()? {
        DocumentSource::from_text(text)
    } else {
        return Err("--text or --file is required (or pipe contract text on stdin)".into());
    };

    let advisor = GeminiAdvisor::from_env()?;
    let result = run_blocking(advisor.analyze_document(&source))?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut sources: Vec<DocumentSource> = Vec::new();
    for path in &args.file {
        sources.push(load_document(path)?);
    }
    for text in &args.text {
        sources.push(DocumentSource::from_text(text.clone()));
    }

    if sources.len() > MAX_COMPARE_OFFERS {
        return Err(format!(
            "At most {} offers can be compared at once ({} provided)",
            MAX_COMPARE_OFFERS,
            sources.len()
        )
        .into());
    }

    let advisor = GeminiAdvisor::from_env()?;
    let result = run_blocking(advisor.compare_offers(&sources))?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_chat(args: ChatArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let history: Vec<ChatTurn> = match args.history {
        Some(ref path) => input::file::read_input(path)?,
        None => Vec::new(),
    };

    let advisor = GeminiAdvisor::from_env()?;
    let reply = run_blocking(advisor.converse(&args.message, &history))?;
    Ok(serde_json::json!({ "reply": reply }))
}

/// Route a file by extension: plain-text formats go in as text parts,
/// everything else the advisor accepts goes in as an inline base64 attachment.
fn load_document(path: &str) -> Result<DocumentSource, Box<dyn std::error::Error>> {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| format!("Cannot determine the file type of '{}'", path))?;

    if document::is_text_extension(ext) {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read '{}': {}", path, e))?;
        return Ok(DocumentSource::from_text(text));
    }

    let mime = document::mime_for_extension(ext).ok_or_else(|| {
        format!(
            "Unsupported file type '.{}' (expected pdf, txt, csv, jpg, jpeg or png)",
            ext
        )
    })?;
    let bytes = fs::read(path).map_err(|e| format!("Failed to read '{}': {}", path, e))?;
    Ok(DocumentSource::from_file_bytes(&bytes, mime))
}

/// Advisory calls are async; the CLI drives each one on a fresh runtime.
fn run_blocking<T>(
    future: impl Future<Output = AdvisorResult<T>>,
) -> Result<T, Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Runtime::new()?;
    Ok(runtime.block_on(future)?)
}
