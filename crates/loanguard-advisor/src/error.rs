use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("No contract text or document supplied")]
    EmptyInput,

    #[error("Offer comparison needs at least {required} non-empty offers, got {provided}")]
    InsufficientOffers { provided: usize, required: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Advisory service unreachable: {0}")]
    Transport(String),

    #[error("Advisory service error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed advisory response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for AdvisorError {
    fn from(e: reqwest::Error) -> Self {
        AdvisorError::Transport(e.to_string())
    }
}
