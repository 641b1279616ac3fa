use thiserror::Error;

use embedsu_core::DecodeError;

pub type Result<T> = std::result::Result<T, EmbedSuError>;

#[derive(Debug, Error)]
pub enum EmbedSuError {
    #[error("failed building reqwest client: {0}")]
    BuildClient(#[source] reqwest::Error),

    #[error("HTTP request failed while {context}: {source}")]
    Request {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read response body while {context}: {source}")]
    ResponseBody {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{context} returned {status}\nresponse text:\n{body}")]
    HttpStatus {
        context: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to decode JSON while {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("payload error: {0}")]
    Decode(#[from] DecodeError),

    #[error("item descriptor has no hash")]
    MissingHash,

    #[error("no source returned for item {hash}")]
    MissingSource { hash: String },

    #[error("no quality variants listed for item {hash}")]
    NoVariants { hash: String },

    #[error("{0}")]
    Message(String),
}
