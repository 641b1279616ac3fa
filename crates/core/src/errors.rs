use thiserror::Error;

pub type Result<T> = std::result::Result<T, DecodeError>;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("no obfuscated payload found in embed page")]
    BlobNotFound,

    #[error("embed payload has no hash field")]
    MissingHash,

    #[error("decoded item list is empty")]
    NoItems,

    #[error("invalid base64 while decoding {stage}: {source}")]
    Base64 {
        stage: &'static str,
        #[source]
        source: base64::DecodeError,
    },

    #[error("invalid utf-8 while decoding {stage}: {source}")]
    Utf8 {
        stage: &'static str,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("invalid JSON while decoding {stage}: {source}")]
    Json {
        stage: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl DecodeError {
    /// true for outcomes where upstream simply served nothing playable,
    /// as opposed to a payload that failed to decode.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::BlobNotFound | Self::MissingHash | Self::NoItems)
    }
}
