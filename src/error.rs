use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong during a session. Each variant is
/// recoverable by a later user action; none terminate the process.
#[derive(Debug, Error)]
pub enum Error {
    /// Extraction was triggered with no uploaded documents. Aborts the
    /// extraction pass only; session state is unchanged.
    #[error("no invoice documents uploaded")]
    NoDocuments,

    /// A document could not be opened or parsed. Aborts the whole batch.
    #[error("failed to parse document {filename}: {source}")]
    DocumentParse {
        filename: String,
        #[source]
        source: lopdf::Error,
    },

    #[error("LLM_API_KEY env var required for the completion service")]
    MissingCredential,

    #[error("completion request failed: {0}")]
    CompletionRequest(#[from] reqwest::Error),

    #[error("completion service error {status}: {body}")]
    CompletionStatus { status: StatusCode, body: String },

    #[error("empty response from completion service")]
    EmptyCompletion,

    #[error("failed to build spreadsheet: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
