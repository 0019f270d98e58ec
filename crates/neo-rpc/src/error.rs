//! Error types for RPC operations.

use neo_transaction::TransactionError;

/// Errors that can occur when talking to a node or the balance service.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Failed to serialize or deserialize data.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The node answered with a JSON-RPC error object.
    #[error("RPC error ({code}): {message}")]
    Rpc {
        /// JSON-RPC error code.
        code: i64,
        /// Error message from the node.
        message: String,
    },

    /// The server answered with a non-success HTTP status.
    #[error("unexpected HTTP status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// A JSON-RPC response carried neither a result nor an error.
    #[error("missing result for {0}")]
    MissingResult(String),

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(String),

    /// No async runtime could be started for a blocking call.
    #[error("runtime error: {0}")]
    Runtime(String),

    /// A script returned by the node could not be parsed.
    #[error("script error: {0}")]
    Script(#[from] neo_script::ScriptError),
}

impl From<RpcError> for TransactionError {
    fn from(e: RpcError) -> Self {
        TransactionError::Network(e.to_string())
    }
}
