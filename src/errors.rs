//! Error types for the chunk-proving pipeline

use thiserror::Error;

/// Errors surfaced by encoding, proving, and orchestration.
///
/// Validation errors (empty chunk, size cap) are raised before any
/// numerically expensive or cryptographic work starts. Verification
/// failures are never errors; the verifier returns `false` instead.
#[derive(Debug, Error)]
pub enum QcpError {
    #[error("chunk is empty; cannot derive a density matrix")]
    EmptyChunk,

    #[error("chunk of {len} bytes exceeds the 10,000,000-byte size cap")]
    ChunkTooLarge { len: usize },

    #[error("proof generation failed: {0}")]
    Proof(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("pipeline branch failed: {0}")]
    Task(String),

    #[error("pipeline deadline exceeded")]
    Timeout,
}

pub type Result<T> = std::result::Result<T, QcpError>;
