//! Pipeline Orchestrator — chunk in, proof bundle out
//!
//! Encodes the chunk synchronously, then fans out two independent
//! CPU-bound branches over the immutable derived state: entropy
//! estimation, and commitment + proof generation. Both branches are
//! awaited before a result is emitted; the first failure wins and no
//! partial result ever escapes.

use crate::errors::{QcpError, Result};
use crate::state::{von_neumann_entropy, DensityMatrix};
use crate::zk::{KnowledgeProof, ProofContext, ProofEngine, SchnorrEngine};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::task;

/// Hard cap on decoded chunk size: 10 MB.
pub const MAX_CHUNK_BYTES: usize = 10_000_000;

/// The only artifacts that leave the system boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkProofResult {
    /// Caller-supplied identifier, echoed verbatim
    pub chunk_id: String,
    /// Von Neumann entropy of the encoded chunk (public metric)
    pub entropy: f64,
    /// Pedersen commitment to the state vector, lowercase hex
    pub commitment: String,
    /// Proof of knowledge of the committed vector
    pub proof: KnowledgeProof,
}

/// Reject chunks the pipeline must not process, before any expensive work.
pub fn validate_chunk(chunk: &[u8]) -> Result<()> {
    if chunk.is_empty() {
        return Err(QcpError::EmptyChunk);
    }
    if chunk.len() > MAX_CHUNK_BYTES {
        return Err(QcpError::ChunkTooLarge { len: chunk.len() });
    }
    Ok(())
}

/// Run the full proving pipeline for one chunk.
///
/// The density matrix and state vector live only for this invocation;
/// neither is logged or persisted.
pub async fn run(chunk: &[u8], chunk_id: &str) -> Result<ChunkProofResult> {
    validate_chunk(chunk)?;

    let density = Arc::new(DensityMatrix::encode(chunk)?);
    let dimensions = density.dimensions();
    info!(
        "encoded {} bytes into a {side}x{side} density matrix",
        chunk.len(),
        side = density.side()
    );

    let entropy_input = Arc::clone(&density);
    let entropy_task = task::spawn_blocking(move || von_neumann_entropy(&entropy_input));

    let vector: Vec<f64> = density.state_vector().iter().copied().collect();
    let context = ProofContext::new(chunk_id, dimensions);
    let proof_task = task::spawn_blocking(move || -> Result<(String, KnowledgeProof)> {
        let engine = SchnorrEngine::new(dimensions);
        let (commitment, blinding) = engine.commit(&vector)?;
        let proof = engine.prove(&vector, &blinding, &context)?;
        Ok((commitment.to_hex()?, proof))
    });

    // Await both branches; either failure discards the other's result.
    let (entropy_join, proof_join) = tokio::join!(entropy_task, proof_task);
    let entropy = entropy_join.map_err(|e| QcpError::Task(e.to_string()))?;
    let (commitment, proof) = proof_join.map_err(|e| QcpError::Task(e.to_string()))??;

    debug!(
        "pipeline complete for chunk_id={}: entropy={:.6}, {} responses",
        chunk_id,
        entropy,
        proof.responses.len()
    );

    Ok(ChunkProofResult {
        chunk_id: chunk_id.to_string(),
        entropy,
        commitment,
        proof,
    })
}

/// Run the pipeline under an externally supplied deadline.
pub async fn run_with_deadline(
    chunk: &[u8],
    chunk_id: &str,
    deadline: Duration,
) -> Result<ChunkProofResult> {
    tokio::time::timeout(deadline, run(chunk, chunk_id))
        .await
        .map_err(|_| QcpError::Timeout)?
}
