//! QCP — Quantum-inspired Chunk Prover
//!
//! Turns an arbitrary byte chunk into a trace-normalized density matrix,
//! measures its entanglement entropy, and produces a binding, hiding
//! commitment plus a non-interactive zero-knowledge proof that the prover
//! knows the vector behind the commitment, without revealing the vector.

pub mod errors;
pub mod pipeline;
pub mod state;
pub mod zk;

pub use errors::{QcpError, Result};
pub use pipeline::{run, run_with_deadline, ChunkProofResult, MAX_CHUNK_BYTES};
pub use state::{von_neumann_entropy, DensityMatrix};
pub use zk::{
    KnowledgeProof, PedersenGens, ProofContext, ProofEngine, SchnorrEngine, VectorCommitment,
};
