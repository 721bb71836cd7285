//! Zero-knowledge commitment and proof-of-knowledge engine
//!
//! - PedersenGens / VectorCommitment: binding, hiding commitment to the
//!   quantized state vector
//! - SchnorrEngine: Fiat–Shamir proof of knowledge of the opening,
//!   behind the ProofEngine capability trait

mod commitment;
mod params;
mod proof;

pub use commitment::{BlindingFactor, VectorCommitment};
pub use params::{quantize, PedersenGens, QUANT_BITS};
pub use proof::{KnowledgeProof, ProofContext, ProofEngine, SchnorrEngine};
