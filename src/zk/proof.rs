//! Zero-Knowledge Proof of Vector Knowledge
//!
//! Generalized Schnorr sigma protocol over the Pedersen vector commitment,
//! made non-interactive with the Fiat–Shamir transform. The challenge binds
//! the public context (chunk id + dimension), so a transcript produced for
//! one context never verifies under another.
//!
//! Soundness: forging an accepting transcript without an opening requires
//! guessing the challenge, one chance in |Fr| (~2²⁵⁴). Zero-knowledge:
//! responses are one-time-padded by uniform nonces, so the transcript is
//! simulatable without the witness.

use crate::errors::{QcpError, Result};
use crate::zk::commitment::{BlindingFactor, VectorCommitment};
use crate::zk::params::{
    decode_point, decode_scalar, encode_point, encode_scalar, hash_to_scalar, quantize,
    PedersenGens,
};
use ark_bn254::{Fr, G1Affine, G1Projective};
use ark_ec::{AffineRepr, CurveGroup, VariableBaseMSM};
use ark_ff::UniformRand;
use ark_serialize::CanonicalSerialize;
use log::debug;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Domain separator for Fiat–Shamir challenge derivation.
const CHALLENGE_DOMAIN_TAG: &[u8] = b"qcp/vector-knowledge/v1";

/// Public parameters both prover and verifier agree on out-of-band
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofContext {
    pub chunk_id: String,
    pub dimensions: usize,
}

impl ProofContext {
    pub fn new(chunk_id: impl Into<String>, dimensions: usize) -> Self {
        Self {
            chunk_id: chunk_id.into(),
            dimensions,
        }
    }
}

/// Non-interactive transcript proving knowledge of a commitment opening
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeProof {
    /// Context the challenge was bound to
    pub context: ProofContext,
    /// First sigma-protocol message T = Σ kᵢ·Gᵢ + k_r·H (hex)
    pub nonce_commitment: String,
    /// Responses zᵢ = kᵢ + c·qᵢ for each component, then z_r = k_r + c·r (hex)
    pub responses: Vec<String>,
}

/// Capability interface of the proof engine: commit, prove, verify.
///
/// The pipeline is generic over this trait, so the concrete construction
/// (sigma-protocol, hash-based, pairing-based) stays swappable.
pub trait ProofEngine: Send + Sync {
    /// Commit to a vector; returns the commitment and its blinding factor.
    fn commit(&self, vector: &[f64]) -> Result<(VectorCommitment, BlindingFactor)>;

    /// Prove knowledge of (vector, blinding) opening the commitment.
    fn prove(
        &self,
        vector: &[f64],
        blinding: &BlindingFactor,
        context: &ProofContext,
    ) -> Result<KnowledgeProof>;

    /// Check a proof against a commitment and expected context.
    /// Fails closed: any malformation or mismatch returns false.
    fn verify(
        &self,
        commitment: &VectorCommitment,
        proof: &KnowledgeProof,
        context: &ProofContext,
    ) -> bool;
}

/// Schnorr-style engine over the Pedersen vector commitment
#[derive(Clone, Debug)]
pub struct SchnorrEngine {
    gens: PedersenGens,
}

impl SchnorrEngine {
    /// Derive an engine for vectors of length `dimensions`.
    pub fn new(dimensions: usize) -> Self {
        Self {
            gens: PedersenGens::new(dimensions),
        }
    }

    pub fn dimensions(&self) -> usize {
        self.gens.dimensions()
    }
}

impl ProofEngine for SchnorrEngine {
    fn commit(&self, vector: &[f64]) -> Result<(VectorCommitment, BlindingFactor)> {
        self.gens.commit(vector)
    }

    fn prove(
        &self,
        vector: &[f64],
        blinding: &BlindingFactor,
        context: &ProofContext,
    ) -> Result<KnowledgeProof> {
        let n = self.gens.dimensions();
        if vector.len() != n {
            return Err(QcpError::Proof(format!(
                "witness length {} does not match engine dimension {}",
                vector.len(),
                n
            )));
        }
        if context.dimensions != n {
            return Err(QcpError::Proof(format!(
                "context dimension {} does not match engine dimension {}",
                context.dimensions, n
            )));
        }

        let quantized = quantize(vector);
        let commitment = self
            .gens
            .commit_quantized(&quantized, &blinding.0)?
            .into_affine();

        // Fresh nonces per proof; reuse would leak the witness.
        let mut rng = OsRng;
        let nonces: Vec<Fr> = (0..n).map(|_| Fr::rand(&mut rng)).collect();
        let blinding_nonce = Fr::rand(&mut rng);

        let nonce_term = G1Projective::msm(&self.gens.vector_gens, &nonces)
            .map_err(|_| QcpError::Proof("multi-scalar multiplication failed".into()))?;
        let nonce_commitment =
            (nonce_term + self.gens.blinding_gen.into_group() * blinding_nonce).into_affine();

        let challenge = derive_challenge(context, &commitment, &nonce_commitment)?;

        let mut responses = Vec::with_capacity(n + 1);
        for (nonce, value) in nonces.iter().zip(quantized.iter()) {
            responses.push(encode_scalar(&(*nonce + challenge * value))?);
        }
        responses.push(encode_scalar(&(blinding_nonce + challenge * blinding.0))?);

        debug!(
            "proved knowledge for chunk_id={} over {} components",
            context.chunk_id, n
        );

        Ok(KnowledgeProof {
            context: context.clone(),
            nonce_commitment: encode_point(&nonce_commitment)?,
            responses,
        })
    }

    fn verify(
        &self,
        commitment: &VectorCommitment,
        proof: &KnowledgeProof,
        context: &ProofContext,
    ) -> bool {
        if proof.context != *context || context.dimensions != self.gens.dimensions() {
            return false;
        }
        if proof.responses.len() != context.dimensions + 1 {
            return false;
        }

        let nonce_commitment = match decode_point(&proof.nonce_commitment) {
            Some(point) => point,
            None => return false,
        };
        let mut responses = Vec::with_capacity(proof.responses.len());
        for encoded in &proof.responses {
            match decode_scalar(encoded) {
                Some(scalar) => responses.push(scalar),
                None => return false,
            }
        }

        let challenge = match derive_challenge(context, &commitment.point(), &nonce_commitment) {
            Ok(challenge) => challenge,
            Err(_) => return false,
        };

        // Σ zᵢ·Gᵢ + z_r·H == T + c·C
        let vector_term =
            match G1Projective::msm(&self.gens.vector_gens, &responses[..context.dimensions]) {
                Ok(term) => term,
                Err(_) => return false,
            };
        let lhs = vector_term + self.gens.blinding_gen.into_group() * responses[context.dimensions];
        let rhs = nonce_commitment.into_group() + commitment.point().into_group() * challenge;
        lhs == rhs
    }
}

/// c = H(domain ‖ |chunk_id| ‖ chunk_id ‖ n ‖ C ‖ T) reduced into Fr.
fn derive_challenge(
    context: &ProofContext,
    commitment: &G1Affine,
    nonce_commitment: &G1Affine,
) -> Result<Fr> {
    let mut hasher = Sha256::new();
    hasher.update(CHALLENGE_DOMAIN_TAG);
    hasher.update((context.chunk_id.len() as u64).to_le_bytes());
    hasher.update(context.chunk_id.as_bytes());
    hasher.update((context.dimensions as u64).to_le_bytes());

    let mut points = Vec::new();
    commitment
        .serialize_compressed(&mut points)
        .map_err(|e| QcpError::Serialization(e.to_string()))?;
    nonce_commitment
        .serialize_compressed(&mut points)
        .map_err(|e| QcpError::Serialization(e.to_string()))?;
    hasher.update(&points);

    Ok(hash_to_scalar(hasher))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::DensityMatrix;

    fn witness_from_chunk(chunk: &[u8]) -> Vec<f64> {
        DensityMatrix::encode(chunk)
            .unwrap()
            .state_vector()
            .iter()
            .copied()
            .collect()
    }

    #[test]
    fn test_proof_completeness() {
        let vector = witness_from_chunk(&[3, 1, 4, 1, 5, 9, 2, 6, 5]);
        let engine = SchnorrEngine::new(vector.len());
        let context = ProofContext::new("chunk-9", vector.len());

        let (commitment, blinding) = engine.commit(&vector).unwrap();
        let proof = engine.prove(&vector, &blinding, &context).unwrap();

        assert!(engine.verify(&commitment, &proof, &context));
    }

    #[test]
    fn test_wrong_chunk_id_is_rejected() {
        let vector = witness_from_chunk(&[7; 4]);
        let engine = SchnorrEngine::new(vector.len());
        let context_a = ProofContext::new("chunk-a", vector.len());
        let context_b = ProofContext::new("chunk-b", vector.len());

        let (commitment, blinding) = engine.commit(&vector).unwrap();
        let proof = engine.prove(&vector, &blinding, &context_a).unwrap();

        assert!(!engine.verify(&commitment, &proof, &context_b));
    }

    #[test]
    fn test_wrong_dimension_is_rejected() {
        let vector = witness_from_chunk(&[7; 4]);
        let engine = SchnorrEngine::new(vector.len());
        let context = ProofContext::new("chunk-a", vector.len());

        let (commitment, blinding) = engine.commit(&vector).unwrap();
        let proof = engine.prove(&vector, &blinding, &context).unwrap();

        let other_dim = ProofContext::new("chunk-a", vector.len() + 1);
        assert!(!engine.verify(&commitment, &proof, &other_dim));

        // A verifier instantiated for another dimension must also reject.
        let other_engine = SchnorrEngine::new(vector.len() + 1);
        assert!(!other_engine.verify(&commitment, &proof, &other_dim));
    }

    #[test]
    fn test_tampered_response_is_rejected() {
        let vector = witness_from_chunk(&[1, 2, 3, 4]);
        let engine = SchnorrEngine::new(vector.len());
        let context = ProofContext::new("chunk-t", vector.len());

        let (commitment, blinding) = engine.commit(&vector).unwrap();
        let honest = engine.prove(&vector, &blinding, &context).unwrap();

        for i in 0..honest.responses.len() {
            let mut tampered = honest.clone();
            tampered.responses[i] = flip_first_nibble(&tampered.responses[i]);
            assert!(
                !engine.verify(&commitment, &tampered, &context),
                "tampered response {} accepted",
                i
            );
        }
    }

    #[test]
    fn test_tampered_nonce_commitment_is_rejected() {
        let vector = witness_from_chunk(&[1, 2, 3, 4]);
        let engine = SchnorrEngine::new(vector.len());
        let context = ProofContext::new("chunk-t", vector.len());

        let (commitment, blinding) = engine.commit(&vector).unwrap();
        let mut proof = engine.prove(&vector, &blinding, &context).unwrap();
        proof.nonce_commitment = flip_first_nibble(&proof.nonce_commitment);

        assert!(!engine.verify(&commitment, &proof, &context));
    }

    #[test]
    fn test_tampered_commitment_is_rejected() {
        let vector = witness_from_chunk(&[1, 2, 3, 4]);
        let engine = SchnorrEngine::new(vector.len());
        let context = ProofContext::new("chunk-t", vector.len());

        let (commitment, blinding) = engine.commit(&vector).unwrap();
        let proof = engine.prove(&vector, &blinding, &context).unwrap();

        let tampered_hex = flip_first_nibble(&commitment.to_hex().unwrap());
        // A flipped commitment either fails to decode or fails the check.
        if let Some(tampered) = VectorCommitment::from_hex(&tampered_hex) {
            assert!(!engine.verify(&tampered, &proof, &context));
        }
    }

    #[test]
    fn test_truncated_transcript_is_rejected() {
        let vector = witness_from_chunk(&[1, 2, 3, 4]);
        let engine = SchnorrEngine::new(vector.len());
        let context = ProofContext::new("chunk-t", vector.len());

        let (commitment, blinding) = engine.commit(&vector).unwrap();
        let mut proof = engine.prove(&vector, &blinding, &context).unwrap();
        proof.responses.pop();

        assert!(!engine.verify(&commitment, &proof, &context));
    }

    #[test]
    fn test_proof_survives_json_round_trip() {
        let vector = witness_from_chunk(&[9, 8, 7, 6, 5, 4, 3, 2, 1]);
        let engine = SchnorrEngine::new(vector.len());
        let context = ProofContext::new("chunk-json", vector.len());

        let (commitment, blinding) = engine.commit(&vector).unwrap();
        let proof = engine.prove(&vector, &blinding, &context).unwrap();

        let json = serde_json::to_string(&proof).unwrap();
        let parsed: KnowledgeProof = serde_json::from_str(&json).unwrap();
        assert!(engine.verify(&commitment, &parsed, &context));
    }

    #[test]
    fn test_repeated_proofs_for_same_commitment_verify() {
        // Fresh nonces per proof: transcripts differ, both accept
        let vector = witness_from_chunk(&[5; 9]);
        let engine = SchnorrEngine::new(vector.len());
        let context = ProofContext::new("chunk-r", vector.len());

        let (commitment, blinding) = engine.commit(&vector).unwrap();
        let p1 = engine.prove(&vector, &blinding, &context).unwrap();
        let p2 = engine.prove(&vector, &blinding, &context).unwrap();

        assert_ne!(p1.nonce_commitment, p2.nonce_commitment);
        assert!(engine.verify(&commitment, &p1, &context));
        assert!(engine.verify(&commitment, &p2, &context));
    }

    fn flip_first_nibble(hex_str: &str) -> String {
        let mut chars: Vec<char> = hex_str.chars().collect();
        chars[0] = if chars[0] == '0' { '1' } else { '0' };
        chars.into_iter().collect()
    }
}
