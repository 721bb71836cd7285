//! Pedersen Vector Commitment
//!
//! C = Σ qᵢ·Gᵢ + r·H over BN254 G1, where q is the quantized state vector
//! and r a fresh random blinding factor.
//!
//! Properties:
//! - **Binding**: computational, DL assumption over independent generators
//! - **Hiding**: the r·H term masks the vector contribution completely

use crate::errors::{QcpError, Result};
use crate::zk::params::{decode_point, encode_point, quantize, PedersenGens};
use ark_bn254::{Fr, G1Affine, G1Projective};
use ark_ec::{AffineRepr, CurveGroup, VariableBaseMSM};
use ark_ff::UniformRand;
use rand::rngs::OsRng;

/// Blinding factor paired with one commitment. Never reused across calls.
#[derive(Clone, Debug)]
pub struct BlindingFactor(pub(crate) Fr);

/// A binding, hiding commitment to a state vector
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VectorCommitment {
    point: G1Affine,
}

impl VectorCommitment {
    pub(crate) fn from_point(point: G1Affine) -> Self {
        Self { point }
    }

    pub(crate) fn point(&self) -> G1Affine {
        self.point
    }

    /// Lowercase hex of the canonical compressed encoding.
    pub fn to_hex(&self) -> Result<String> {
        encode_point(&self.point)
    }

    /// Parse a commitment back from its hex encoding. None on malformation.
    pub fn from_hex(encoded: &str) -> Option<Self> {
        decode_point(encoded).map(|point| Self { point })
    }
}

impl PedersenGens {
    /// Commit to a state vector with a fresh random blinding factor.
    ///
    /// The blinding factor comes from the OS CSPRNG on every call; reusing
    /// one across commitments would break hiding.
    pub fn commit(&self, vector: &[f64]) -> Result<(VectorCommitment, BlindingFactor)> {
        let quantized = quantize(vector);
        let blinding = Fr::rand(&mut OsRng);
        let point = self.commit_quantized(&quantized, &blinding)?;
        Ok((
            VectorCommitment::from_point(point.into_affine()),
            BlindingFactor(blinding),
        ))
    }

    /// Commitment point for an already-quantized vector and known blinding.
    pub(crate) fn commit_quantized(&self, quantized: &[Fr], blinding: &Fr) -> Result<G1Projective> {
        if quantized.len() != self.vector_gens.len() {
            return Err(QcpError::Proof(format!(
                "vector length {} does not match parameter dimension {}",
                quantized.len(),
                self.vector_gens.len()
            )));
        }
        let vector_term = G1Projective::msm(&self.vector_gens, quantized)
            .map_err(|_| QcpError::Proof("multi-scalar multiplication failed".into()))?;
        Ok(vector_term + self.blinding_gen.into_group() * blinding)
    }
}
