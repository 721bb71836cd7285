//! Public parameters for the vector commitment scheme
//!
//! Generators are derived by domain-separated try-and-increment hashing
//! (nothing-up-my-sleeve): no discrete-log relation between any pair is
//! known, which the binding property relies on. Quantization maps the
//! real-valued state vector onto the scalar field so the commitment is
//! defined over a discrete domain.

use crate::errors::{QcpError, Result};
use ark_bn254::{Fr, G1Affine};
use ark_ec::AffineRepr;
use ark_ff::PrimeField;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::Zero;
use sha2::{Digest, Sha256};

/// Domain separator for generator derivation.
const GENERATOR_DOMAIN_TAG: &[u8] = b"qcp/pedersen-generators/v1";

/// Fixed-point precision of quantized vector components: 2⁻³² granularity.
pub const QUANT_BITS: u32 = 32;

const QUANT_SCALE: f64 = (1u64 << QUANT_BITS) as f64;

/// Quantize state-vector components into field elements.
///
/// Components are clamped at zero (density entries are non-negative by
/// construction) and rounded to the nearest multiple of 2⁻³². The same
/// input vector always maps to the same field vector.
pub fn quantize(vector: &[f64]) -> Vec<Fr> {
    vector
        .iter()
        .map(|&v| Fr::from((v.max(0.0) * QUANT_SCALE).round() as u64))
        .collect()
}

/// Public generators for commitments over vectors of a fixed dimension
#[derive(Clone, Debug)]
pub struct PedersenGens {
    /// Per-component generators G_i
    pub vector_gens: Vec<G1Affine>,
    /// Blinding generator H
    pub blinding_gen: G1Affine,
}

impl PedersenGens {
    /// Derive the generators for vectors of length `dimensions`.
    ///
    /// Derivation is deterministic: prover and verifier reconstruct the
    /// same parameters from the dimension alone.
    pub fn new(dimensions: usize) -> Self {
        let vector_gens = (0..dimensions)
            .map(|i| hash_to_group(b"G", i as u64))
            .collect();
        let blinding_gen = hash_to_group(b"H", 0);
        Self {
            vector_gens,
            blinding_gen,
        }
    }

    /// Vector dimension these parameters were derived for.
    pub fn dimensions(&self) -> usize {
        self.vector_gens.len()
    }
}

/// Map a labeled index onto the curve via try-and-increment hashing.
fn hash_to_group(label: &[u8], index: u64) -> G1Affine {
    let mut counter: u64 = 0;
    loop {
        let mut hasher = Sha256::new();
        hasher.update(GENERATOR_DOMAIN_TAG);
        hasher.update(label);
        hasher.update(index.to_le_bytes());
        hasher.update(counter.to_le_bytes());
        let digest = hasher.finalize();
        if let Some(point) = G1Affine::from_random_bytes(digest.as_slice()) {
            if !point.is_zero() {
                return point;
            }
        }
        counter += 1;
    }
}

/// Lowercase hex of a group element's canonical compressed bytes.
pub(crate) fn encode_point(point: &G1Affine) -> Result<String> {
    let mut bytes = Vec::new();
    point
        .serialize_compressed(&mut bytes)
        .map_err(|e| QcpError::Serialization(e.to_string()))?;
    Ok(hex::encode(bytes))
}

/// Decode a hex-encoded compressed group element. None on malformation.
pub(crate) fn decode_point(encoded: &str) -> Option<G1Affine> {
    let bytes = hex::decode(encoded).ok()?;
    G1Affine::deserialize_compressed(bytes.as_slice()).ok()
}

/// Lowercase hex of a scalar's canonical compressed bytes.
pub(crate) fn encode_scalar(scalar: &Fr) -> Result<String> {
    let mut bytes = Vec::new();
    scalar
        .serialize_compressed(&mut bytes)
        .map_err(|e| QcpError::Serialization(e.to_string()))?;
    Ok(hex::encode(bytes))
}

/// Decode a hex-encoded scalar. None on malformation.
pub(crate) fn decode_scalar(encoded: &str) -> Option<Fr> {
    let bytes = hex::decode(encoded).ok()?;
    Fr::deserialize_compressed(bytes.as_slice()).ok()
}

/// Reduce a finished transcript hash onto the scalar field.
pub(crate) fn hash_to_scalar(hasher: Sha256) -> Fr {
    Fr::from_le_bytes_mod_order(hasher.finalize().as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantization_is_deterministic() {
        let vector = vec![0.0, 0.25, 0.5, 1.0, 1.0 / 3.0];
        assert_eq!(quantize(&vector), quantize(&vector));
    }

    #[test]
    fn test_quantization_of_exact_dyadics() {
        let quantized = quantize(&[0.5]);
        assert_eq!(quantized[0], Fr::from(1u64 << 31));
        let quantized = quantize(&[1.0]);
        assert_eq!(quantized[0], Fr::from(1u64 << 32));
    }

    #[test]
    fn test_quantization_clamps_negative_noise() {
        assert_eq!(quantize(&[-1e-15])[0], Fr::from(0u64));
    }

    #[test]
    fn test_generators_are_distinct() {
        let gens = PedersenGens::new(8);
        for i in 0..gens.vector_gens.len() {
            assert_ne!(gens.vector_gens[i], gens.blinding_gen);
            for j in (i + 1)..gens.vector_gens.len() {
                assert_ne!(gens.vector_gens[i], gens.vector_gens[j]);
            }
        }
    }

    #[test]
    fn test_generator_derivation_is_deterministic() {
        let a = PedersenGens::new(4);
        let b = PedersenGens::new(4);
        assert_eq!(a.vector_gens, b.vector_gens);
        assert_eq!(a.blinding_gen, b.blinding_gen);
    }

    #[test]
    fn test_point_codec_round_trip() {
        let gens = PedersenGens::new(1);
        let encoded = encode_point(&gens.blinding_gen).unwrap();
        assert_eq!(encoded, encoded.to_lowercase());
        assert_eq!(decode_point(&encoded), Some(gens.blinding_gen));
    }

    #[test]
    fn test_scalar_codec_round_trip() {
        let scalar = Fr::from(123456789u64);
        let encoded = encode_scalar(&scalar).unwrap();
        assert_eq!(decode_scalar(&encoded), Some(scalar));
    }

    #[test]
    fn test_decoding_garbage_fails_closed() {
        assert!(decode_point("not-hex-$$").is_none());
        assert!(decode_point("00ff").is_none());
        assert!(decode_scalar("zz").is_none());
    }
}
