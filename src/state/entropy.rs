//! Entanglement Entropy — scalar mixedness measure of a density matrix
//!
//! Von-Neumann-style entropy `-Σ λᵢ·ln(λᵢ)` over the eigenvalues of the
//! symmetrized matrix. Zero for a pure (rank-1) state, `ln(side)` for the
//! maximally mixed state. Reported alongside the proof as a public,
//! non-secret metric.

use crate::state::DensityMatrix;

/// Eigenvalues below this cutoff are discarded before the log-sum.
pub const EIGEN_CUTOFF: f64 = 1e-12;

/// Compute the von Neumann entropy of a density matrix.
///
/// The matrix is symmetrized as `(M + Mᵀ)/2` before eigendecomposition;
/// symmetrization preserves the trace, so the retained eigenvalues sum to
/// ~1. Negative eigenvalues from floating error are clipped to zero.
/// Total for every encoder output: deterministic, finite, never panics.
pub fn von_neumann_entropy(density: &DensityMatrix) -> f64 {
    let matrix = density.inner();
    let symmetrized = (matrix + matrix.transpose()) * 0.5;
    let eigen = symmetrized.symmetric_eigen();

    let mut entropy = 0.0;
    for &lambda in eigen.eigenvalues.iter() {
        let lambda = lambda.max(0.0);
        if lambda > EIGEN_CUTOFF {
            entropy -= lambda * lambda.ln();
        }
    }

    // Floating error can leave a tiny negative residue for pure states.
    entropy.max(0.0)
}
