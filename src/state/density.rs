//! Density Matrix — numeric encoding of a byte chunk
//!
//! A chunk is laid out row-major into the smallest square matrix that
//! holds it (zero-padded past the end) and normalized so its trace is 1.
//! The normalized matrix and its row-major flattening are the secret
//! witness of the proving session; they are never persisted or logged.

use crate::errors::{QcpError, Result};
use nalgebra::{DMatrix, DVector};

/// Trace below this threshold is treated as degenerate (e.g. all-zero chunk).
pub const TRACE_FLOOR: f64 = 1e-10;

/// Diagonal perturbation applied to degenerate matrices before normalization.
pub const PERTURBATION: f64 = 1e-6;

/// A trace-normalized, non-negative square matrix derived from a chunk
#[derive(Debug, Clone, PartialEq)]
pub struct DensityMatrix {
    matrix: DMatrix<f64>,
}

impl DensityMatrix {
    /// Encode a chunk into a normalized density matrix.
    ///
    /// Bytes land at `(i / side, i % side)` with `side = ceil(sqrt(len))`,
    /// unrescaled (0–255). If the diagonal sums below [`TRACE_FLOOR`], a
    /// [`PERTURBATION`]·I term is added first so that normalization is
    /// defined for every non-empty chunk, including all-zero ones.
    ///
    /// Post-condition: `trace()` of the result is 1 within 1e-9.
    pub fn encode(chunk: &[u8]) -> Result<Self> {
        if chunk.is_empty() {
            return Err(QcpError::EmptyChunk);
        }

        let side = (chunk.len() as f64).sqrt().ceil() as usize;
        let mut matrix = DMatrix::<f64>::zeros(side, side);
        for (i, &byte) in chunk.iter().enumerate() {
            matrix[(i / side, i % side)] = f64::from(byte);
        }

        let mut trace = matrix.trace();
        if trace < TRACE_FLOOR {
            matrix += DMatrix::identity(side, side) * PERTURBATION;
            trace = matrix.trace();
        }

        Ok(Self {
            matrix: matrix / trace,
        })
    }

    /// Side length of the square matrix.
    pub fn side(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of entries (`side²`), the dimension of the committed vector.
    pub fn dimensions(&self) -> usize {
        self.side() * self.side()
    }

    /// Trace (sum of diagonal entries). 1.0 within tolerance by construction.
    pub fn trace(&self) -> f64 {
        self.matrix.trace()
    }

    /// Flatten row-major into the state vector of length `side²`.
    pub fn state_vector(&self) -> DVector<f64> {
        let side = self.side();
        let mut flat = Vec::with_capacity(side * side);
        for row in 0..side {
            for col in 0..side {
                flat.push(self.matrix[(row, col)]);
            }
        }
        DVector::from_vec(flat)
    }

    pub(crate) fn inner(&self) -> &DMatrix<f64> {
        &self.matrix
    }
}
