//! Quantum-inspired state encoding for byte chunks
//!
//! - DensityMatrix: trace-normalized square encoding of a chunk
//! - von_neumann_entropy: scalar mixedness measure over its eigenvalues

mod density;
mod entropy;

pub use density::{DensityMatrix, PERTURBATION, TRACE_FLOOR};
pub use entropy::{von_neumann_entropy, EIGEN_CUTOFF};
