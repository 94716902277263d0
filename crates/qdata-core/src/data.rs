//! The `Data` capability shared by every storage format
//!
//! A format is usable only once it says how to materialise itself as a
//! dense array. There is no base implementation to fall back on:
//!
//! ```compile_fail
//! use qdata_core::Data;
//!
//! struct Bare;
//!
//! impl Data for Bare {
//!     fn shape(&self) -> (usize, usize) {
//!         (1, 1)
//!     }
//! }
//! ```

use ndarray::Array2;
use num_complex::Complex64;

use crate::{Csr, Dense};

/// A 2-D complex matrix that can be converted into a dense array.
pub trait Data {
    /// `(rows, cols)`
    fn shape(&self) -> (usize, usize);

    /// Fully materialised copy of the matrix in C order.
    ///
    /// The returned array never shares memory with `self` and holds exactly
    /// the stored values; no arithmetic is applied.
    fn to_array(&self) -> Array2<Complex64>;
}

/// Closed set of the formats this crate provides.
#[derive(Debug, Clone)]
pub enum AnyData {
    Dense(Dense),
    Csr(Csr),
}

impl AnyData {
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Dense(_) => "dense",
            Self::Csr(_) => "csr",
        }
    }
}

impl Data for AnyData {
    fn shape(&self) -> (usize, usize) {
        match self {
            Self::Dense(d) => d.shape(),
            Self::Csr(c) => c.shape(),
        }
    }

    fn to_array(&self) -> Array2<Complex64> {
        match self {
            Self::Dense(d) => d.to_array(),
            Self::Csr(c) => c.to_array(),
        }
    }
}

impl From<Dense> for AnyData {
    fn from(value: Dense) -> Self {
        Self::Dense(value)
    }
}

impl From<Csr> for AnyData {
    fn from(value: Csr) -> Self {
        Self::Csr(value)
    }
}
