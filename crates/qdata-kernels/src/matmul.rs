#![allow(
    clippy::many_single_char_names,
    reason = "Math kernels conventionally use i/j/k/p to denote indices and pointers"
)]
use ndarray::Axis;
use num_complex::Complex64;
use num_traits::Zero;
use qdata_core::{Csr, Data, DataError, Dense, Result};
use rayon::prelude::*;

use crate::util::use_parallel;

/// y = A @ x for CSR
pub fn spmv(a: &Csr, x: &[Complex64]) -> Result<Vec<Complex64>> {
    if x.len() != a.ncols {
        return Err(DataError::ShapeMismatch {
            left: a.shape(),
            right: (x.len(), 1),
        });
    }
    let row_dot = |i: usize| {
        a.row(i)
            .fold(Complex64::zero(), |acc, (j, v)| acc + v * x[j])
    };
    let y: Vec<Complex64> = if use_parallel(a.nnz()) {
        log::trace!("spmv: parallel over {} rows", a.nrows);
        (0..a.nrows).into_par_iter().map(row_dot).collect()
    } else {
        (0..a.nrows).map(row_dot).collect()
    };
    Ok(y)
}

/// C = A @ B with sparse A and dense B; C is C-ordered.
pub fn matmul_csr_dense(a: &Csr, b: &Dense) -> Result<Dense> {
    let (brows, k) = b.shape();
    if a.ncols != brows {
        return Err(DataError::ShapeMismatch {
            left: a.shape(),
            right: b.shape(),
        });
    }
    let bv = b.as_ndarray();
    let mut out = vec![Complex64::zero(); a.nrows * k];
    let fill = |(i, yrow): (usize, &mut [Complex64])| {
        for (j, v) in a.row(i) {
            for (y, &bjk) in yrow.iter_mut().zip(bv.index_axis(Axis(0), j).iter()) {
                *y += v * bjk;
            }
        }
    };
    if use_parallel(a.nnz().saturating_mul(k)) {
        log::debug!("matmul_csr_dense: parallel over {} rows", a.nrows);
        out.par_chunks_mut(k).enumerate().for_each(fill);
    } else {
        out.chunks_mut(k).enumerate().for_each(fill);
    }
    Dense::from_vec(a.nrows, k, out, false)
}

/// C = A @ B for dense operands.
pub fn matmul_dense(a: &Dense, b: &Dense) -> Result<Dense> {
    if a.ncols() != b.nrows() {
        return Err(DataError::ShapeMismatch {
            left: a.shape(),
            right: b.shape(),
        });
    }
    Dense::try_from(a.as_ndarray().dot(&b.as_ndarray()))
}
