use num_complex::Complex64;
use num_traits::Zero;
use qdata_core::{Csr, Data, DataError, Dense, Result};
use rayon::prelude::*;
use wide::f64x4;

use crate::util::use_parallel;

/// Sum of squared moduli, two complex values per SIMD lane.
fn sum_norm_sqr(chunk: &[Complex64]) -> f64 {
    let mut accv = f64x4::splat(0.0);
    let mut pairs = chunk.chunks_exact(2);
    for p in &mut pairs {
        let v = f64x4::from([p[0].re, p[0].im, p[1].re, p[1].im]);
        accv += v * v;
    }
    let arr = accv.to_array();
    let mut acc = arr[0] + arr[1] + arr[2] + arr[3];
    for z in pairs.remainder() {
        acc += z.norm_sqr();
    }
    acc
}

fn check_square(shape: (usize, usize)) -> Result<()> {
    if shape.0 == shape.1 {
        Ok(())
    } else {
        Err(DataError::NotSquare(shape))
    }
}

/// Sum of the diagonal
pub fn trace_csr(a: &Csr) -> Result<Complex64> {
    check_square(a.shape())?;
    let diag = |i: usize| {
        a.row(i)
            .find(|&(j, _)| j == i)
            .map_or_else(Complex64::zero, |(_, v)| v)
    };
    let out: Complex64 = if use_parallel(a.nnz()) {
        (0..a.nrows).into_par_iter().map(diag).sum()
    } else {
        (0..a.nrows).map(diag).sum()
    };
    Ok(out)
}

pub fn trace_dense(a: &Dense) -> Result<Complex64> {
    check_square(a.shape())?;
    Ok(a.as_ndarray().diag().sum())
}

/// Frobenius norm
#[must_use]
pub fn frobenius_csr(a: &Csr) -> f64 {
    let total: f64 = if use_parallel(a.nnz()) {
        a.data.par_chunks(4096).map(sum_norm_sqr).sum()
    } else {
        sum_norm_sqr(&a.data)
    };
    total.sqrt()
}

#[must_use]
pub fn frobenius_dense(a: &Dense) -> f64 {
    let view = a.as_ndarray();
    let total: f64 = match view.as_slice_memory_order() {
        Some(buf) if use_parallel(buf.len()) => buf.par_chunks(4096).map(sum_norm_sqr).sum(),
        Some(buf) => sum_norm_sqr(buf),
        None => view.iter().map(|z| z.norm_sqr()).sum(),
    };
    total.sqrt()
}
