#![allow(
    clippy::similar_names,
    reason = "Row aliases (ri/rv) are intentionally similar in low-level kernels"
)]
use num_complex::Complex64;
use num_traits::Zero;
use qdata_core::{Csr, Dense, Idxint, Result};
use rayon::prelude::*;

use crate::util::{counts_to_indptr, idx_to_usize, split_rows_mut, use_parallel};

/// Zero the real or imaginary part when it is below `atol` in magnitude.
#[inline]
fn tidy_value(z: Complex64, atol: f64) -> Complex64 {
    let re = if z.re.abs() < atol { 0.0 } else { z.re };
    let im = if z.im.abs() < atol { 0.0 } else { z.im };
    Complex64::new(re, im)
}

/// Rebuild `a` from `map`, dropping entries that map to exact zero.
fn filter_csr(a: &Csr, map: impl Fn(Complex64) -> Complex64 + Sync) -> Result<Csr> {
    let nrows = a.nrows;
    let parallel = use_parallel(a.nnz());
    let count = |i: usize| a.row(i).filter(|&(_, v)| !map(v).is_zero()).count();
    let counts: Vec<usize> = if parallel {
        (0..nrows).into_par_iter().map(count).collect()
    } else {
        (0..nrows).map(count).collect()
    };
    let indptr = counts_to_indptr(&counts)?;
    let nnz = idx_to_usize(indptr[nrows]);
    if nnz == a.nnz() && a.data.iter().all(|&v| map(v) == v) {
        return Ok(a.clone());
    }

    let mut indices: Vec<Idxint> = vec![0; nnz];
    let mut data = vec![Complex64::zero(); nnz];
    let fill = |(i, (ri, rv)): (usize, (&mut [Idxint], &mut [Complex64]))| {
        let s = idx_to_usize(a.indptr[i]);
        let e = idx_to_usize(a.indptr[i + 1]);
        let mut dst = 0usize;
        for p in s..e {
            let v = map(a.data[p]);
            if !v.is_zero() {
                ri[dst] = a.indices[p];
                rv[dst] = v;
                dst += 1;
            }
        }
    };
    let index_rows = split_rows_mut(&mut indices, &indptr);
    let data_rows = split_rows_mut(&mut data, &indptr);
    if parallel {
        index_rows
            .into_par_iter()
            .zip(data_rows)
            .enumerate()
            .for_each(fill);
    } else {
        index_rows
            .into_iter()
            .zip(data_rows)
            .enumerate()
            .for_each(fill);
    }
    log::trace!("filter_csr: nnz {} -> {nnz}", a.nnz());
    Ok(Csr::from_parts_unchecked(nrows, a.ncols, indptr, indices, data))
}

/// Drop explicitly stored zeros.
pub fn eliminate_zeros(a: &Csr) -> Result<Csr> {
    filter_csr(a, |v| v)
}

/// Round parts smaller than `atol` to zero and drop entries that vanish.
/// A negative `atol` leaves the matrix unchanged.
pub fn tidy_csr(a: &Csr, atol: f64) -> Result<Csr> {
    if atol < 0.0 {
        return Ok(a.clone());
    }
    filter_csr(a, |v| tidy_value(v, atol))
}

#[must_use]
pub fn tidy_dense(a: &Dense, atol: f64) -> Dense {
    let mut out = a.copy();
    if atol > 0.0 {
        out.as_ndarray_mut()
            .mapv_inplace(|z| tidy_value(z, atol));
    }
    out
}
