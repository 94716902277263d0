use num_complex::Complex64;
use qdata_core::{Csr, Dense, Idxint, Result};
use rayon::prelude::*;

use crate::util::{as_idx, idx_to_usize, use_parallel};

/// Transpose CSR -> CSR (histogram over columns, then scatter)
#[must_use]
pub fn transpose_csr(a: &Csr) -> Csr {
    let nrows_t = a.ncols; // rows of transposed
    let ncols_t = a.nrows; // cols of transposed
    let nnz = a.nnz();

    // Count per column
    let mut indptr: Vec<Idxint> = vec![0; nrows_t + 1];
    for &j in &a.indices {
        indptr[idx_to_usize(j) + 1] += 1;
    }
    for j in 0..nrows_t {
        indptr[j + 1] += indptr[j];
    }

    let mut next: Vec<usize> = indptr[..nrows_t].iter().map(|&p| idx_to_usize(p)).collect();
    let mut indices: Vec<Idxint> = vec![0; nnz];
    let mut data = vec![Complex64::new(0.0, 0.0); nnz];
    // rows visited in order keep each output row sorted
    for i in 0..a.nrows {
        for (j, v) in a.row(i) {
            let dst = next[j];
            indices[dst] = as_idx(i);
            data[dst] = v;
            next[j] += 1;
        }
    }
    Csr::from_parts_unchecked(nrows_t, ncols_t, indptr, indices, data)
}

/// Complex conjugate of every stored value.
#[must_use]
pub fn conj_csr(a: &Csr) -> Csr {
    let mut out = a.clone();
    if use_parallel(out.nnz()) {
        out.data.par_iter_mut().for_each(|z| *z = z.conj());
    } else {
        out.data.iter_mut().for_each(|z| *z = z.conj());
    }
    out
}

/// Conjugate transpose.
#[must_use]
pub fn adjoint_csr(a: &Csr) -> Csr {
    let mut t = transpose_csr(a);
    t.data.iter_mut().for_each(|z| *z = z.conj());
    t
}

/// Transpose; a C-ordered input yields a Fortran-ordered result and vice
/// versa, so no element moves in memory.
pub fn transpose_dense(a: &Dense) -> Result<Dense> {
    Dense::try_from(a.as_ndarray().t().to_owned())
}

pub fn conj_dense(a: &Dense) -> Result<Dense> {
    Dense::try_from(a.as_ndarray().mapv(|z| z.conj()))
}

pub fn adjoint_dense(a: &Dense) -> Result<Dense> {
    Dense::try_from(a.as_ndarray().t().mapv(|z| z.conj()))
}
