use num_complex::Complex64;
use num_traits::Zero;
use qdata_core::{Csr, Data, DataError, Dense, Idxint, Result};
use rayon::prelude::*;

use crate::util::{counts_to_indptr, idx_to_usize, scale_in_place, split_rows_mut, use_parallel};

/// `alpha * a`; a zero `alpha` gives a matrix with no stored entries.
pub fn mul_scalar_csr(a: &Csr, alpha: Complex64) -> Result<Csr> {
    if alpha.is_zero() {
        return Csr::zeros(a.nrows, a.ncols);
    }
    let mut out = a.clone();
    if use_parallel(out.nnz()) {
        out.data
            .par_chunks_mut(1024)
            .for_each(|chunk| scale_in_place(chunk, alpha));
    } else {
        scale_in_place(&mut out.data, alpha);
    }
    Ok(out)
}

/// `alpha * a` keeping the memory order of `a`.
#[must_use]
pub fn mul_scalar_dense(a: &Dense, alpha: Complex64) -> Dense {
    let mut out = a.copy();
    let parallel = use_parallel(out.nnz());
    let mut view = out.as_ndarray_mut();
    if view.as_slice_memory_order().is_none() {
        view.mapv_inplace(|z| z * alpha);
    } else if let Some(buf) = view.as_slice_memory_order_mut() {
        if parallel {
            buf.par_chunks_mut(1024)
                .for_each(|chunk| scale_in_place(chunk, alpha));
        } else {
            scale_in_place(buf, alpha);
        }
    }
    out
}

fn check_same_shape(a: (usize, usize), b: (usize, usize)) -> Result<()> {
    if a == b {
        Ok(())
    } else {
        Err(DataError::ShapeMismatch { left: a, right: b })
    }
}

/// Merge one row of `a + scale * b`; `emit` receives entries that are not
/// exactly zero, in column order.
fn merge_row(
    a: &Csr,
    b: &Csr,
    scale: Complex64,
    i: usize,
    mut emit: impl FnMut(Idxint, Complex64),
) {
    let mut pa = idx_to_usize(a.indptr[i]);
    let ea = idx_to_usize(a.indptr[i + 1]);
    let mut pb = idx_to_usize(b.indptr[i]);
    let eb = idx_to_usize(b.indptr[i + 1]);
    while pa < ea || pb < eb {
        let (j, v) = if pb >= eb || (pa < ea && a.indices[pa] < b.indices[pb]) {
            pa += 1;
            (a.indices[pa - 1], a.data[pa - 1])
        } else if pa >= ea || b.indices[pb] < a.indices[pa] {
            pb += 1;
            (b.indices[pb - 1], scale * b.data[pb - 1])
        } else {
            pa += 1;
            pb += 1;
            (a.indices[pa - 1], a.data[pa - 1] + scale * b.data[pb - 1])
        };
        if !v.is_zero() {
            emit(j, v);
        }
    }
}

/// `a + scale * b` for CSR operands of equal shape.
pub fn add_csr(a: &Csr, b: &Csr, scale: Complex64) -> Result<Csr> {
    check_same_shape(a.shape(), b.shape())?;
    let nrows = a.nrows;

    // Pass 1: count output nnz per row
    let count = |i: usize| {
        let mut cnt = 0usize;
        merge_row(a, b, scale, i, |_, _| cnt += 1);
        cnt
    };
    let parallel = use_parallel(a.nnz() + b.nnz());
    let counts: Vec<usize> = if parallel {
        (0..nrows).into_par_iter().map(count).collect()
    } else {
        (0..nrows).map(count).collect()
    };

    // Prefix sum -> indptr
    let indptr = counts_to_indptr(&counts)?;
    let nnz = idx_to_usize(indptr[nrows]);
    let mut indices: Vec<Idxint> = vec![0; nnz];
    let mut data = vec![Complex64::zero(); nnz];

    // Pass 2: fill rows
    let fill = |(i, (ri, rv)): (usize, (&mut [Idxint], &mut [Complex64]))| {
        let mut dst = 0usize;
        merge_row(a, b, scale, i, |j, v| {
            ri[dst] = j;
            rv[dst] = v;
            dst += 1;
        });
    };
    let index_rows = split_rows_mut(&mut indices, &indptr);
    let data_rows = split_rows_mut(&mut data, &indptr);
    if parallel {
        log::debug!("add_csr: parallel merge over {nrows} rows, nnz={nnz}");
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
    Ok(Csr::from_parts_unchecked(nrows, a.ncols, indptr, indices, data))
}

/// `a + scale * b` for dense operands; the result keeps the order of `a`.
pub fn add_dense(a: &Dense, b: &Dense, scale: Complex64) -> Result<Dense> {
    check_same_shape(a.shape(), b.shape())?;
    let mut out = a.copy();
    out.as_ndarray_mut().scaled_add(scale, &b.as_ndarray());
    Ok(out)
}
