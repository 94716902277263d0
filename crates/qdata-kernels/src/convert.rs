#![allow(
    clippy::many_single_char_names,
    reason = "Math kernels conventionally use i/j/k/p for indices"
)]
use num_complex::Complex64;
use qdata_core::{Coo, Csr, Data, DataError, Dense, Idxint, Result};
use rayon::prelude::*;

use crate::util::{as_idx, counts_to_indptr, idx_to_usize, split_rows_mut, use_parallel, usize_to_idx};

/// Convert CSR -> Dense in the requested memory order.
pub fn csr_to_dense(a: &Csr, fortran: bool) -> Result<Dense> {
    let (nrows, ncols) = a.shape();
    if nrows == 0 || ncols == 0 {
        // only reachable through from_parts_unchecked
        return Err(DataError::InvalidShape(vec![
            isize::try_from(nrows).unwrap_or(isize::MAX),
            isize::try_from(ncols).unwrap_or(isize::MAX),
        ]));
    }
    let mut buf = vec![Complex64::new(0.0, 0.0); nrows * ncols];
    let fill = |(i, out_row): (usize, &mut [Complex64])| {
        for (j, v) in a.row(i) {
            out_row[j] += v;
        }
    };
    if use_parallel(a.nnz()) {
        log::debug!("csr_to_dense: parallel over {nrows} rows");
        buf.par_chunks_mut(ncols).enumerate().for_each(fill);
    } else {
        buf.chunks_mut(ncols).enumerate().for_each(fill);
    }
    let out = Dense::from_vec(nrows, ncols, buf, false)?;
    Ok(if fortran { out.to_contiguous(true) } else { out })
}

/// Convert Dense -> CSR keeping entries with `|z| > atol`.
pub fn dense_to_csr(a: &Dense, atol: f64) -> Result<Csr> {
    let (nrows, ncols) = a.shape();
    usize_to_idx(ncols)?;
    let view = a.as_ndarray();
    let keep = |z: &Complex64| z.norm() > atol;

    // Pass 1: count kept entries per row
    let parallel = use_parallel(a.nnz());
    let counts: Vec<usize> = if parallel {
        log::debug!("dense_to_csr: parallel count over {nrows} rows");
        (0..nrows)
            .into_par_iter()
            .map(|i| view.row(i).iter().filter(|&z| keep(z)).count())
            .collect()
    } else {
        (0..nrows)
            .map(|i| view.row(i).iter().filter(|&z| keep(z)).count())
            .collect()
    };
    let indptr = counts_to_indptr(&counts)?;
    let nnz = idx_to_usize(indptr[nrows]);

    // Pass 2: fill rows
    let mut indices: Vec<Idxint> = vec![0; nnz];
    let mut data = vec![Complex64::new(0.0, 0.0); nnz];
    let index_rows = split_rows_mut(&mut indices, &indptr);
    let data_rows = split_rows_mut(&mut data, &indptr);
    let fill = |(i, (ri, rv)): (usize, (&mut [Idxint], &mut [Complex64]))| {
        let mut dst = 0usize;
        for (j, z) in view.row(i).iter().enumerate() {
            if keep(z) {
                ri[dst] = as_idx(j);
                rv[dst] = *z;
                dst += 1;
            }
        }
    };
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
    Ok(Csr::from_parts_unchecked(nrows, ncols, indptr, indices, data))
}

/// Convert CSR -> COO
#[must_use]
pub fn csr_to_coo(a: &Csr) -> Coo {
    let mut row: Vec<Idxint> = Vec::with_capacity(a.nnz());
    for (i, w) in a.indptr.windows(2).enumerate() {
        let n = idx_to_usize(w[1]) - idx_to_usize(w[0]);
        row.extend(std::iter::repeat(as_idx(i)).take(n));
    }
    Coo::from_parts_unchecked(a.nrows, a.ncols, row, a.indices.clone(), a.data.clone())
}

/// Convert COO -> CSR, summing duplicates and sorting columns within rows.
pub fn coo_to_csr(a: &Coo) -> Result<Csr> {
    let (nrows, ncols) = a.shape();
    let nnz = a.nnz();

    // Gather triples and sort by (row, col)
    let mut triples: Vec<(Idxint, Idxint, Complex64)> = (0..nnz)
        .map(|k| (a.row[k], a.col[k], a.data[k]))
        .collect();
    if use_parallel(nnz) {
        triples.par_sort_unstable_by(|x, y| x.0.cmp(&y.0).then(x.1.cmp(&y.1)));
    } else {
        triples.sort_unstable_by(|x, y| x.0.cmp(&y.0).then(x.1.cmp(&y.1)));
    }

    let mut counts = vec![0usize; nrows];
    let mut indices: Vec<Idxint> = Vec::with_capacity(nnz);
    let mut data: Vec<Complex64> = Vec::with_capacity(nnz);
    let mut last: Option<(Idxint, Idxint)> = None;
    for (r, c, v) in triples {
        if last == Some((r, c)) {
            if let Some(acc) = data.last_mut() {
                *acc += v; // duplicate
            }
            continue;
        }
        counts[idx_to_usize(r)] += 1;
        indices.push(c);
        data.push(v);
        last = Some((r, c));
    }
    let indptr = counts_to_indptr(&counts)?;
    Ok(Csr::from_parts_unchecked(nrows, ncols, indptr, indices, data))
}
