//! Index conversions, path selection and the SIMD complex scaler shared by
//! the kernels.

use num_complex::Complex64;
use qdata_core::{settings, DataError, Idxint, Result};
use wide::f64x4;

/// Convert a validated index to usize.
#[inline]
#[must_use]
pub fn idx_to_usize(x: Idxint) -> usize {
    debug_assert!(x >= 0);
    #[allow(clippy::cast_sign_loss)]
    {
        x as usize
    }
}

/// Narrow a position already known to fit the index width.
#[inline]
#[must_use]
pub fn as_idx(x: usize) -> Idxint {
    debug_assert!(Idxint::try_from(x).is_ok());
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    {
        x as Idxint
    }
}

/// Checked narrowing into the index width.
#[inline]
pub fn usize_to_idx(x: usize) -> Result<Idxint> {
    Idxint::try_from(x).map_err(|_| DataError::IndexOverflow(x))
}

/// Whether work of `nnz` elements should go to the rayon pool.
#[inline]
#[must_use]
pub fn use_parallel(nnz: usize) -> bool {
    nnz >= settings().parallel_nnz_threshold
}

/// Row pointers from per-row counts.
pub fn counts_to_indptr(counts: &[usize]) -> Result<Vec<Idxint>> {
    let mut indptr = Vec::with_capacity(counts.len() + 1);
    let mut acc = 0usize;
    indptr.push(0);
    for &c in counts {
        acc += c;
        indptr.push(usize_to_idx(acc)?);
    }
    Ok(indptr)
}

/// Split `buf` into the per-row slices described by `indptr`.
pub fn split_rows_mut<'a, T>(mut buf: &'a mut [T], indptr: &[Idxint]) -> Vec<&'a mut [T]> {
    let mut out = Vec::with_capacity(indptr.len().saturating_sub(1));
    for w in indptr.windows(2) {
        let len = idx_to_usize(w[1]) - idx_to_usize(w[0]);
        let (head, tail) = std::mem::take(&mut buf).split_at_mut(len);
        out.push(head);
        buf = tail;
    }
    out
}

/// In-place `x *= alpha` over a slice, two complex values per f64x4 lane.
pub fn scale_in_place(chunk: &mut [Complex64], alpha: Complex64) {
    let re = f64x4::splat(alpha.re);
    let im = f64x4::from([-alpha.im, alpha.im, -alpha.im, alpha.im]);
    let mut pairs = chunk.chunks_exact_mut(2);
    for p in &mut pairs {
        let v = f64x4::from([p[0].re, p[0].im, p[1].re, p[1].im]);
        let swapped = f64x4::from([p[0].im, p[0].re, p[1].im, p[1].re]);
        let r = (v * re + swapped * im).to_array();
        p[0] = Complex64::new(r[0], r[1]);
        p[1] = Complex64::new(r[2], r[3]);
    }
    for z in pairs.into_remainder() {
        *z *= alpha;
    }
}
