//! CSR format definitions and constructors

use ndarray::Array2;
use num_complex::Complex64;
use num_traits::Zero;

use crate::data::Data;
use crate::dense::check_shape;
use crate::dtype::{idx_to_usize, usize_to_idx, Idxint};
use crate::error::{DataError, Result};

#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Csr<T = Complex64, I = Idxint> {
    pub nrows: usize,
    pub ncols: usize,
    pub indptr: Vec<I>,  // length nrows + 1
    pub indices: Vec<I>, // column index per stored value
    pub data: Vec<T>,
}

impl<T, I> Csr<T, I> {
    #[inline]
    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }
    #[inline]
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.data.len()
    }
}

impl Csr<Complex64, Idxint> {
    /// Both extents must be positive. Without `check`, only the lengths and
    /// the first/last pointers are validated; out-of-range or unsorted
    /// indices are accepted and make [`Csr::row`] and `to_array` panic.
    pub fn from_parts(
        nrows: usize,
        ncols: usize,
        indptr: Vec<Idxint>,
        indices: Vec<Idxint>,
        data: Vec<Complex64>,
        check: bool,
    ) -> Result<Self> {
        check_shape(nrows, ncols)?;
        let Some(expected_len) = nrows.checked_add(1) else {
            return Err(DataError::IndexOverflow(nrows));
        };
        usize_to_idx(nrows)?;
        usize_to_idx(ncols)?;
        if indptr.len() != expected_len {
            return Err(DataError::InvalidStructure("indptr length must be nrows + 1"));
        }
        if indices.len() != data.len() {
            return Err(DataError::InvalidStructure(
                "indices and data must have equal length",
            ));
        }
        let nnz = usize_to_idx(indices.len())?;
        if indptr.last().copied().unwrap_or(0) != nnz {
            return Err(DataError::InvalidStructure("indptr last element must equal nnz"));
        }
        if indptr.first().copied().unwrap_or(0) != 0 {
            return Err(DataError::InvalidStructure("indptr first element must be 0"));
        }
        if check {
            for w in indptr.windows(2) {
                if w[0] < 0 || w[1] < 0 {
                    return Err(DataError::InvalidStructure("indptr must be non-negative"));
                }
                if w[0] > w[1] {
                    return Err(DataError::InvalidStructure("indptr must be non-decreasing"));
                }
            }
            for w in indptr.windows(2) {
                let start = idx_to_usize(w[0]);
                let end = idx_to_usize(w[1]);
                let mut prev_col: Idxint = -1;
                for &j in &indices[start..end] {
                    if j < 0 || idx_to_usize(j) >= ncols {
                        return Err(DataError::IndexOutOfBounds {
                            index: i64::from(j),
                            bound: ncols,
                        });
                    }
                    if j <= prev_col {
                        return Err(DataError::InvalidStructure(
                            "column indices must be strictly increasing within each row",
                        ));
                    }
                    prev_col = j;
                }
            }
        }
        Ok(Self {
            nrows,
            ncols,
            indptr,
            indices,
            data,
        })
    }

    #[inline]
    #[must_use]
    pub const fn from_parts_unchecked(
        nrows: usize,
        ncols: usize,
        indptr: Vec<Idxint>,
        indices: Vec<Idxint>,
        data: Vec<Complex64>,
    ) -> Self {
        Self {
            nrows,
            ncols,
            indptr,
            indices,
            data,
        }
    }

    /// Matrix with no stored entries.
    pub fn zeros(nrows: usize, ncols: usize) -> Result<Self> {
        Self::from_parts(nrows, ncols, vec![0; nrows + 1], Vec::new(), Vec::new(), false)
    }

    /// `scale` times the identity; a zero scale stores nothing.
    pub fn identity(dimension: usize, scale: Complex64) -> Result<Self> {
        if scale.is_zero() {
            return Self::zeros(dimension, dimension);
        }
        if dimension == 0 {
            return Err(DataError::InvalidShape(vec![0, 0]));
        }
        let last = usize_to_idx(dimension)?;
        let indptr: Vec<Idxint> = (0..=last).collect();
        let indices: Vec<Idxint> = (0..last).collect();
        let data = vec![scale; dimension];
        Ok(Self::from_parts_unchecked(
            dimension, dimension, indptr, indices, data,
        ))
    }

    /// Stored `(column, value)` pairs of row `i`.
    ///
    /// # Panics
    /// If `i >= nrows`.
    pub fn row(&self, i: usize) -> impl Iterator<Item = (usize, Complex64)> + '_ {
        let s = idx_to_usize(self.indptr[i]);
        let e = idx_to_usize(self.indptr[i + 1]);
        self.indices[s..e]
            .iter()
            .zip(&self.data[s..e])
            .map(|(&j, &v)| (idx_to_usize(j), v))
    }
}

impl Data for Csr<Complex64, Idxint> {
    #[inline]
    fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    fn to_array(&self) -> Array2<Complex64> {
        let mut out = Array2::zeros((self.nrows, self.ncols));
        for i in 0..self.nrows {
            for (j, v) in self.row(i) {
                out[(i, j)] += v;
            }
        }
        out
    }
}
