//! COO format definitions and constructors

use ndarray::Array2;
use num_complex::Complex64;

use crate::data::Data;
use crate::dense::check_shape;
use crate::dtype::{idx_to_usize, usize_to_idx, Idxint};
use crate::error::{DataError, Result};

/// Coordinate triplets. Duplicate coordinates are allowed and add up.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Coo<T = Complex64, I = Idxint> {
    pub data: Vec<T>,
    pub row: Vec<I>, // length nnz
    pub col: Vec<I>, // length nnz
    pub ncols: usize,
    pub nrows: usize,
}

impl<T, I> Coo<T, I> {
    #[inline]
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.data.len()
    }
    #[inline]
    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }
}

impl Coo<Complex64, Idxint> {
    /// Both extents must be positive. Without `check`, out-of-range
    /// coordinates are accepted and make `to_array` panic.
    #[inline]
    pub fn from_parts(
        nrows: usize,
        ncols: usize,
        row: Vec<Idxint>,
        col: Vec<Idxint>,
        data: Vec<Complex64>,
        check: bool,
    ) -> Result<Self> {
        check_shape(nrows, ncols)?;
        if row.len() != data.len() || col.len() != data.len() {
            return Err(DataError::InvalidStructure(
                "row/col/data must have equal length",
            ));
        }
        usize_to_idx(nrows)?;
        usize_to_idx(ncols)?;
        if check {
            for (&i, &j) in row.iter().zip(&col) {
                if i < 0 || idx_to_usize(i) >= nrows {
                    return Err(DataError::IndexOutOfBounds {
                        index: i64::from(i),
                        bound: nrows,
                    });
                }
                if j < 0 || idx_to_usize(j) >= ncols {
                    return Err(DataError::IndexOutOfBounds {
                        index: i64::from(j),
                        bound: ncols,
                    });
                }
            }
        }
        Ok(Self {
            data,
            row,
            col,
            ncols,
            nrows,
        })
    }

    #[inline]
    #[must_use]
    pub const fn from_parts_unchecked(
        nrows: usize,
        ncols: usize,
        row: Vec<Idxint>,
        col: Vec<Idxint>,
        data: Vec<Complex64>,
    ) -> Self {
        Self {
            data,
            row,
            col,
            ncols,
            nrows,
        }
    }
}

impl Data for Coo<Complex64, Idxint> {
    #[inline]
    fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    fn to_array(&self) -> Array2<Complex64> {
        let mut out = Array2::zeros((self.nrows, self.ncols));
        for ((&i, &j), &v) in self.row.iter().zip(&self.col).zip(&self.data) {
            out[(idx_to_usize(i), idx_to_usize(j))] += v;
        }
        out
    }
}
