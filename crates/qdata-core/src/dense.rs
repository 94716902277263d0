//! Dense complex128 storage
//!
//! `Dense` owns a 2-D `Complex64` buffer in either C (row-major) or Fortran
//! (column-major) order. Views handed out by [`Dense::as_ndarray`] and
//! [`Dense::as_ndarray_mut`] borrow that buffer directly, so writes through a
//! mutable view land in the matrix.

use ndarray::{Array2, ArrayBase, ArrayView2, ArrayViewD, ArrayViewMut2, Ix2, ShapeBuilder};
use ndarray::Data as NdData;
use num_complex::{Complex32, Complex64};
use num_traits::{One, Zero};

use crate::data::Data;
use crate::error::{DataError, Result};

/// Element types accepted when building a [`Dense`] from an existing array.
pub trait ToComplex: Copy {
    fn to_complex(self) -> Complex64;
}

impl ToComplex for Complex64 {
    #[inline]
    fn to_complex(self) -> Complex64 {
        self
    }
}

impl ToComplex for Complex32 {
    #[inline]
    fn to_complex(self) -> Complex64 {
        Complex64::new(f64::from(self.re), f64::from(self.im))
    }
}

impl ToComplex for f64 {
    #[inline]
    fn to_complex(self) -> Complex64 {
        Complex64::new(self, 0.0)
    }
}

impl ToComplex for f32 {
    #[inline]
    fn to_complex(self) -> Complex64 {
        Complex64::new(f64::from(self), 0.0)
    }
}

impl ToComplex for i32 {
    #[inline]
    fn to_complex(self) -> Complex64 {
        Complex64::new(f64::from(self), 0.0)
    }
}

impl ToComplex for u32 {
    #[inline]
    fn to_complex(self) -> Complex64 {
        Complex64::new(f64::from(self), 0.0)
    }
}

impl ToComplex for i64 {
    #[inline]
    fn to_complex(self) -> Complex64 {
        #[allow(clippy::cast_precision_loss)]
        {
            Complex64::new(self as f64, 0.0)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dense {
    array: Array2<Complex64>,
    fortran: bool,
}

/// Both extents must be positive.
pub(crate) fn check_shape(rows: usize, cols: usize) -> Result<()> {
    if rows == 0 || cols == 0 {
        return Err(DataError::InvalidShape(vec![
            isize::try_from(rows).unwrap_or(isize::MAX),
            isize::try_from(cols).unwrap_or(isize::MAX),
        ]));
    }
    Ok(())
}

fn resolve_shape(requested: &[isize], size: usize) -> Result<(usize, usize)> {
    let &[r, c] = requested else {
        return Err(DataError::InvalidShape(requested.to_vec()));
    };
    let (Ok(rows), Ok(cols)) = (usize::try_from(r), usize::try_from(c)) else {
        return Err(DataError::InvalidShape(requested.to_vec()));
    };
    if rows == 0 || cols == 0 {
        return Err(DataError::InvalidShape(requested.to_vec()));
    }
    if rows.checked_mul(cols) != Some(size) {
        return Err(DataError::ShapeSizeMismatch {
            shape: (rows, cols),
            size,
        });
    }
    Ok((rows, cols))
}

impl Dense {
    /// Copy a 2-D array of any supported element type into a new matrix.
    ///
    /// The result is always complex128 in C order and never reuses the
    /// input buffer.
    pub fn from_array<T, S>(array: &ArrayBase<S, Ix2>) -> Result<Self>
    where
        T: ToComplex,
        S: NdData<Elem = T>,
    {
        let (rows, cols) = array.dim();
        check_shape(rows, cols)?;
        // logical row-major walk, so strided or transposed inputs land in C order
        let data: Vec<Complex64> = array.iter().map(|&x| x.to_complex()).collect();
        Self::from_vec(rows, cols, data, false)
    }

    /// Build from an N-D array, optionally reshaping it.
    ///
    /// Without `shape`, a 1-D input becomes a column and a 2-D input keeps
    /// its shape; anything else is rejected. With `shape`, exactly two
    /// positive extents whose product is the input size are required. Data
    /// is read and stored in Fortran order when `fortran` is set.
    pub fn from_array_dyn<T: ToComplex>(
        array: ArrayViewD<'_, T>,
        shape: Option<&[isize]>,
        fortran: bool,
    ) -> Result<Self> {
        let size = array.len();
        let requested: Vec<isize> = match shape {
            Some(s) => s.to_vec(),
            None => {
                let dims: Vec<isize> = array
                    .shape()
                    .iter()
                    .map(|&d| isize::try_from(d).unwrap_or(isize::MAX))
                    .collect();
                match dims.len() {
                    1 => vec![dims[0], 1],
                    2 => dims,
                    _ => return Err(DataError::InvalidShape(dims)),
                }
            }
        };
        let (rows, cols) = resolve_shape(&requested, size)?;
        let data: Vec<Complex64> = if fortran {
            array.t().iter().map(|&x| x.to_complex()).collect()
        } else {
            array.iter().map(|&x| x.to_complex()).collect()
        };
        Self::from_vec(rows, cols, data, fortran)
    }

    /// Wrap a flat buffer laid out in the given order.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<Complex64>, fortran: bool) -> Result<Self> {
        check_shape(rows, cols)?;
        let size = data.len();
        let array = if fortran {
            Array2::from_shape_vec((rows, cols).f(), data)
        } else {
            Array2::from_shape_vec((rows, cols), data)
        }
        .map_err(|_| DataError::ShapeSizeMismatch {
            shape: (rows, cols),
            size,
        })?;
        Ok(Self { array, fortran })
    }

    /// Matrix with allocated storage whose contents the caller will overwrite.
    pub fn empty(rows: usize, cols: usize, fortran: bool) -> Result<Self> {
        Self::zeros(rows, cols, fortran)
    }

    pub fn zeros(rows: usize, cols: usize, fortran: bool) -> Result<Self> {
        check_shape(rows, cols)?;
        let array = if fortran {
            Array2::zeros((rows, cols).f())
        } else {
            Array2::zeros((rows, cols))
        };
        Ok(Self { array, fortran })
    }

    /// `scale` times the identity of the given dimension.
    pub fn identity(dimension: usize, scale: Complex64, fortran: bool) -> Result<Self> {
        let mut out = Self::zeros(dimension, dimension, fortran)?;
        out.array.diag_mut().fill(scale);
        Ok(out)
    }

    /// Unscaled identity in C order.
    pub fn eye(dimension: usize) -> Result<Self> {
        Self::identity(dimension, Complex64::one(), false)
    }

    #[inline]
    #[must_use]
    pub fn nrows(&self) -> usize {
        self.array.nrows()
    }

    #[inline]
    #[must_use]
    pub fn ncols(&self) -> usize {
        self.array.ncols()
    }

    /// Number of stored elements; every element of a dense matrix is stored.
    #[inline]
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.array.len()
    }

    #[inline]
    #[must_use]
    pub const fn is_fortran(&self) -> bool {
        self.fortran
    }

    #[inline]
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<Complex64> {
        self.array.get((i, j)).copied()
    }

    /// Deep copy with its own buffer.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Borrowed view of the stored buffer.
    #[inline]
    #[must_use]
    pub fn as_ndarray(&self) -> ArrayView2<'_, Complex64> {
        self.array.view()
    }

    /// Mutable view; writes go straight into the matrix.
    #[inline]
    pub fn as_ndarray_mut(&mut self) -> ArrayViewMut2<'_, Complex64> {
        self.array.view_mut()
    }

    #[must_use]
    pub fn into_inner(self) -> Array2<Complex64> {
        self.array
    }

    /// Copy of the matrix laid out in the requested order.
    #[must_use]
    pub fn to_contiguous(&self, fortran: bool) -> Self {
        if fortran == self.fortran {
            return self.clone();
        }
        let mut array = if fortran {
            Array2::zeros(self.array.raw_dim().f())
        } else {
            Array2::zeros(self.array.raw_dim())
        };
        array.assign(&self.array);
        Self { array, fortran }
    }

    /// True when every element is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.array.iter().all(Zero::is_zero)
    }
}

impl Data for Dense {
    #[inline]
    fn shape(&self) -> (usize, usize) {
        self.array.dim()
    }

    fn to_array(&self) -> Array2<Complex64> {
        self.array.as_standard_layout().into_owned()
    }
}

impl TryFrom<Array2<Complex64>> for Dense {
    type Error = DataError;

    /// Takes ownership of the buffer, keeping its memory order when it is
    /// contiguous in either order.
    fn try_from(array: Array2<Complex64>) -> Result<Self> {
        let (rows, cols) = array.dim();
        check_shape(rows, cols)?;
        if array.is_standard_layout() {
            return Ok(Self {
                array,
                fortran: false,
            });
        }
        if array.t().is_standard_layout() {
            return Ok(Self {
                array,
                fortran: true,
            });
        }
        Ok(Self {
            array: array.as_standard_layout().into_owned(),
            fortran: false,
        })
    }
}
