//! Element descriptors and the index width shared by the sparse formats

use core::fmt;

/// Integer type used for `indptr`/`indices` in the sparse formats.
pub type Idxint = i32;

/// Runtime descriptor of [`Idxint`].
pub const IDXINT_DTYPE: Dtype = Dtype::Int32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Dtype {
    Int32,
    Int64,
    UInt32,
    Float64,
    Complex128,
}

impl Dtype {
    /// numpy-compatible name
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::UInt32 => "uint32",
            Self::Float64 => "float64",
            Self::Complex128 => "complex128",
        }
    }

    /// Size of one element in bytes.
    #[inline]
    #[must_use]
    pub const fn itemsize(self) -> usize {
        match self {
            Self::Int32 | Self::UInt32 => 4,
            Self::Int64 | Self::Float64 => 8,
            Self::Complex128 => 16,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_signed(self) -> bool {
        !matches!(self, Self::UInt32)
    }

    #[inline]
    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::Int32 | Self::Int64 | Self::UInt32)
    }
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[inline]
pub(crate) fn idx_to_usize(x: Idxint) -> usize {
    debug_assert!(x >= 0);
    #[allow(clippy::cast_sign_loss)]
    {
        x as usize
    }
}

/// Checked conversion of a length/position into the index width.
#[inline]
pub(crate) fn usize_to_idx(x: usize) -> crate::Result<Idxint> {
    Idxint::try_from(x).map_err(|_| crate::DataError::IndexOverflow(x))
}
