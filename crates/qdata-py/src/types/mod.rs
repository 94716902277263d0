//! `#[pyclass]` wrappers around the `qdata_core` formats
//!
//! Each type is a thin wrapper: construction and validation happen in
//! `qdata_core`, arithmetic in `qdata_kernels`.

pub mod csr;
pub mod dense;

pub use csr::PyCsr;
pub use dense::PyDense;

use pyo3::exceptions::PyValueError;
use pyo3::PyErr;
use qdata_core::DataError;

#[inline]
pub(crate) fn to_py_err(e: DataError) -> PyErr {
    PyValueError::new_err(e.to_string())
}
