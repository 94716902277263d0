#![allow(
    clippy::needless_pass_by_value,
    reason = "PyReadonlyArray types are thin wrappers passed by value in pyo3 idioms"
)]
#![allow(
    clippy::unnecessary_wraps,
    reason = "PyO3 methods conventionally return PyResult for Python-facing APIs"
)]
#![allow(
    clippy::elidable_lifetime_names,
    reason = "Explicit 'py lifetimes are idiomatic and clear in PyO3 method signatures"
)]
use num_complex::Complex64;
use pyo3::prelude::*;
use pyo3::types::PyModule;

use qdata_core::{Csr, Dense, IDXINT_DTYPE, VERSION};

mod types;

use types::{to_py_err, PyCsr, PyDense};

#[pyfunction]
#[pyo3(signature = (rows, cols, fortran=true))]
fn empty(rows: usize, cols: usize, fortran: bool) -> PyResult<PyDense> {
    Dense::empty(rows, cols, fortran)
        .map(PyDense::from)
        .map_err(to_py_err)
}

#[pyfunction]
#[pyo3(signature = (rows, cols, fortran=true))]
fn zeros(rows: usize, cols: usize, fortran: bool) -> PyResult<PyDense> {
    Dense::zeros(rows, cols, fortran)
        .map(PyDense::from)
        .map_err(to_py_err)
}

#[pyfunction]
#[pyo3(signature = (dimension, scale=Complex64::new(1.0, 0.0), fortran=true))]
fn identity(dimension: usize, scale: Complex64, fortran: bool) -> PyResult<PyDense> {
    Dense::identity(dimension, scale, fortran)
        .map(PyDense::from)
        .map_err(to_py_err)
}

#[pyfunction]
fn csr_zeros(rows: usize, cols: usize) -> PyResult<PyCsr> {
    Csr::zeros(rows, cols).map(PyCsr::from).map_err(to_py_err)
}

#[pyfunction]
#[pyo3(signature = (dimension, scale=Complex64::new(1.0, 0.0)))]
fn csr_identity(dimension: usize, scale: Complex64) -> PyResult<PyCsr> {
    Csr::identity(dimension, scale)
        .map(PyCsr::from)
        .map_err(to_py_err)
}

#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // RUST_LOG controls kernel logging from Python as well
    let _ = env_logger::try_init();
    log::debug!("qdata {VERSION}: idxint dtype {IDXINT_DTYPE}");
    m.add("__version__", VERSION)?;
    m.add("idxint_dtype", IDXINT_DTYPE.name())?;
    m.add_class::<PyDense>()?;
    m.add_class::<PyCsr>()?;
    m.add_function(wrap_pyfunction!(empty, m)?)?;
    m.add_function(wrap_pyfunction!(zeros, m)?)?;
    m.add_function(wrap_pyfunction!(identity, m)?)?;
    m.add_function(wrap_pyfunction!(csr_zeros, m)?)?;
    m.add_function(wrap_pyfunction!(csr_identity, m)?)?;
    Ok(())
}
