use num_complex::Complex64;
use numpy::{IntoPyArray, PyArray2, PyReadonlyArrayDyn};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyTuple;
use pyo3::{PyTraverseError, PyVisit};

use qdata_core::{Data, Dense};
use qdata_kernels::{
    adjoint_dense, conj_dense, dense_to_csr, mul_scalar_dense, trace_dense, transpose_dense,
};

use super::{to_py_err, PyCsr};

fn dense_from_any(
    array: &Bound<'_, PyAny>,
    shape: Option<&[isize]>,
    fortran: bool,
) -> PyResult<Dense> {
    let built = if let Ok(a) = array.extract::<PyReadonlyArrayDyn<'_, Complex64>>() {
        Dense::from_array_dyn(a.as_array(), shape, fortran)
    } else if let Ok(a) = array.extract::<PyReadonlyArrayDyn<'_, f64>>() {
        Dense::from_array_dyn(a.as_array(), shape, fortran)
    } else if let Ok(a) = array.extract::<PyReadonlyArrayDyn<'_, i64>>() {
        Dense::from_array_dyn(a.as_array(), shape, fortran)
    } else if let Ok(a) = array.extract::<PyReadonlyArrayDyn<'_, i32>>() {
        Dense::from_array_dyn(a.as_array(), shape, fortran)
    } else if let Ok(a) = array.extract::<PyReadonlyArrayDyn<'_, u32>>() {
        Dense::from_array_dyn(a.as_array(), shape, fortran)
    } else {
        return Err(PyValueError::new_err(
            "input must be a numpy array of complex128, float64, int64, int32 or uint32",
        ));
    };
    built.map_err(to_py_err)
}

/// Only a tuple of integers is a shape; lists and `None` entries are rejected.
fn shape_from_py(shape: &Bound<'_, PyAny>) -> PyResult<Vec<isize>> {
    let err = || PyValueError::new_err("shape must be a tuple of two positive integers");
    let tuple = shape.downcast::<PyTuple>().map_err(|_| err())?;
    tuple.extract::<Vec<isize>>().map_err(|_| err())
}

#[pyclass(name = "Dense", module = "qdata._core")]
pub struct PyDense {
    pub(crate) inner: Dense,
    view: Option<Py<PyArray2<Complex64>>>,
}

impl From<Dense> for PyDense {
    fn from(inner: Dense) -> Self {
        Self { inner, view: None }
    }
}

#[pymethods]
impl PyDense {
    #[new]
    #[pyo3(signature = (array, shape=None, fortran=false))]
    fn new(
        array: &Bound<'_, PyAny>,
        shape: Option<&Bound<'_, PyAny>>,
        fortran: bool,
    ) -> PyResult<Self> {
        let shape = shape.map(shape_from_py).transpose()?;
        dense_from_any(array, shape.as_deref(), fortran).map(Self::from)
    }

    #[getter]
    fn shape(&self) -> (usize, usize) {
        self.inner.shape()
    }

    #[getter]
    fn fortran(&self) -> bool {
        self.inner.is_fortran()
    }

    fn copy(&self) -> Self {
        self.inner.copy().into()
    }

    /// Writable numpy view of the stored buffer. Every call returns the same array object.
    fn as_ndarray<'py>(slf: &Bound<'py, Self>) -> Bound<'py, PyArray2<Complex64>> {
        let py = slf.py();
        let mut this = slf.borrow_mut();
        if let Some(view) = &this.view {
            return view.bind(py).clone();
        }
        // SAFETY: the view keeps `slf` alive and nothing replaces or reallocates `inner`.
        let array =
            unsafe { PyArray2::borrow_from_array(&this.inner.as_ndarray(), slf.clone().into_any()) };
        this.view = Some(array.clone().unbind());
        array
    }

    fn to_array<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<Complex64>> {
        let arr = py.detach(|| self.inner.to_array());
        arr.into_pyarray(py)
    }

    fn transpose(&self, py: Python<'_>) -> PyResult<Self> {
        py.detach(|| transpose_dense(&self.inner))
            .map(Self::from)
            .map_err(to_py_err)
    }

    fn conj(&self, py: Python<'_>) -> PyResult<Self> {
        py.detach(|| conj_dense(&self.inner))
            .map(Self::from)
            .map_err(to_py_err)
    }

    fn adjoint(&self, py: Python<'_>) -> PyResult<Self> {
        py.detach(|| adjoint_dense(&self.inner))
            .map(Self::from)
            .map_err(to_py_err)
    }

    fn trace(&self) -> PyResult<Complex64> {
        trace_dense(&self.inner).map_err(to_py_err)
    }

    fn mul_scalar(&self, py: Python<'_>, alpha: Complex64) -> Self {
        py.detach(|| mul_scalar_dense(&self.inner, alpha)).into()
    }

    #[pyo3(signature = (atol=None))]
    fn to_csr(&self, py: Python<'_>, atol: Option<f64>) -> PyResult<PyCsr> {
        let atol = atol.unwrap_or_else(|| qdata_core::settings().atol);
        py.detach(|| dense_to_csr(&self.inner, atol))
            .map(PyCsr::from)
            .map_err(to_py_err)
    }

    fn __traverse__(&self, visit: PyVisit<'_>) -> Result<(), PyTraverseError> {
        if let Some(view) = &self.view {
            visit.call(view)?;
        }
        Ok(())
    }

    fn __clear__(&mut self) {
        self.view = None;
    }

    fn __repr__(&self) -> String {
        let (r, c) = self.inner.shape();
        format!("Dense(shape=({r}, {c}), fortran={})", self.inner.is_fortran())
    }
}
