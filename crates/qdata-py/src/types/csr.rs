use num_complex::Complex64;
use numpy::{IntoPyArray, PyArray1, PyArray2, PyReadonlyArray1};
use pyo3::prelude::*;

use qdata_core::{Csr, Data, Idxint};
use qdata_kernels::{
    add_csr, adjoint_csr, conj_csr, csr_to_dense, mul_scalar_csr, spmv, tidy_csr, trace_csr,
    transpose_csr,
};

use super::{to_py_err, PyDense};

#[pyclass(name = "CSR", module = "qdata._core")]
pub struct PyCsr {
    pub(crate) inner: Csr,
}

impl From<Csr> for PyCsr {
    fn from(inner: Csr) -> Self {
        Self { inner }
    }
}

#[pymethods]
impl PyCsr {
    /// The structure is always fully validated; malformed input raises `ValueError`.
    #[new]
    fn new(
        shape: (usize, usize),
        indptr: PyReadonlyArray1<'_, Idxint>,
        indices: PyReadonlyArray1<'_, Idxint>,
        data: PyReadonlyArray1<'_, Complex64>,
    ) -> PyResult<Self> {
        let csr = Csr::from_parts(
            shape.0,
            shape.1,
            indptr.as_slice()?.to_vec(),
            indices.as_slice()?.to_vec(),
            data.as_slice()?.to_vec(),
            true,
        )
        .map_err(to_py_err)?;
        Ok(Self { inner: csr })
    }

    #[getter]
    fn shape(&self) -> (usize, usize) {
        self.inner.shape()
    }

    #[getter]
    fn nnz(&self) -> usize {
        self.inner.nnz()
    }

    #[getter]
    fn indptr<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<Idxint>> {
        PyArray1::from_slice(py, &self.inner.indptr)
    }

    #[getter]
    fn indices<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<Idxint>> {
        PyArray1::from_slice(py, &self.inner.indices)
    }

    #[getter]
    fn data<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<Complex64>> {
        PyArray1::from_slice(py, &self.inner.data)
    }

    fn copy(&self) -> Self {
        self.inner.clone().into()
    }

    fn to_array<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<Complex64>> {
        let arr = py.detach(|| self.inner.to_array());
        arr.into_pyarray(py)
    }

    #[pyo3(signature = (fortran=true))]
    fn to_dense(&self, py: Python<'_>, fortran: bool) -> PyResult<PyDense> {
        py.detach(|| csr_to_dense(&self.inner, fortran))
            .map(PyDense::from)
            .map_err(to_py_err)
    }

    fn transpose(&self, py: Python<'_>) -> Self {
        py.detach(|| transpose_csr(&self.inner)).into()
    }

    fn conj(&self, py: Python<'_>) -> Self {
        py.detach(|| conj_csr(&self.inner)).into()
    }

    fn adjoint(&self, py: Python<'_>) -> Self {
        py.detach(|| adjoint_csr(&self.inner)).into()
    }

    fn trace(&self) -> PyResult<Complex64> {
        trace_csr(&self.inner).map_err(to_py_err)
    }

    fn mul_scalar(&self, py: Python<'_>, alpha: Complex64) -> PyResult<Self> {
        py.detach(|| mul_scalar_csr(&self.inner, alpha))
            .map(Self::from)
            .map_err(to_py_err)
    }

    #[pyo3(signature = (other, scale=Complex64::new(1.0, 0.0)))]
    fn add(&self, py: Python<'_>, other: &Self, scale: Complex64) -> PyResult<Self> {
        py.detach(|| add_csr(&self.inner, &other.inner, scale))
            .map(Self::from)
            .map_err(to_py_err)
    }

    fn spmv<'py>(
        &self,
        py: Python<'py>,
        x: PyReadonlyArray1<'py, Complex64>,
    ) -> PyResult<Bound<'py, PyArray1<Complex64>>> {
        let xv: Vec<Complex64> = x.as_slice()?.to_vec();
        let y = py.detach(|| spmv(&self.inner, &xv)).map_err(to_py_err)?;
        Ok(PyArray1::from_vec(py, y))
    }

    #[pyo3(signature = (atol=None))]
    fn tidyup(&self, py: Python<'_>, atol: Option<f64>) -> PyResult<Self> {
        let atol = atol.unwrap_or_else(|| qdata_core::settings().atol);
        py.detach(|| tidy_csr(&self.inner, atol))
            .map(Self::from)
            .map_err(to_py_err)
    }

    fn __repr__(&self) -> String {
        let (r, c) = self.inner.shape();
        format!("CSR(shape=({r}, {c}), nnz={})", self.inner.nnz())
    }
}
