//! Conversion and arithmetic kernels for qdata formats (rayon/SIMD)
//!
//! Thread count follows rayon's global pool; set `RAYON_NUM_THREADS` to
//! override it. Serial paths are taken below
//! [`Settings::parallel_nnz_threshold`](qdata_core::Settings).

pub mod arith;
pub mod cleanup;
pub mod convert;
pub mod matmul;
pub mod reduce;
pub mod transform;
pub mod util;

pub use arith::{add_csr, add_dense, mul_scalar_csr, mul_scalar_dense};
pub use cleanup::{eliminate_zeros, tidy_csr, tidy_dense};
pub use convert::{coo_to_csr, csr_to_coo, csr_to_dense, dense_to_csr};
pub use matmul::{matmul_csr_dense, matmul_dense, spmv};
pub use reduce::{frobenius_csr, frobenius_dense, trace_csr, trace_dense};
pub use transform::{adjoint_csr, adjoint_dense, conj_csr, conj_dense, transpose_csr, transpose_dense};
