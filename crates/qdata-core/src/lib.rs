//! Core data structures and traits for qdata (pure Rust)
//!
//! Every storage format implements [`Data`], which converts it into a dense
//! `complex128` array. Sparse formats store their indices as [`Idxint`].

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod coo;
pub mod csr;
pub mod data;
pub mod dense;
pub mod dtype;
pub mod error;
pub mod settings;

pub use coo::Coo;
pub use csr::Csr;
pub use data::{AnyData, Data};
pub use dense::Dense;
pub use dtype::{Dtype, Idxint, IDXINT_DTYPE};
pub use error::{DataError, Result};
pub use num_complex::Complex64;
pub use settings::{set_settings, settings, Settings};
