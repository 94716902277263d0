//! Exercises the rayon paths by dropping the parallel threshold to zero.

use ndarray::Array2;
use qdata_core::{set_settings, settings, Complex64, Coo, Csr, Data, Dense, Settings};
use qdata_kernels::*;

fn force_parallel() {
    let _ = env_logger::builder().is_test(true).try_init();
    set_settings(Settings {
        parallel_nnz_threshold: 0,
        ..settings()
    });
}

fn banded(n: usize) -> Array2<Complex64> {
    Array2::from_shape_fn((n, n), |(i, j)| {
        if i.abs_diff(j) <= 2 {
            Complex64::new((i + 1) as f64, j as f64 - i as f64)
        } else {
            Complex64::new(0.0, 0.0)
        }
    })
}

fn max_diff(a: &Array2<Complex64>, b: &Array2<Complex64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).norm())
        .fold(0.0, f64::max)
}

#[test]
fn parallel_conversions_agree_with_reference() {
    force_parallel();
    let arr = banded(64);
    let dense = Dense::from_array(&arr).unwrap();
    let csr = dense_to_csr(&dense, 0.0).unwrap();
    assert_eq!(csr.nnz(), arr.iter().filter(|z| z.norm() > 0.0).count());
    assert_eq!(csr.to_array(), arr);
    assert_eq!(csr_to_dense(&csr, false).unwrap().to_array(), arr);

    let coo = csr_to_coo(&csr);
    let back = coo_to_csr(&Coo::from_parts(64, 64, coo.row, coo.col, coo.data, true).unwrap())
        .unwrap();
    assert_eq!(back, csr);
}

#[test]
fn parallel_arithmetic_agrees_with_reference() {
    force_parallel();
    let arr = banded(48);
    let csr = dense_to_csr(&Dense::from_array(&arr).unwrap(), 0.0).unwrap();
    let alpha = Complex64::new(-0.25, 1.5);

    let scaled = mul_scalar_csr(&csr, alpha).unwrap();
    assert!(max_diff(&scaled.to_array(), &arr.mapv(|z| z * alpha)) < 1e-12);

    let dense_scaled = mul_scalar_dense(&Dense::from_array(&arr).unwrap(), alpha);
    assert!(max_diff(&dense_scaled.to_array(), &arr.mapv(|z| z * alpha)) < 1e-12);

    let sum = add_csr(&csr, &transpose_csr(&csr), alpha).unwrap();
    let expected = &arr + &arr.t().mapv(|z| z * alpha);
    assert!(max_diff(&sum.to_array(), &expected) < 1e-12);

    let x: Vec<Complex64> = (0..48).map(|k| Complex64::new(1.0, k as f64)).collect();
    let y = spmv(&csr, &x).unwrap();
    let xv = ndarray::Array1::from(x.clone());
    let reference = arr.dot(&xv);
    for (a, b) in y.iter().zip(reference.iter()) {
        assert!((a - b).norm() < 1e-9);
    }

    let id = Dense::eye(48).unwrap();
    let prod = matmul_csr_dense(&csr, &id).unwrap();
    assert!(max_diff(&prod.to_array(), &arr) < 1e-12);
}

#[test]
fn parallel_reductions_agree_with_reference() {
    force_parallel();
    let arr = banded(32);
    let csr = dense_to_csr(&Dense::from_array(&arr).unwrap(), 0.0).unwrap();
    let expected_trace: Complex64 = arr.diag().sum();
    assert!((trace_csr(&csr).unwrap() - expected_trace).norm() < 1e-12);
    let fro = arr.iter().map(|z| z.norm_sqr()).sum::<f64>().sqrt();
    assert!((frobenius_csr(&csr) - fro).abs() < 1e-9);

    let tidied = tidy_csr(&Csr::identity(32, Complex64::new(1e-20, 1.0)).unwrap(), 1e-12).unwrap();
    assert!(tidied.data.iter().all(|z| z.re == 0.0 && z.im == 1.0));
}
