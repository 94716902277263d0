use ndarray::{s, Array2, ArrayD, IxDyn};
use qdata_core::{Complex64, Data, DataError, Dense};

// ket, bra, square, wide, tall
const SHAPES: [(usize, usize); 5] = [(1, 5), (5, 1), (5, 5), (2, 4), (4, 2)];

fn sample(shape: (usize, usize)) -> Array2<Complex64> {
    Array2::from_shape_fn(shape, |(i, j)| {
        Complex64::new(0.5 + i as f64 * 1.25, j as f64 - 0.75 * i as f64)
    })
}

fn sample_dense(shape: (usize, usize)) -> Dense {
    Dense::from_array(&sample(shape)).unwrap()
}

fn count_nonzero(a: &Array2<Complex64>) -> usize {
    a.iter().filter(|z| z.re != 0.0 || z.im != 0.0).count()
}

#[test]
fn init_from_ndarray() {
    for shape in SHAPES {
        let nd = sample(shape);
        let test = Dense::from_array(&nd).unwrap();
        assert_eq!(test.shape(), shape);
        assert_eq!(test.as_ndarray(), nd.view());
    }
}

#[test]
fn init_from_ndarray_other_dtype() {
    for shape in SHAPES {
        let f = Array2::from_shape_fn(shape, |(i, j)| i as f64 * 0.5 - j as f64);
        let d = Dense::from_array(&f).unwrap();
        assert_eq!(d.shape(), shape);
        assert!(d
            .as_ndarray()
            .iter()
            .zip(f.iter())
            .all(|(z, &x)| z.re == x && z.im == 0.0));

        let i32s = Array2::from_shape_fn(shape, |(i, j)| i as i32 - 2 * j as i32);
        let d = Dense::from_array(&i32s).unwrap();
        assert!(d
            .as_ndarray()
            .iter()
            .zip(i32s.iter())
            .all(|(z, &x)| z.re == f64::from(x) && z.im == 0.0));

        let i64s = Array2::from_shape_fn(shape, |(i, j)| (i * 7 + j) as i64 - 3);
        let d = Dense::from_array(&i64s).unwrap();
        assert!(d
            .as_ndarray()
            .iter()
            .zip(i64s.iter())
            .all(|(z, &x)| z.re == x as f64 && z.im == 0.0));

        let u32s = Array2::from_shape_fn(shape, |(i, j)| (i * 3 + j) as u32);
        let d = Dense::from_array(&u32s).unwrap();
        assert_eq!(d.shape(), shape);
        assert!(d
            .as_ndarray()
            .iter()
            .zip(u32s.iter())
            .all(|(z, &x)| z.re == f64::from(x) && z.im == 0.0));
    }
}

#[test]
fn init_from_wrong_input() {
    let scalar = ArrayD::<f64>::zeros(IxDyn(&[]));
    assert!(matches!(
        Dense::from_array_dyn(scalar.view(), None, false),
        Err(DataError::InvalidShape(_))
    ));

    let empty = ArrayD::<f64>::zeros(IxDyn(&[0]));
    assert!(Dense::from_array_dyn(empty.view(), None, false).is_err());

    let cube = ArrayD::<f64>::zeros(IxDyn(&[2, 2, 2]));
    assert!(Dense::from_array_dyn(cube.view(), None, false).is_err());

    let valid = sample((5, 5)).into_dyn();
    let bad_shapes: [&[isize]; 6] = [&[], &[1], &[1, 2, 3], &[-1, 1], &[-4, -4], &[0, 25]];
    for shape in bad_shapes {
        let err = Dense::from_array_dyn(valid.view(), Some(shape), false).unwrap_err();
        assert!(matches!(err, DataError::InvalidShape(_)), "{shape:?}: {err}");
    }
    let err = Dense::from_array_dyn(valid.view(), Some(&[1213, 1217]), false).unwrap_err();
    assert_eq!(
        err,
        DataError::ShapeSizeMismatch {
            shape: (1213, 1217),
            size: 25
        }
    );
}

#[test]
fn init_from_transposed_view_is_c_ordered() {
    let c = sample((2, 4));
    let d = Dense::from_array(&c.t()).unwrap();
    assert_eq!(d.shape(), (4, 2));
    assert!(!d.is_fortran());
    assert!(d.as_ndarray().is_standard_layout());
    assert_eq!(d.as_ndarray(), c.t());

    let c_again = d.to_contiguous(false);
    assert!(c_again.as_ndarray().is_standard_layout());
    let f = d.to_contiguous(true);
    assert!(f.is_fortran());
    assert!(f.as_ndarray().t().is_standard_layout());
    assert_eq!(f.as_ndarray(), c.t());
}

#[test]
fn init_from_strided_view() {
    let c = sample((4, 5));
    let strided = c.slice(s![.., ..;2]);
    let d = Dense::from_array(&strided).unwrap();
    assert_eq!(d.shape(), (4, 3));
    assert!(!d.is_fortran());
    assert!(d.as_ndarray().is_standard_layout());
    assert_eq!(d.as_ndarray(), strided);
    assert_eq!(d.to_array(), strided.to_owned());
}

#[test]
fn init_from_zero_sized_2d_fails() {
    let nd = Array2::<Complex64>::zeros((0, 3));
    assert!(Dense::from_array(&nd).is_err());
}

#[test]
fn one_dimensional_input_becomes_column() {
    let v = ArrayD::from_shape_vec(IxDyn(&[3]), vec![1.0f64, 2.0, 3.0]).unwrap();
    let d = Dense::from_array_dyn(v.view(), None, false).unwrap();
    assert_eq!(d.shape(), (3, 1));
    assert_eq!(d.get(2, 0), Some(Complex64::new(3.0, 0.0)));
}

#[test]
fn reshape_follows_requested_order() {
    // [[0, 1, 2], [3, 4, 5]]
    let base = ArrayD::from_shape_vec(IxDyn(&[2, 3]), (0..6).map(f64::from).collect()).unwrap();

    let c = Dense::from_array_dyn(base.view(), Some(&[3, 2]), false).unwrap();
    assert!(!c.is_fortran());
    let expect_c = [[0.0, 1.0], [2.0, 3.0], [4.0, 5.0]];
    for (i, row) in expect_c.iter().enumerate() {
        for (j, &v) in row.iter().enumerate() {
            assert_eq!(c.get(i, j), Some(Complex64::new(v, 0.0)));
        }
    }

    let f = Dense::from_array_dyn(base.view(), Some(&[3, 2]), true).unwrap();
    assert!(f.is_fortran());
    let expect_f = [[0.0, 4.0], [3.0, 2.0], [1.0, 5.0]];
    for (i, row) in expect_f.iter().enumerate() {
        for (j, &v) in row.iter().enumerate() {
            assert_eq!(f.get(i, j), Some(Complex64::new(v, 0.0)));
        }
    }
}

#[test]
fn copy_returns_a_correct_copy() {
    for shape in SHAPES {
        let original = sample_dense(shape);
        let copy = original.copy();
        assert_ne!(original.as_ndarray().as_ptr(), copy.as_ndarray().as_ptr());
        assert_eq!(original.as_ndarray(), copy.as_ndarray());
    }
}

#[test]
fn as_ndarray_mut_writes_through() {
    for shape in SHAPES {
        let mut d = sample_dense(shape);
        let unmodified = d.copy();
        d.as_ndarray_mut()[(0, 0)] += Complex64::new(1.0, 0.0);
        let modified = d.copy();
        assert_ne!(d.as_ndarray(), unmodified.as_ndarray());
        assert_eq!(d.as_ndarray(), modified.as_ndarray());
    }
}

#[test]
fn as_ndarray_is_stable() {
    let d = sample_dense((5, 5));
    assert_eq!(d.as_ndarray().as_ptr(), d.as_ndarray().as_ptr());
}

#[test]
fn dense_from_ndarray_does_not_alias_input() {
    for shape in SHAPES {
        let nd = sample(shape);
        let d = Dense::from_array(&nd).unwrap();
        assert_ne!(d.as_ndarray().as_ptr(), nd.as_ptr());
    }
}

#[test]
fn as_ndarray_is_correct_result() {
    for shape in SHAPES {
        let nd = sample(shape);
        let d = Dense::from_array(&nd).unwrap();
        let view = d.as_ndarray();
        assert_eq!(view.ndim(), 2);
        assert_eq!(view.dim(), shape);
        assert_eq!(view, nd.view());
    }
}

#[test]
fn to_array_is_identical_copy() {
    for shape in SHAPES {
        let d = sample_dense(shape);
        let arr = d.to_array();
        assert_eq!(arr.view(), d.as_ndarray());
        assert_ne!(arr.as_ptr(), d.as_ndarray().as_ptr());
        assert!(arr.is_standard_layout());
    }
}

#[test]
fn to_array_of_fortran_is_c_ordered() {
    let d = sample_dense((2, 4)).to_contiguous(true);
    assert!(d.is_fortran());
    let arr = d.to_array();
    assert!(arr.is_standard_layout());
    assert_eq!(arr, sample((2, 4)));
}

#[test]
fn try_from_keeps_fortran_buffer() {
    let f = sample((3, 2)).reversed_axes().as_standard_layout().into_owned().reversed_axes();
    let d = Dense::try_from(f.clone()).unwrap();
    assert!(d.is_fortran());
    assert_eq!(d.as_ndarray(), f.view());
}

#[test]
fn factory_empty() {
    for shape in SHAPES {
        let base = Dense::empty(shape.0, shape.1, false).unwrap();
        assert_eq!(base.shape(), shape);
        assert_eq!(base.as_ndarray().dim(), shape);
    }
}

#[test]
fn factory_zeros() {
    for shape in SHAPES {
        for fortran in [false, true] {
            let base = Dense::zeros(shape.0, shape.1, fortran).unwrap();
            assert_eq!(base.shape(), shape);
            assert_eq!(base.is_fortran(), fortran);
            assert_eq!(count_nonzero(&base.to_array()), 0);
            assert!(base.is_zero());
        }
    }
}

#[test]
fn factory_zero_dimension_fails() {
    assert!(Dense::zeros(0, 3, false).is_err());
    assert!(Dense::identity(0, Complex64::new(1.0, 0.0), false).is_err());
}

#[test]
fn factory_identity() {
    let scales = [
        None,
        Some(Complex64::new(2.0, 0.0)),
        Some(Complex64::new(-0.1, 0.0)),
        Some(Complex64::new(1.5, 0.0)),
        Some(Complex64::new(1.5, 1.0)),
    ];
    for dimension in [1usize, 5, 100] {
        for scale in scales {
            let base = match scale {
                None => Dense::eye(dimension).unwrap(),
                Some(s) => Dense::identity(dimension, s, false).unwrap(),
            };
            let s = scale.unwrap_or(Complex64::new(1.0, 0.0));
            let expected = Array2::from_shape_fn((dimension, dimension), |(i, j)| {
                if i == j {
                    s
                } else {
                    Complex64::new(0.0, 0.0)
                }
            });
            assert_eq!(base.shape(), (dimension, dimension));
            assert_eq!(count_nonzero(&(base.to_array() - &expected)), 0);
        }
    }
}
