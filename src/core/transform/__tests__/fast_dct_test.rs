use crate::core::error::CompressError;
use crate::core::transform::{BlockTransform, FastDct2d, MatrixDct2d, TransformBackend};
use approx::assert_abs_diff_eq;
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn 고속_DCT_기준_구현_일치_테스트() {
    let mut rng = StdRng::seed_from_u64(2024);

    for n in [1, 2, 3, 4, 5, 8, 12, 16, 31, 32] {
        let original = Array2::from_shape_fn((n, n), |_| rng.gen_range(0.0..255.0));
        let reference = MatrixDct2d::new(n).unwrap();
        let fast = FastDct2d::new(n).unwrap();

        let mut expected = original.clone();
        reference.forward(&mut expected).unwrap();
        let mut actual = original.clone();
        fast.forward(&mut actual).unwrap();

        for (e, a) in expected.iter().zip(actual.iter()) {
            assert_abs_diff_eq!(*e, *a, epsilon = 1e-8);
        }

        // 역변환도 같은 정규화
        reference.inverse(&mut expected).unwrap();
        fast.inverse(&mut actual).unwrap();
        for ((e, a), o) in expected.iter().zip(actual.iter()).zip(original.iter()) {
            assert_abs_diff_eq!(*e, *a, epsilon = 1e-8);
            assert_abs_diff_eq!(*a, *o, epsilon = 1e-8);
        }
    }
    println!("✅ rustdct 백엔드가 기저 행렬 구현과 일치");
}

#[test]
fn 고속_DCT_크기_검증_테스트() {
    assert!(matches!(FastDct2d::new(0), Err(CompressError::InvalidSize(0))));

    let fast = FastDct2d::new(8).unwrap();
    let mut wrong = Array2::<f64>::zeros((8, 4));
    assert!(fast.forward(&mut wrong).is_err());
    assert!(fast.inverse(&mut wrong).is_err());
}

#[test]
fn 백엔드_선택_테스트() {
    let matrix = TransformBackend::Matrix.plan(8).unwrap();
    let fast = TransformBackend::Fast.plan(8).unwrap();
    assert_eq!(matrix.size(), 8);
    assert_eq!(fast.size(), 8);

    assert_eq!(TransformBackend::default(), TransformBackend::Matrix);
    assert_eq!("fast".parse::<TransformBackend>(), Ok(TransformBackend::Fast));
    assert_eq!("Matrix".parse::<TransformBackend>(), Ok(TransformBackend::Matrix));
    assert!("fft".parse::<TransformBackend>().is_err());
}
