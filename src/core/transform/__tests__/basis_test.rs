use crate::core::error::CompressError;
use crate::core::transform::{basis_for, BasisMatrix};
use approx::assert_abs_diff_eq;
use std::sync::Arc;

#[test]
fn 기저_직교성_테스트() {
    for n in 1..=64 {
        let basis = BasisMatrix::build(n).unwrap();
        let d = basis.view();
        let product = d.dot(&d.t());

        for ((i, j), &value) in product.indexed_iter() {
            let expected = if i == j { 1.0 } else { 0.0 };
            assert_abs_diff_eq!(value, expected, epsilon = 1e-9);
        }
    }
    println!("✅ N = 1..=64 에서 D·Dᵗ = I");
}

#[test]
fn 기저_알려진_값_테스트() {
    let basis = BasisMatrix::build(2).unwrap();
    let half_sqrt2 = std::f64::consts::FRAC_1_SQRT_2;

    assert_abs_diff_eq!(basis.get(0, 0).unwrap(), half_sqrt2, epsilon = 1e-12);
    assert_abs_diff_eq!(basis.get(0, 1).unwrap(), half_sqrt2, epsilon = 1e-12);
    assert_abs_diff_eq!(basis.get(1, 0).unwrap(), half_sqrt2, epsilon = 1e-12);
    assert_abs_diff_eq!(basis.get(1, 1).unwrap(), -half_sqrt2, epsilon = 1e-12);
    assert!(basis.get(2, 0).is_none());

    // N = 1 은 [[1]]
    let single = BasisMatrix::build(1).unwrap();
    assert_eq!(single.size(), 1);
    assert_abs_diff_eq!(single.get(0, 0).unwrap(), 1.0, epsilon = 1e-15);
}

#[test]
fn 기저_DC_행_상수_테스트() {
    let n = 8;
    let basis = BasisMatrix::build(n).unwrap();
    let dc = (1.0 / n as f64).sqrt();
    for i in 0..n {
        assert_abs_diff_eq!(basis.get(0, i).unwrap(), dc, epsilon = 1e-15);
    }
}

#[test]
fn 기저_결정성_테스트() {
    let a = BasisMatrix::build(16).unwrap();
    let b = BasisMatrix::build(16).unwrap();
    // 비트 단위로 동일
    assert_eq!(a, b);
}

#[test]
fn 기저_크기_0_에러_테스트() {
    assert_eq!(BasisMatrix::build(0), Err(CompressError::InvalidSize(0)));
    assert!(matches!(basis_for(0), Err(CompressError::InvalidSize(0))));
}

#[test]
fn 기저_캐시_재사용_테스트() {
    let first = basis_for(12).unwrap();
    let second = basis_for(12).unwrap();
    assert!(Arc::ptr_eq(&first, &second), "같은 N에 대해 같은 기저를 반환해야 함");
    assert_eq!(*first, BasisMatrix::build(12).unwrap());

    let other = basis_for(13).unwrap();
    assert_eq!(other.size(), 13);
}

#[test]
fn 기저_캐시_동시_접근_테스트() {
    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(|| basis_for(24).unwrap()))
        .collect();
    let bases: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    for basis in &bases[1..] {
        assert!(Arc::ptr_eq(&bases[0], basis));
    }
}
