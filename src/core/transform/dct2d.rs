//! 분리 가능한 2차원 DCT
//!
//! 열마다 1D DCT를 적용한 뒤 그 결과의 행마다 1D DCT를 적용한다.
//! 기저 행렬 곱 방식이므로 N×N 블록당 O(N³)이다. rustdct 기반의
//! O(N² log N) 구현은 [`super::fast_dct`]에 있으며 계수 순서와 정규화가
//! 같아야 한다. 기본 백엔드는 이 행렬 곱 구현이다.

use super::basis::{basis_for, BasisMatrix};
use super::dct1d::{forward_1d, inverse_1d};
use super::fast_dct::FastDct2d;
use crate::core::error::{CompressError, Result};
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 블록 변환 백엔드 공통 인터페이스 (제자리 변환)
pub trait BlockTransform: Send + Sync {
    /// 처리 가능한 블록 한 변의 길이
    fn size(&self) -> usize;

    fn forward(&self, block: &mut Array2<f64>) -> Result<()>;

    fn inverse(&self, coeffs: &mut Array2<f64>) -> Result<()>;
}

/// 변환 백엔드 선택
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformBackend {
    /// 기저 행렬 곱, O(N³)
    #[default]
    Matrix,
    /// rustdct, O(N² log N)
    Fast,
}

impl TransformBackend {
    /// 크기 n 블록용 변환기 생성
    pub fn plan(self, n: usize) -> Result<Arc<dyn BlockTransform>> {
        match self {
            TransformBackend::Matrix => Ok(Arc::new(MatrixDct2d::new(n)?)),
            TransformBackend::Fast => Ok(Arc::new(FastDct2d::new(n)?)),
        }
    }
}

impl std::str::FromStr for TransformBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "matrix" | "naive" => Ok(TransformBackend::Matrix),
            "fast" => Ok(TransformBackend::Fast),
            other => Err(format!("unknown transform backend: {}", other)),
        }
    }
}

pub(crate) fn check_square(shape: &[usize], n: usize) -> Result<()> {
    let (rows, cols) = (shape[0], shape[1]);
    if rows != cols {
        return Err(CompressError::DimensionMismatch {
            expected: rows,
            actual: cols,
        });
    }
    if rows != n {
        return Err(CompressError::DimensionMismatch {
            expected: n,
            actual: rows,
        });
    }
    Ok(())
}

/// 주어진 기저로 2D 순방향 변환 (열 → 행)
pub fn forward_2d_with(basis: &BasisMatrix, m: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
    check_square(m.shape(), basis.size())?;

    let mut c = m.to_owned();
    for mut col in c.columns_mut() {
        let transformed = forward_1d(col.view(), Some(basis))?;
        col.assign(&transformed);
    }
    for mut row in c.rows_mut() {
        let transformed = forward_1d(row.view(), Some(basis))?;
        row.assign(&transformed);
    }
    Ok(c)
}

/// 주어진 기저로 2D 역변환 (열 → 행, 순방향과 같은 순서)
pub fn inverse_2d_with(basis: &BasisMatrix, c: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
    check_square(c.shape(), basis.size())?;

    let mut f = c.to_owned();
    for mut col in f.columns_mut() {
        let restored = inverse_1d(col.view(), Some(basis))?;
        col.assign(&restored);
    }
    for mut row in f.rows_mut() {
        let restored = inverse_1d(row.view(), Some(basis))?;
        row.assign(&restored);
    }
    Ok(f)
}

/// 2D 순방향 변환. 기저는 캐시에서 한 번만 가져와 모든 행/열에 재사용
pub fn forward_2d(m: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
    check_square(m.shape(), m.nrows())?;
    let basis = basis_for(m.nrows())?;
    forward_2d_with(&basis, m)
}

/// 2D 역변환
pub fn inverse_2d(c: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
    check_square(c.shape(), c.nrows())?;
    let basis = basis_for(c.nrows())?;
    inverse_2d_with(&basis, c)
}

/// 기저 행렬 곱 기반 2D DCT
#[derive(Debug, Clone)]
pub struct MatrixDct2d {
    basis: Arc<BasisMatrix>,
}

impl MatrixDct2d {
    pub fn new(n: usize) -> Result<Self> {
        Ok(Self { basis: basis_for(n)? })
    }
}

impl BlockTransform for MatrixDct2d {
    fn size(&self) -> usize {
        self.basis.size()
    }

    fn forward(&self, block: &mut Array2<f64>) -> Result<()> {
        *block = forward_2d_with(&self.basis, block.view())?;
        Ok(())
    }

    fn inverse(&self, coeffs: &mut Array2<f64>) -> Result<()> {
        *coeffs = inverse_2d_with(&self.basis, coeffs.view())?;
        Ok(())
    }
}
