//! DCT-II 정규직교 기저 행렬
//!
//! 크기 N에만 의존하는 순수 함수이므로 프로세스 수명 동안 크기별로 캐싱한다.

use crate::core::error::{CompressError, Result};
use ndarray::{Array2, ArrayView2};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::f64::consts::PI;
use std::sync::Arc;

// 기저 행렬 캐시 (thread-safe, 무효화 없음)
static BASIS_CACHE: Lazy<RwLock<HashMap<usize, Arc<BasisMatrix>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// N×N 정규직교 DCT 기저. 행 k가 주파수 k의 코사인 기저 벡터
#[derive(Debug, Clone, PartialEq)]
pub struct BasisMatrix {
    matrix: Array2<f64>,
}

impl BasisMatrix {
    /// `D[k][i] = α(k) · cos(kπ(2i+1) / 2N)`
    ///
    /// α(0) = √(1/N), α(k>0) = √(2/N) 로 각 행을 단위 노름으로 맞춘다.
    pub fn build(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(CompressError::InvalidSize(n));
        }

        let n_f = n as f64;
        let alpha_dc = (1.0 / n_f).sqrt();
        let alpha_ac = (2.0 / n_f).sqrt();

        let matrix = Array2::from_shape_fn((n, n), |(k, i)| {
            let alpha = if k == 0 { alpha_dc } else { alpha_ac };
            alpha * (k as f64 * PI * (2 * i + 1) as f64 / (2.0 * n_f)).cos()
        });

        Ok(Self { matrix })
    }

    pub fn size(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.matrix.view()
    }

    /// 기저 행 k, 열 i 값
    pub fn get(&self, k: usize, i: usize) -> Option<f64> {
        self.matrix.get((k, i)).copied()
    }
}

/// 캐시된 기저 반환 (최초 요청 시 생성)
pub fn basis_for(n: usize) -> Result<Arc<BasisMatrix>> {
    if let Some(basis) = BASIS_CACHE.read().get(&n) {
        return Ok(Arc::clone(basis));
    }

    let mut cache = BASIS_CACHE.write();
    // 쓰기 락 대기 중 다른 스레드가 먼저 채웠을 수 있음
    if let Some(basis) = cache.get(&n) {
        return Ok(Arc::clone(basis));
    }

    let basis = Arc::new(BasisMatrix::build(n)?);
    log::trace!("DCT 기저 생성: {}x{}", n, n);
    cache.insert(n, Arc::clone(&basis));
    Ok(basis)
}
