//! rustdct 기반 고속 2D DCT, O(N² log N)
//!
//! rustdct의 DCT-II/DCT-III는 정규화되지 않은 형태이므로 기저 행렬 구현과
//! 같은 정규직교 스케일로 맞춘다.

use super::dct2d::{check_square, BlockTransform};
use crate::core::error::{CompressError, Result};
use ndarray::{Array2, ArrayViewMut1};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use rustdct::{DctPlanner, TransformType2And3};
use std::collections::HashMap;
use std::sync::Arc;

type DctPlan = Arc<dyn TransformType2And3<f64>>;

// 크기별 DCT 플랜 캐시
static PLAN_CACHE: Lazy<RwLock<HashMap<usize, DctPlan>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

fn plan_for(n: usize) -> DctPlan {
    if let Some(plan) = PLAN_CACHE.read().get(&n) {
        return Arc::clone(plan);
    }

    let mut cache = PLAN_CACHE.write();
    let plan = cache
        .entry(n)
        .or_insert_with(|| {
            log::trace!("rustdct 플랜 생성: {}", n);
            DctPlanner::new().plan_dct2(n)
        });
    Arc::clone(plan)
}

/// 고속 2D DCT (기저 행렬 구현과 같은 정규화)
pub struct FastDct2d {
    n: usize,
    plan: DctPlan,
    alpha_dc: f64,
    alpha_ac: f64,
}

impl FastDct2d {
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(CompressError::InvalidSize(n));
        }
        let n_f = n as f64;
        Ok(Self {
            n,
            plan: plan_for(n),
            alpha_dc: (1.0 / n_f).sqrt(),
            alpha_ac: (2.0 / n_f).sqrt(),
        })
    }

    fn forward_lane(&self, mut lane: ArrayViewMut1<'_, f64>, buffer: &mut [f64]) {
        for (dst, src) in buffer.iter_mut().zip(lane.iter()) {
            *dst = *src;
        }
        self.plan.process_dct2(buffer);

        for (k, (dst, src)) in lane.iter_mut().zip(buffer.iter()).enumerate() {
            let alpha = if k == 0 { self.alpha_dc } else { self.alpha_ac };
            *dst = alpha * src;
        }
    }

    fn inverse_lane(&self, mut lane: ArrayViewMut1<'_, f64>, buffer: &mut [f64]) {
        // DCT-III는 x[0]/2 를 더하므로 DC 항에 2를 곱해 보정
        for (k, (dst, src)) in buffer.iter_mut().zip(lane.iter()).enumerate() {
            *dst = if k == 0 {
                2.0 * self.alpha_dc * src
            } else {
                self.alpha_ac * src
            };
        }
        self.plan.process_dct3(buffer);

        for (dst, src) in lane.iter_mut().zip(buffer.iter()) {
            *dst = *src;
        }
    }
}

impl BlockTransform for FastDct2d {
    fn size(&self) -> usize {
        self.n
    }

    fn forward(&self, block: &mut Array2<f64>) -> Result<()> {
        check_square(block.shape(), self.n)?;
        let mut buffer = vec![0.0; self.n];
        for col in block.columns_mut() {
            self.forward_lane(col, &mut buffer);
        }
        for row in block.rows_mut() {
            self.forward_lane(row, &mut buffer);
        }
        Ok(())
    }

    fn inverse(&self, coeffs: &mut Array2<f64>) -> Result<()> {
        check_square(coeffs.shape(), self.n)?;
        let mut buffer = vec![0.0; self.n];
        for col in coeffs.columns_mut() {
            self.inverse_lane(col, &mut buffer);
        }
        for row in coeffs.rows_mut() {
            self.inverse_lane(row, &mut buffer);
        }
        Ok(())
    }
}
