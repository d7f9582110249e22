//! 복원 품질 지표 (MSE, PSNR)

use super::pixel_grid::PixelGrid;
use crate::core::error::{CompressError, Result};

/// 8비트 최대 픽셀 값
pub const MAX_PIXEL: f64 = 255.0;

/// 두 그리드의 평균 제곱 오차. 크기가 다르면 DimensionMismatch
pub fn mean_squared_error(reference: &PixelGrid, approximation: &PixelGrid) -> Result<f64> {
    if reference.height() != approximation.height() {
        return Err(CompressError::DimensionMismatch {
            expected: reference.height(),
            actual: approximation.height(),
        });
    }
    if reference.width() != approximation.width() {
        return Err(CompressError::DimensionMismatch {
            expected: reference.width(),
            actual: approximation.width(),
        });
    }
    if reference.is_empty() {
        return Ok(0.0);
    }

    let sum: f64 = reference
        .as_array()
        .iter()
        .zip(approximation.as_array().iter())
        .map(|(&r, &a)| {
            let diff = r as f64 - a as f64;
            diff * diff
        })
        .sum();

    Ok(sum / reference.as_array().len() as f64)
}

/// 피크 신호 대 잡음비 (dB). 오차가 없으면 무한대
pub fn psnr(mse: f64) -> f64 {
    if mse <= 0.0 {
        f64::INFINITY
    } else {
        10.0 * (MAX_PIXEL * MAX_PIXEL / mse).log10()
    }
}

