//! 그리드 블록 DCT 압축기
//!
//! 블록마다 순방향 2D DCT → 대각 컷오프 절단 → 역변환 → 반올림/클리핑.
//! 블록 간 공유 상태가 없으므로 rayon으로 병렬 처리한다.

use super::config::{CompressionConfig, CompressionParams};
use crate::core::error::Result;
use crate::core::matrix::{mean_squared_error, psnr, PixelGrid};
use crate::core::transform::BlockTransform;
use ndarray::{Array2, ArrayView2};
use rayon::prelude::*;
use std::sync::Arc;

/// `i + j ≥ cutoff` 인 계수를 모두 0으로
pub fn truncate_coefficients(coeffs: &mut Array2<f64>, cutoff: usize) {
    for ((i, j), c) in coeffs.indexed_iter_mut() {
        if i + j >= cutoff {
            *c = 0.0;
        }
    }
}

/// 변환 → 절단 → 역변환 (양자화 전 실수 복원값)
pub fn reconstruct_block(
    block: ArrayView2<'_, f64>,
    transform: &dyn BlockTransform,
    cutoff: usize,
) -> Result<Array2<f64>> {
    let mut coeffs = block.to_owned();
    transform.forward(&mut coeffs)?;
    truncate_coefficients(&mut coeffs, cutoff);
    transform.inverse(&mut coeffs)?;
    Ok(coeffs)
}

/// 최근접 정수 반올림 (동률은 짝수 쪽) 후 [0, 255] 클리핑
pub fn quantize_sample(value: f64) -> u8 {
    value.round_ties_even().clamp(0.0, 255.0) as u8
}

pub fn quantize_block(block: &Array2<f64>) -> Array2<u8> {
    block.mapv(quantize_sample)
}

/// 압축 결과 요약
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionReport {
    /// 입력 (높이, 너비)
    pub input_dims: (usize, usize),
    /// 출력 (높이, 너비). F의 배수로 잘린 크기
    pub output_dims: (usize, usize),
    pub block_rows: usize,
    pub block_cols: usize,
    pub block_size: usize,
    pub cutoff: usize,
    pub retained_per_block: usize,
    /// 잘린 입력 대비 출력의 MSE
    pub mse: f64,
    pub psnr: f64,
}

impl CompressionReport {
    /// 블록당 유지 계수 비율
    pub fn retained_ratio(&self) -> f64 {
        let total = self.block_size * self.block_size;
        if total == 0 {
            0.0
        } else {
            self.retained_per_block as f64 / total as f64
        }
    }

    pub fn print_report(&self) {
        println!("=== 압축 보고서 ===");
        println!("입력 크기: {}x{}", self.input_dims.1, self.input_dims.0);
        println!("출력 크기: {}x{}", self.output_dims.1, self.output_dims.0);
        println!(
            "블록: {}x{} 개 ({}x{} 픽셀)",
            self.block_cols, self.block_rows, self.block_size, self.block_size
        );
        println!(
            "컷오프 d = {} → 블록당 계수 {}/{} ({:.1}%)",
            self.cutoff,
            self.retained_per_block,
            self.block_size * self.block_size,
            self.retained_ratio() * 100.0
        );
        println!("MSE: {:.4}", self.mse);
        println!("PSNR: {:.2} dB", self.psnr);
    }
}

/// 블록 DCT 압축기. 생성 시 파라미터를 검증하고 변환기를 준비한다
pub struct GridCompressor {
    params: CompressionParams,
    parallel: bool,
    transform: Arc<dyn BlockTransform>,
}

impl GridCompressor {
    pub fn new(config: &CompressionConfig) -> Result<Self> {
        let params = config.params()?;
        let transform = config.backend.plan(params.block_size())?;
        Ok(Self {
            params,
            parallel: config.parallel,
            transform,
        })
    }

    pub fn params(&self) -> CompressionParams {
        self.params
    }

    fn compress_block(&self, block: &Array2<u8>) -> Result<Array2<u8>> {
        let samples = block.mapv(f64::from);
        let restored = reconstruct_block(samples.view(), self.transform.as_ref(), self.params.cutoff())?;
        Ok(quantize_block(&restored))
    }

    /// 입력을 건드리지 않고 새 그리드를 반환
    pub fn compress(&self, grid: &PixelGrid) -> Result<PixelGrid> {
        let f = self.params.block_size();
        let (blocks, layout) = grid.partition(f)?;

        let (out_h, out_w) = layout.output_dims();
        log::debug!(
            "{}x{} 그리드 → {}x{} 블록 (F = {}, d = {})",
            grid.width(),
            grid.height(),
            layout.n_cols,
            layout.n_rows,
            f,
            self.params.cutoff()
        );
        if out_h != grid.height() || out_w != grid.width() {
            log::debug!(
                "나머지 제거: {}행, {}열",
                grid.height() - out_h,
                grid.width() - out_w
            );
        }

        let compressed: Vec<Array2<u8>> = if self.parallel {
            blocks
                .par_iter()
                .map(|block| self.compress_block(block))
                .collect::<Result<_>>()?
        } else {
            blocks
                .iter()
                .map(|block| self.compress_block(block))
                .collect::<Result<_>>()?
        };

        PixelGrid::reassemble(&compressed, &layout)
    }

    /// 압축과 함께 품질 보고서 생성
    pub fn compress_with_report(&self, grid: &PixelGrid) -> Result<(PixelGrid, CompressionReport)> {
        let output = self.compress(grid)?;
        let reference = grid.crop_to_blocks(self.params.block_size())?;
        let mse = mean_squared_error(&reference, &output)?;
        let f = self.params.block_size();

        let report = CompressionReport {
            input_dims: (grid.height(), grid.width()),
            output_dims: (output.height(), output.width()),
            block_rows: output.height() / f,
            block_cols: output.width() / f,
            block_size: f,
            cutoff: self.params.cutoff(),
            retained_per_block: self.params.retained_per_block(),
            mse,
            psnr: psnr(mse),
        };
        Ok((output, report))
    }
}

/// F×F 블록, 컷오프 d로 그리드 압축 (기저 행렬 백엔드, 병렬)
pub fn compress(grid: &PixelGrid, block_size: usize, cutoff: usize) -> Result<PixelGrid> {
    GridCompressor::new(&CompressionConfig::with_cutoff(block_size, cutoff))?.compress(grid)
}
