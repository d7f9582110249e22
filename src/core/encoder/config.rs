//! # 압축 설정
//!
//! 블록 크기 F, 대각 컷오프 d, 변환 백엔드, 병렬 여부

use crate::core::error::{ParameterViolation, Result};
use crate::core::transform::TransformBackend;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 검증을 통과한 압축 파라미터. 불변식: F ≥ 1, 0 ≤ d ≤ 2F-2
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionParams {
    block_size: usize,
    cutoff: usize,
}

impl CompressionParams {
    pub fn new(block_size: usize, cutoff: usize) -> Result<Self> {
        if block_size == 0 {
            return Err(ParameterViolation::ZeroBlockSize.into());
        }
        let max = max_cutoff(block_size);
        if cutoff > max {
            return Err(ParameterViolation::CutoffOutOfRange { cutoff, max }.into());
        }
        Ok(Self { block_size, cutoff })
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn cutoff(&self) -> usize {
        self.cutoff
    }

    /// 블록당 남는 계수 개수
    pub fn retained_per_block(&self) -> usize {
        retained_coefficients(self.block_size, self.cutoff)
    }
}

/// 허용되는 최대 컷오프 (2F-2, F×F 블록의 최대 인덱스 합).
///
/// `i + j ≥ d` 규칙상 이 값에서도 (F-1, F-1) 계수 하나는 제거된다.
pub fn max_cutoff(block_size: usize) -> usize {
    2 * block_size.saturating_sub(1)
}

/// i + j < d 를 만족하는 (i, j) 위치 개수
pub fn retained_coefficients(block_size: usize, cutoff: usize) -> usize {
    (0..block_size)
        .map(|i| cutoff.saturating_sub(i).min(block_size))
        .sum()
}

/// 압축 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    pub block_size: usize,
    pub cutoff: usize,
    pub backend: TransformBackend,
    /// rayon으로 블록 병렬 처리
    pub parallel: bool,
}

impl Default for CompressionConfig {
    /// 8×8 블록, d = 14
    fn default() -> Self {
        Self::finest(8)
    }
}

impl CompressionConfig {
    pub fn with_cutoff(block_size: usize, cutoff: usize) -> Self {
        Self {
            block_size,
            cutoff,
            backend: TransformBackend::Matrix,
            parallel: true,
        }
    }

    /// 허용 범위에서 가장 약한 압축 (d = 2F-2)
    pub fn finest(block_size: usize) -> Self {
        Self::with_cutoff(block_size, max_cutoff(block_size))
    }

    /// DC 계수만 유지 (블록 평균만 남음)
    pub fn dc_only(block_size: usize) -> Self {
        Self::with_cutoff(block_size, 1)
    }

    pub fn backend(mut self, backend: TransformBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn params(&self) -> Result<CompressionParams> {
        CompressionParams::new(self.block_size, self.cutoff)
    }

    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("failed to parse compression config")
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json_str(&json)
    }
}
