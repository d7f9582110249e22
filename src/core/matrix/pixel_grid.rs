//! 단일 채널 8비트 픽셀 그리드

use super::blocks::{partition, reassemble, BlockLayout};
use crate::core::error::{CompressError, Result};
use ndarray::{s, Array2, ArrayView2};

/// H×W 단일 채널 명도 그리드 (값 범위 [0, 255])
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    pixels: Array2<u8>,
}

impl PixelGrid {
    /// 행 우선 원시 버퍼로부터 생성
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let expected = width * height;
        if data.len() != expected {
            return Err(CompressError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        let pixels = Array2::from_shape_vec((height, width), data).map_err(|_| {
            CompressError::BufferSizeMismatch {
                expected,
                actual: expected,
            }
        })?;
        Ok(Self { pixels })
    }

    pub fn from_array(pixels: Array2<u8>) -> Self {
        Self { pixels }
    }

    /// 모든 픽셀이 같은 값인 그리드
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            pixels: Array2::from_elem((height, width), value),
        }
    }

    pub fn width(&self) -> usize {
        self.pixels.ncols()
    }

    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.pixels.get((row, col)).copied()
    }

    pub fn as_array(&self) -> ArrayView2<'_, u8> {
        self.pixels.view()
    }

    /// 행 우선 원시 버퍼로 변환
    pub fn into_raw(self) -> Vec<u8> {
        if self.pixels.is_standard_layout() {
            self.pixels.into_raw_vec()
        } else {
            self.pixels.iter().copied().collect()
        }
    }

    /// F의 배수가 되는 좌상단 영역만 남긴 복사본
    pub fn crop_to_blocks(&self, block_size: usize) -> Result<Self> {
        let layout = BlockLayout::new(self.height(), self.width(), block_size)?;
        let (h, w) = layout.output_dims();
        Ok(Self {
            pixels: self.pixels.slice(s![..h, ..w]).to_owned(),
        })
    }

    /// F×F 블록 분할
    pub fn partition(&self, block_size: usize) -> Result<(Vec<Array2<u8>>, BlockLayout)> {
        partition(self.pixels.view(), block_size)
    }

    /// 블록 재조립
    pub fn reassemble(blocks: &[Array2<u8>], layout: &BlockLayout) -> Result<Self> {
        Ok(Self {
            pixels: reassemble(blocks, layout)?,
        })
    }
}
