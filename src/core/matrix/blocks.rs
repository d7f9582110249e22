//! F×F 블록 분할 / 재조립
//!
//! 높이나 너비가 F의 배수가 아니면 남는 행/열은 버린다 (패딩 없음).

use crate::core::error::{CompressError, ParameterViolation, Result};
use ndarray::{s, Array2, ArrayView2};

/// 블록 그리드 배치 정보
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    /// 세로 방향 블록 수 (H / F)
    pub n_rows: usize,
    /// 가로 방향 블록 수 (W / F)
    pub n_cols: usize,
    pub block_size: usize,
}

impl BlockLayout {
    pub fn new(height: usize, width: usize, block_size: usize) -> Result<Self> {
        if block_size == 0 {
            return Err(ParameterViolation::ZeroBlockSize.into());
        }
        Ok(Self {
            n_rows: height / block_size,
            n_cols: width / block_size,
            block_size,
        })
    }

    pub fn block_count(&self) -> usize {
        self.n_rows * self.n_cols
    }

    /// 재조립된 그리드의 (높이, 너비)
    pub fn output_dims(&self) -> (usize, usize) {
        (self.n_rows * self.block_size, self.n_cols * self.block_size)
    }

    /// 행 우선 순서의 블록 인덱스 → (블록 행, 블록 열).
    /// 블록 개수 이상의 인덱스(블록이 없는 배치 포함)는 None
    pub fn position(&self, index: usize) -> Option<(usize, usize)> {
        if index >= self.block_count() {
            return None;
        }
        Some((index / self.n_cols, index % self.n_cols))
    }
}

/// 그리드를 행 우선 순서의 F×F 블록들로 분할
pub fn partition<T: Clone>(
    grid: ArrayView2<'_, T>,
    block_size: usize,
) -> Result<(Vec<Array2<T>>, BlockLayout)> {
    let layout = BlockLayout::new(grid.nrows(), grid.ncols(), block_size)?;
    let f = block_size;

    let mut blocks = Vec::with_capacity(layout.block_count());
    for i in 0..layout.n_rows {
        for j in 0..layout.n_cols {
            blocks.push(grid.slice(s![i * f..(i + 1) * f, j * f..(j + 1) * f]).to_owned());
        }
    }

    Ok((blocks, layout))
}

/// partition 순서의 블록들을 하나의 그리드로 재조립
pub fn reassemble<T: Clone + Default>(blocks: &[Array2<T>], layout: &BlockLayout) -> Result<Array2<T>> {
    if blocks.len() != layout.block_count() {
        return Err(CompressError::DimensionMismatch {
            expected: layout.block_count(),
            actual: blocks.len(),
        });
    }

    let f = layout.block_size;
    let mut grid = Array2::<T>::default(layout.output_dims());

    for (index, block) in blocks.iter().enumerate() {
        if block.nrows() != f || block.ncols() != f {
            return Err(CompressError::DimensionMismatch {
                expected: f,
                actual: if block.nrows() != f { block.nrows() } else { block.ncols() },
            });
        }
        let (i, j) = layout
            .position(index)
            .ok_or(CompressError::DimensionMismatch {
                expected: layout.block_count(),
                actual: blocks.len(),
            })?;
        grid.slice_mut(s![i * f..(i + 1) * f, j * f..(j + 1) * f])
            .assign(block);
    }

    Ok(grid)
}
