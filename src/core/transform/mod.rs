//! DCT 변환 - 기저 행렬, 1D/2D 변환, 고속 백엔드

pub mod basis;
pub mod dct1d;
pub mod dct2d;
pub mod fast_dct;

pub use basis::{basis_for, BasisMatrix};
pub use dct1d::{forward_1d, inverse_1d};
pub use dct2d::{
    forward_2d, forward_2d_with, inverse_2d, inverse_2d_with, BlockTransform, MatrixDct2d,
    TransformBackend,
};
pub use fast_dct::FastDct2d;

#[cfg(test)]
mod __tests__;
