//! blockdct - JPEG 방식 블록 DCT 손실 압축 라이브러리
//!
//! 단일 채널 이미지를 F×F 블록으로 나누고, 정규직교 DCT로 변환한 뒤
//! 인덱스 합 `i + j ≥ d` 인 고주파 계수를 버리고 역변환한다.
//! 엔트로피 코딩과 양자화 테이블은 없다.
//!
//! ```no_run
//! use blockdct::{compress, PixelGrid};
//!
//! # fn main() -> Result<(), blockdct::CompressError> {
//! let grid = PixelGrid::filled(64, 64, 128);
//! let compressed = compress(&grid, 8, 4)?;
//! assert_eq!(compressed.width(), 64);
//! # Ok(())
//! # }
//! ```

pub mod core;

// 핵심 모듈들 재수출
pub use crate::core::{
    // 에러
    CompressError, ParameterViolation, Result,
    // 데이터
    PixelGrid, BlockLayout, BasisMatrix,
    // 변환
    BlockTransform, TransformBackend, MatrixDct2d, FastDct2d,
    basis_for, forward_1d, inverse_1d, forward_2d, inverse_2d,
    // 압축
    compress, CompressionConfig, CompressionParams, CompressionReport, GridCompressor,
};
