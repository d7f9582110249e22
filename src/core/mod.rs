//! # 블록 DCT 압축 핵심 모듈
//!
//! 기저 생성 → 1D/2D 변환 → 블록 분할 → 블록별 압축 파이프라인

pub mod encoder;
pub mod error;
pub mod matrix;
pub mod transform;

// 주요 타입들 재수출
pub use encoder::*;
pub use error::{CompressError, ParameterViolation, Result};
pub use matrix::*;
pub use transform::*;
