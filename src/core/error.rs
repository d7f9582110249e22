//! 압축 엔진 에러 타입
//!
//! 모든 에러는 해당 압축 호출을 즉시 종료시킨다. 부분 결과는 없다.

use thiserror::Error;

/// 압축 엔진 결과 타입
pub type Result<T> = std::result::Result<T, CompressError>;

/// 압축 파라미터 위반 사유
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterViolation {
    /// 블록 크기 F가 0
    #[error("block size F must be a positive integer")]
    ZeroBlockSize,
    /// 대각 컷오프 d가 [0, 2F-2] 밖
    #[error("cutoff d = {cutoff} must be in [0, {max}]")]
    CutoffOutOfRange { cutoff: usize, max: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompressError {
    #[error("Invalid basis size: {0} (must be positive)")]
    InvalidSize(usize),

    #[error("Invalid compression parameter: {0}")]
    InvalidParameter(ParameterViolation),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Pixel buffer size mismatch: expected {expected}, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },
}

impl From<ParameterViolation> for CompressError {
    fn from(violation: ParameterViolation) -> Self {
        CompressError::InvalidParameter(violation)
    }
}
