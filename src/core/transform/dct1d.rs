//! 1차원 DCT (기저 행렬 곱)

use super::basis::{basis_for, BasisMatrix};
use crate::core::error::{CompressError, Result};
use ndarray::{Array1, ArrayView1};
use std::sync::Arc;

/// 기저가 주어지면 크기를 검증하고, 없으면 캐시에서 가져온다
fn resolve_basis(len: usize, basis: Option<&BasisMatrix>) -> Result<ResolvedBasis<'_>> {
    match basis {
        Some(basis) if basis.size() != len => Err(CompressError::DimensionMismatch {
            expected: basis.size(),
            actual: len,
        }),
        Some(basis) => Ok(ResolvedBasis::Borrowed(basis)),
        None => Ok(ResolvedBasis::Cached(basis_for(len)?)),
    }
}

enum ResolvedBasis<'a> {
    Borrowed(&'a BasisMatrix),
    Cached(Arc<BasisMatrix>),
}

impl ResolvedBasis<'_> {
    fn get(&self) -> &BasisMatrix {
        match self {
            ResolvedBasis::Borrowed(basis) => basis,
            ResolvedBasis::Cached(basis) => basis,
        }
    }
}

/// 순방향 변환 `c = D · f`
pub fn forward_1d(samples: ArrayView1<'_, f64>, basis: Option<&BasisMatrix>) -> Result<Array1<f64>> {
    let resolved = resolve_basis(samples.len(), basis)?;
    Ok(resolved.get().view().dot(&samples))
}

/// 역변환 `f = Dᵗ · c` (D가 직교이므로 D⁻¹ = Dᵗ)
pub fn inverse_1d(coeffs: ArrayView1<'_, f64>, basis: Option<&BasisMatrix>) -> Result<Array1<f64>> {
    let resolved = resolve_basis(coeffs.len(), basis)?;
    Ok(resolved.get().view().t().dot(&coeffs))
}
