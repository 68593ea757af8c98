//! Spectral partitioning of a signed Laplacian.
//!
//! The partition signal is the left singular vector paired with the smallest singular value.
//! Singular values are magnitudes, so for an indefinite Laplacian this is the smallest-magnitude
//! eigenmode rather than the smallest signed eigenvalue.

use nalgebra::linalg::SVD;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::laplacian::SignedLaplacian;
use crate::options::DEFAULT_DECIMAL_PRECISION;

/// Digits of the fixed representation applied after precision rounding.
const FIXED_DIGITS: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralOptions {
    /// Decimal digits kept when rounding the normalized vector.
    pub decimal_precision: u32,
    /// Convergence tolerance handed to the SVD.
    pub epsilon: f64,
    /// SVD iteration cap; `0` iterates until convergence.
    pub max_iterations: usize,
}

impl Default for SpectralOptions {
    fn default() -> Self {
        Self {
            decimal_precision: DEFAULT_DECIMAL_PRECISION,
            epsilon: f64::EPSILON,
            max_iterations: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectralResult {
    pub eigenvalue: f64,
    /// Normalized to `[-1, 1]`, indexed by node id.
    pub eigenvector: Vec<f64>,
}

pub fn partition(laplacian: &SignedLaplacian, opts: &SpectralOptions) -> Result<SpectralResult> {
    let n = laplacian.dim();
    if n == 0 {
        return Err(Error::EmptyGraph);
    }

    let svd = SVD::try_new(
        laplacian.matrix().clone(),
        true,
        false,
        opts.epsilon,
        opts.max_iterations,
    )
    .ok_or_else(|| Error::decomposition("SVD did not converge"))?;

    let singular = &svd.singular_values;
    tracing::trace!(singular_values = ?singular.as_slice(), "svd finished");
    if singular.iter().any(|s| !s.is_finite()) {
        return Err(Error::decomposition("SVD produced non-finite singular values"));
    }

    let u = svd
        .u
        .ok_or_else(|| Error::decomposition("SVD did not return left singular vectors"))?;

    let index = min_index(singular.as_slice())
        .ok_or_else(|| Error::invariant("SVD returned no singular values"))?;
    let eigenvalue = singular[index];

    let mut eigenvector: Vec<f64> = u.column(index).iter().copied().collect();
    if eigenvector.len() != n {
        return Err(Error::invariant(format!(
            "eigenvector has length {}, expected {n}",
            eigenvector.len()
        )));
    }
    if eigenvector.iter().any(|v| !v.is_finite()) {
        return Err(Error::decomposition("SVD produced a non-finite singular vector"));
    }

    normalize(&mut eigenvector, opts.decimal_precision);

    tracing::debug!(nodes = n, index, eigenvalue, "selected minimum singular value");

    Ok(SpectralResult {
        eigenvalue,
        eigenvector,
    })
}

/// First index of the minimum value.
fn min_index(values: &[f64]) -> Option<usize> {
    let mut it = values.iter().enumerate();
    let (mut best, mut best_value) = it.next().map(|(i, &v)| (i, v))?;
    for (i, &v) in it {
        if v < best_value {
            best = i;
            best_value = v;
        }
    }
    Some(best)
}

/// Scales by the largest absolute component, then rounds each component.
fn normalize(vector: &mut [f64], decimal_precision: u32) {
    let max_abs = vector.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    let divisor = if max_abs == 0.0 { 1.0 } else { max_abs };

    for v in vector.iter_mut() {
        let rounded = round_half_up(*v / divisor, decimal_precision);
        *v = round_half_up(rounded, FIXED_DIGITS);
    }
}

/// Rounds to `digits` decimals with ties toward positive infinity. `-0.0` becomes `0.0` so equal
/// coordinates compare and hash identically.
pub(crate) fn round_half_up(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits.min(i32::MAX as u32) as i32);
    if !factor.is_finite() {
        return value;
    }
    let r = (value * factor + 0.5).floor() / factor;
    if r == 0.0 { 0.0 } else { r }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::parse_edge_list;

    fn laplacian_of(text: &str) -> SignedLaplacian {
        let g = parse_edge_list(text).expect("parse");
        SignedLaplacian::build(g.node_count(), &g.edges).expect("laplacian")
    }

    #[test]
    fn min_index_prefers_first_occurrence() {
        assert_eq!(min_index(&[3.0, 1.0, 2.0, 1.0]), Some(1));
        assert_eq!(min_index(&[0.5]), Some(0));
        assert_eq!(min_index(&[]), None);
    }

    #[test]
    fn round_half_up_matches_fixed_decimal_rounding() {
        assert_eq!(round_half_up(0.123_456_78, 7), 0.123_456_8);
        assert_eq!(round_half_up(-2.5, 0), -2.0);
        assert_eq!(round_half_up(2.5, 0), 3.0);
        assert!(round_half_up(-1e-12, 7).is_sign_positive());
    }

    #[test]
    fn normalize_scales_by_largest_magnitude() {
        let mut v = vec![0.5, -0.25, 0.0];
        normalize(&mut v, DEFAULT_DECIMAL_PRECISION);
        assert_eq!(v, vec![1.0, -0.5, 0.0]);

        let mut zeros = vec![0.0, 0.0];
        normalize(&mut zeros, DEFAULT_DECIMAL_PRECISION);
        assert_eq!(zeros, vec![0.0, 0.0]);
    }

    #[test]
    fn balanced_path_splits_by_sign() {
        // 0 +-- 1 --- 2: balanced, so the null vector is (1, 1, -1) up to sign.
        let l = laplacian_of("0,1,1,1,1\n1,2,-1,1,2\n");
        let r = partition(&l, &SpectralOptions::default()).expect("partition");

        assert_eq!(r.eigenvector.len(), 3);
        assert!(r.eigenvalue.is_finite());
        assert!(r.eigenvalue.abs() < 1e-9, "eigenvalue: {}", r.eigenvalue);

        let v = &r.eigenvector;
        assert_eq!(v[0], v[1]);
        assert_eq!(v[0], -v[2]);
        assert_eq!(v[0].abs(), 1.0);
    }

    #[test]
    fn default_precision_matches_analysis_default() {
        assert_eq!(
            SpectralOptions::default().decimal_precision,
            DEFAULT_DECIMAL_PRECISION
        );
    }

    #[test]
    fn max_abs_component_is_one() {
        let l = laplacian_of("0,1,-1,0,0\n1,2,-1,0,0\n2,0,-1,0,0\n2,3,1,0,0\n");
        let r = partition(&l, &SpectralOptions::default()).expect("partition");
        let max_abs = r.eigenvector.iter().fold(0.0_f64, |a, v| a.max(v.abs()));
        assert_eq!(max_abs, 1.0);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let l = laplacian_of("0,1,1,0,0\n1,2,-1,0,0\n2,3,1,0,0\n3,0,-1,0,0\n0,2,1,0,0\n");
        let a = partition(&l, &SpectralOptions::default()).expect("partition");
        let b = partition(&l, &SpectralOptions::default()).expect("partition");
        assert_eq!(a, b);
    }
}
