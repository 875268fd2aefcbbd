//! Weighted rotation averaging.

use nalgebra::Rotation3;
use spatia_math::{Mat3, Quat, Tolerance};

use crate::error::{Result, SvdError};
use crate::settings::SvdSettings;
use crate::svd::Svd3Solver;

/// Weighted chordal mean of `rotations`.
///
/// Sums `weights[i] * R(rotations[i])` as 3x3 matrices and projects the sum
/// back onto the nearest rotation with an SVD (`R = U * V^T`). Because `q` and
/// `-q` map to the same matrix, the result does not depend on the sign of
/// the input quaternions.
///
/// Weights are normalized by their absolute sum, so only their ratios
/// matter. A total that cancels to nothing relative to that sum is rejected.
///
/// ```
/// use spatia_math::{Quat, Vec3};
/// use spatia_svd::{weighted_average, Svd3Solver, SvdSettings};
///
/// let a = Quat::from_axis_angle(&Vec3::z_axis(), 0.2);
/// let b = Quat::from_axis_angle(&Vec3::z_axis(), 0.4);
/// let mut solver = Svd3Solver::new();
/// let mean = weighted_average(&[a, b], &[1.0, 1.0], &mut solver, &SvdSettings::default()).unwrap();
/// assert!((mean.angle() - 0.3).abs() < 1e-9);
/// ```
pub fn weighted_average(
    rotations: &[Quat],
    weights: &[f64],
    solver: &mut Svd3Solver,
    settings: &SvdSettings,
) -> Result<Quat> {
    if rotations.is_empty() {
        return Err(SvdError::Empty);
    }
    if rotations.len() != weights.len() {
        return Err(SvdError::MismatchedWeights {
            rotations: rotations.len(),
            weights: weights.len(),
        });
    }
    let total: f64 = weights.iter().sum();
    let scale: f64 = weights.iter().map(|w| w.abs()).sum();
    if !total.is_finite() || total.abs() <= scale * Tolerance::DEFAULT.linear {
        return Err(SvdError::DegenerateWeights(total));
    }

    let mut sum = Mat3::zeros();
    for (q, &w) in rotations.iter().zip(weights) {
        sum += q.to_rotation_matrix().into_inner() * (w / scale);
    }

    let mut svd = solver.decompose(&sum, settings)?;
    let mut r = svd.u * svd.v.transpose();
    if r.determinant() < 0.0 {
        // Nearest proper rotation: flip the weakest axis.
        let weakest = svd.smallest();
        let flipped = -svd.u.column(weakest).into_owned();
        svd.u.set_column(weakest, &flipped);
        r = svd.u * svd.v.transpose();
    }

    let q = Quat::from_rotation_matrix(&Rotation3::from_matrix_unchecked(r));
    Ok(Quat::new_normalize(q.into_inner()))
}
