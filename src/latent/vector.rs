use crate::foundation::error::{StrokeposeError, StrokeposeResult};

/// Below this, `1 - cos(omega)` is treated as parallel and slerp degrades to lerp.
pub const SLERP_EPSILON: f64 = 1e-6;

pub(crate) fn check_dims(a: &[f64], b: &[f64]) -> StrokeposeResult<()> {
    if a.len() != b.len() {
        return Err(StrokeposeError::validation(format!(
            "vector dimension mismatch: {} vs {}",
            a.len(),
            b.len()
        )));
    }
    Ok(())
}

/// Dot product. Caller guarantees equal lengths.
pub(crate) fn dot_unchecked(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Squared Euclidean distance. Caller guarantees equal lengths.
pub(crate) fn distance_sq_unchecked(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Euclidean distance between two equal-length vectors.
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> StrokeposeResult<f64> {
    check_dims(a, b)?;
    Ok(distance_sq_unchecked(a, b).sqrt())
}

/// Elementwise `a * (1 - t) + b * t`.
pub fn lerp(a: &[f64], b: &[f64], t: f64) -> StrokeposeResult<Vec<f64>> {
    check_dims(a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x * (1.0 - t) + y * t).collect())
}

/// Spherical linear interpolation between `a` and `b`.
///
/// The angle is measured between the normalised vectors. When they point into opposite
/// half-spaces `b` is negated so the shortest arc is taken; at `t = 1` the result is then `-b`.
/// Nearly parallel vectors, and zero vectors, fall back to linear blending weights.
pub fn slerp(a: &[f64], b: &[f64], t: f64) -> StrokeposeResult<Vec<f64>> {
    check_dims(a, b)?;

    let norms = dot_unchecked(a, a).sqrt() * dot_unchecked(b, b).sqrt();
    let mut cos_omega = if norms > 0.0 {
        (dot_unchecked(a, b) / norms).clamp(-1.0, 1.0)
    } else {
        1.0
    };

    let sign = if cos_omega < 0.0 {
        cos_omega = -cos_omega;
        -1.0
    } else {
        1.0
    };

    let (scale_a, scale_b) = if 1.0 - cos_omega > SLERP_EPSILON {
        let omega = cos_omega.acos();
        let sin_omega = omega.sin();
        (
            ((1.0 - t) * omega).sin() / sin_omega,
            (t * omega).sin() / sin_omega,
        )
    } else {
        (1.0 - t, t)
    };

    Ok(a
        .iter()
        .zip(b)
        .map(|(x, y)| scale_a * x + scale_b * sign * y)
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/latent/vector.rs"]
mod tests;
