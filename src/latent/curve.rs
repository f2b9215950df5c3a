use crate::foundation::error::{StrokeposeError, StrokeposeResult};
use crate::latent::vector::{check_dims, distance_sq_unchecked};

/// Number of uniform-parameter samples used to build the arc-length table.
const ARC_LUT_RESOLUTION: usize = 256;

/// Cubic Bezier curve in an arbitrary number of dimensions.
#[derive(Clone, Debug, PartialEq)]
pub struct CubicCurve {
    points: [Vec<f64>; 4],
}

impl CubicCurve {
    /// Build a curve from start, two control points and end. All must share one dimension.
    pub fn new(
        p0: Vec<f64>,
        p1: Vec<f64>,
        p2: Vec<f64>,
        p3: Vec<f64>,
    ) -> StrokeposeResult<Self> {
        check_dims(&p0, &p1)?;
        check_dims(&p0, &p2)?;
        check_dims(&p0, &p3)?;
        if p0.is_empty() {
            return Err(StrokeposeError::validation("curve points must be non-empty"));
        }
        Ok(Self {
            points: [p0, p1, p2, p3],
        })
    }

    /// Dimension of the space the curve lives in.
    pub fn dim(&self) -> usize {
        self.points[0].len()
    }

    /// Evaluate at parameter `t` in `[0, 1]`.
    pub fn eval(&self, t: f64) -> Vec<f64> {
        let mt = 1.0 - t;
        let w = [mt * mt * mt, 3.0 * mt * mt * t, 3.0 * mt * t * t, t * t * t];
        let [p0, p1, p2, p3] = &self.points;
        (0..self.dim())
            .map(|i| w[0] * p0[i] + w[1] * p1[i] + w[2] * p2[i] + w[3] * p3[i])
            .collect()
    }

    /// Build a table of `(t, cumulative length)` from a dense polyline approximation.
    pub fn arc_length_table(&self) -> ArcLengthTable {
        let mut entries = Vec::with_capacity(ARC_LUT_RESOLUTION + 1);
        let mut prev = self.eval(0.0);
        let mut acc = 0.0;
        entries.push((0.0, 0.0));
        for i in 1..=ARC_LUT_RESOLUTION {
            let t = i as f64 / ARC_LUT_RESOLUTION as f64;
            let p = self.eval(t);
            acc += distance_sq_unchecked(&prev, &p).sqrt();
            entries.push((t, acc));
            prev = p;
        }
        ArcLengthTable { entries }
    }

    /// `count` points spaced evenly by arc length, including both endpoints.
    ///
    /// A degenerate (zero-length) curve falls back to even parameter spacing.
    pub fn sample_by_arc_length(&self, count: usize) -> Vec<Vec<f64>> {
        match count {
            0 => Vec::new(),
            1 => vec![self.eval(0.0)],
            _ => {
                let table = self.arc_length_table();
                (0..count)
                    .map(|i| {
                        let u = i as f64 / (count - 1) as f64;
                        self.eval(table.param_at_fraction(u))
                    })
                    .collect()
            }
        }
    }
}

/// Cumulative arc length sampled at increasing curve parameters.
#[derive(Clone, Debug)]
pub struct ArcLengthTable {
    entries: Vec<(f64, f64)>,
}

impl ArcLengthTable {
    /// Total approximate length of the curve.
    pub fn total_length(&self) -> f64 {
        self.entries.last().map(|e| e.1).unwrap_or(0.0)
    }

    /// Curve parameter at which `fraction` (in `[0, 1]`) of the total length is reached.
    pub fn param_at_fraction(&self, fraction: f64) -> f64 {
        let fraction = fraction.clamp(0.0, 1.0);
        let total = self.total_length();
        if total <= 0.0 {
            return fraction;
        }
        let target = fraction * total;
        let hi = self.entries.partition_point(|e| e.1 < target);
        if hi == 0 {
            return 0.0;
        }
        if hi >= self.entries.len() {
            return 1.0;
        }
        let (t0, l0) = self.entries[hi - 1];
        let (t1, l1) = self.entries[hi];
        let span = l1 - l0;
        if span <= 0.0 {
            return t1;
        }
        t0 + (t1 - t0) * ((target - l0) / span)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/latent/curve.rs"]
mod tests;
