use rand::Rng;

use crate::catalog::model::ReferenceCatalog;
use crate::config::{SketchConfig, TailBounds};
use crate::foundation::error::{StrokeposeError, StrokeposeResult};
use crate::latent::curve::CubicCurve;
use crate::latent::vector::{euclidean_distance, lerp, slerp};
use crate::plan::session::StrokeSession;
use crate::resolve::resolve_centroid;

/// Centroid distance per keyframe.
const DISTANCE_PER_KEYFRAME: f64 = 10.0;
/// Keyframe count bounds.
pub const MIN_DENSITY: usize = 3;
/// See [`MIN_DENSITY`].
pub const MAX_DENSITY: usize = 12;
/// Interpolated frames per keyframe segment bounds.
pub const MIN_FRAMES_PER_SEGMENT: usize = 4;
/// See [`MIN_FRAMES_PER_SEGMENT`].
pub const MAX_FRAMES_PER_SEGMENT: usize = 8;

/// Keyframe count for a centroid distance `d`: `clamp(floor(d / 10), 3, 12)`.
pub fn density_for_distance(d: f64) -> usize {
    let raw = (d / DISTANCE_PER_KEYFRAME).floor();
    if raw.is_nan() {
        return MIN_DENSITY;
    }
    raw.clamp(MIN_DENSITY as f64, MAX_DENSITY as f64) as usize
}

/// Frames per keyframe segment: `clamp(floor(budget / density), 4, 8)`.
pub fn frames_per_segment(budget: u32, density: usize) -> usize {
    let raw = (budget as usize).checked_div(density).unwrap_or(0);
    raw.clamp(MIN_FRAMES_PER_SEGMENT, MAX_FRAMES_PER_SEGMENT)
}

/// Planner knobs, usually taken from [`SketchConfig`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlannerSettings {
    /// Frame budget divided among keyframe segments.
    pub frames_per_transition: u32,
    /// Settle tail length.
    pub additional_frames: u32,
    /// Settle tail stride.
    pub additional_frames_step: u32,
    /// Settle tail out-of-range policy.
    pub tail_bounds: TailBounds,
}

impl From<&SketchConfig> for PlannerSettings {
    fn from(cfg: &SketchConfig) -> Self {
        Self {
            frames_per_transition: cfg.frames_per_transition,
            additional_frames: cfg.additional_frames,
            additional_frames_step: cfg.additional_frames_step,
            tail_bounds: cfg.tail_bounds,
        }
    }
}

/// Keyframe route between two catalog poses.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    /// Catalog index the transition starts from.
    pub previous: usize,
    /// Centroid distance between the two poses.
    pub distance: f64,
    /// Keyframe count `k`.
    pub density: usize,
    /// Interpolated frames per keyframe segment.
    pub frames_per_segment: usize,
    /// Catalog indices along the route; first is `previous`, last is the target.
    pub keyframes: Vec<usize>,
}

/// Everything produced for one resolved stroke.
#[derive(Clone, Debug, PartialEq)]
pub struct PlannedPath {
    /// Catalog index the stroke resolved to.
    pub current: usize,
    /// Transition details, `None` for the first stroke of a session.
    pub transition: Option<Transition>,
    /// Catalog indices of the settle tail.
    pub tail: Vec<usize>,
    /// Anchor recorded into the session.
    pub anchor: usize,
    /// Pose vectors to decode, in playback order.
    pub poses: Vec<Vec<f64>>,
}

/// Plans the pose sequence between the session anchor and a newly resolved pose.
#[derive(Clone, Debug)]
pub struct PathPlanner {
    settings: PlannerSettings,
}

impl PathPlanner {
    /// Build a planner.
    pub fn new(settings: PlannerSettings) -> StrokeposeResult<Self> {
        if settings.additional_frames == 0 || settings.additional_frames_step == 0 {
            return Err(StrokeposeError::validation(
                "settle tail needs additional_frames > 0 and additional_frames_step > 0",
            ));
        }
        Ok(Self { settings })
    }

    /// Planner settings.
    pub fn settings(&self) -> PlannerSettings {
        self.settings
    }

    /// Plan the frames for a stroke that resolved to `current` and record the new anchor.
    ///
    /// The session is only touched on success.
    #[tracing::instrument(skip(self, catalog, session, rng), fields(previous = session.anchor()))]
    pub fn plan<R: Rng + ?Sized>(
        &self,
        catalog: &ReferenceCatalog,
        session: &mut StrokeSession,
        current: usize,
        rng: &mut R,
    ) -> StrokeposeResult<PlannedPath> {
        catalog.pose_vector(current)?;

        let tail = self.settle_tail(catalog, current)?;
        let anchor = *tail
            .last()
            .ok_or_else(|| StrokeposeError::validation("settle tail is empty"))?;

        let (transition, mut poses) = match session.anchor() {
            None => (None, Vec::new()),
            Some(previous) => {
                let transition = self.transition(catalog, previous, current, rng)?;
                let poses = interpolate_segments(
                    catalog,
                    &transition.keyframes,
                    transition.frames_per_segment,
                )?;
                (Some(transition), poses)
            }
        };

        for &idx in &tail {
            poses.push(catalog.pose_vector(idx)?.to_vec());
        }

        session.record(anchor);
        tracing::debug!(current, anchor, frames = poses.len(), "path planned");

        Ok(PlannedPath {
            current,
            transition,
            tail,
            anchor,
            poses,
        })
    }

    /// Catalog indices `current + m * step` for `m` in `0..additional_frames`, bounded by the
    /// configured [`TailBounds`].
    pub fn settle_tail(
        &self,
        catalog: &ReferenceCatalog,
        current: usize,
    ) -> StrokeposeResult<Vec<usize>> {
        let n = catalog.len();
        let step = self.settings.additional_frames_step as usize;
        (0..self.settings.additional_frames as usize)
            .map(|m| {
                let idx = m
                    .checked_mul(step)
                    .and_then(|off| current.checked_add(off))
                    .unwrap_or(usize::MAX);
                if idx < n {
                    return Ok(idx);
                }
                match self.settings.tail_bounds {
                    TailBounds::Clamp => Ok(n - 1),
                    TailBounds::Wrap => Ok(idx % n),
                    TailBounds::Reject => Err(StrokeposeError::catalog(format!(
                        "settle tail index {idx} exceeds catalog length {n}"
                    ))),
                }
            })
            .collect()
    }

    /// Keyframe route from `previous` to `current` through centroid space.
    ///
    /// Three slerp samples between the two centroids shape a cubic curve whose two control
    /// points are jittered by up to half the centroid distance per axis. `k` points spaced by
    /// arc length along it are snapped to the nearest catalog centroids; the ends are then
    /// pinned to `previous` and `current`.
    pub fn transition<R: Rng + ?Sized>(
        &self,
        catalog: &ReferenceCatalog,
        previous: usize,
        current: usize,
        rng: &mut R,
    ) -> StrokeposeResult<Transition> {
        let from = catalog.pose_centroid(previous)?;
        let to = catalog.pose_centroid(current)?;

        let distance = euclidean_distance(from, to)?;
        let density = density_for_distance(distance);
        let frames_per_segment = frames_per_segment(self.settings.frames_per_transition, density);

        let mid = slerp(from, to, 0.5)?;
        let half = distance / 2.0;
        let c1 = jittered(&lerp(from, &mid, 0.5)?, half, rng);
        let c2 = jittered(&lerp(&mid, to, 0.5)?, half, rng);
        let curve = CubicCurve::new(from.to_vec(), c1, c2, to.to_vec())?;

        let mut keyframes = curve
            .sample_by_arc_length(density)
            .iter()
            .map(|p| resolve_centroid(catalog, p))
            .collect::<StrokeposeResult<Vec<_>>>()?;
        if let Some(first) = keyframes.first_mut() {
            *first = previous;
        }
        if let Some(last) = keyframes.last_mut() {
            *last = current;
        }

        tracing::debug!(
            previous,
            current,
            distance,
            density,
            frames_per_segment,
            "transition keyframes"
        );

        Ok(Transition {
            previous,
            distance,
            density,
            frames_per_segment,
            keyframes,
        })
    }
}

fn jittered<R: Rng + ?Sized>(point: &[f64], half: f64, rng: &mut R) -> Vec<f64> {
    point
        .iter()
        .map(|v| v + rng.gen_range(-half..=half))
        .collect()
}

/// Linear blends in pose space between consecutive keyframes, `per_segment` frames each with
/// parameters `i / (per_segment - 1)`, both ends included.
pub fn interpolate_segments(
    catalog: &ReferenceCatalog,
    keyframes: &[usize],
    per_segment: usize,
) -> StrokeposeResult<Vec<Vec<f64>>> {
    if per_segment < 2 {
        return Err(StrokeposeError::validation(
            "interpolation needs at least two frames per segment",
        ));
    }
    let denom = (per_segment - 1) as f64;
    let mut out = Vec::with_capacity(keyframes.len().saturating_sub(1) * per_segment);
    for pair in keyframes.windows(2) {
        let a = catalog.pose_vector(pair[0])?;
        let b = catalog.pose_vector(pair[1])?;
        for i in 0..per_segment {
            out.push(lerp(a, b, i as f64 / denom)?);
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/plan/planner.rs"]
mod tests;
