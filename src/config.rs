use std::path::Path;

use anyhow::Context;

use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{StrokeposeError, StrokeposeResult};

/// How the settle tail treats catalog indices past the end of the catalog.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TailBounds {
    /// Saturate at the last catalog index.
    #[default]
    Clamp,
    /// Wrap around to the start of the catalog.
    Wrap,
    /// Fail the transition with a catalog error.
    Reject,
}

/// Session configuration.
///
/// Every field has a default so partial JSON documents are accepted.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SketchConfig {
    /// Brush line width in logical pixels.
    pub brush_radius: f64,
    /// Gaussian blur sigma in logical pixels applied to each drawn segment.
    pub blur_radius: f64,
    /// Maximum accumulated path length of one stroke.
    pub max_stroke_length: f64,
    /// Frame budget for one transition, divided among keyframe segments.
    pub frames_per_transition: u32,
    /// Length of the settle tail appended after every transition.
    pub additional_frames: u32,
    /// Catalog stride between settle tail frames.
    pub additional_frames_step: u32,
    /// Canonical logical canvas size.
    pub canvas: Canvas,
    /// Raster surface scale relative to the logical canvas.
    pub pixel_ratio: f64,
    /// Virtual frame rate of the animation player.
    pub playback_fps: Fps,
    /// Seed for the path planner's control point jitter.
    pub seed: u64,
    /// Out-of-range policy for settle tail indices.
    pub tail_bounds: TailBounds,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            brush_radius: 5.0,
            blur_radius: 5.0,
            max_stroke_length: 250.0,
            frames_per_transition: 50,
            additional_frames: 20,
            additional_frames_step: 1,
            canvas: Canvas {
                width: 512,
                height: 256,
            },
            pixel_ratio: 1.0,
            playback_fps: Fps { num: 12, den: 1 },
            seed: 0,
            tail_bounds: TailBounds::Clamp,
        }
    }
}

impl SketchConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json_str(s: &str) -> StrokeposeResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: &Path) -> StrokeposeResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Check value ranges.
    pub fn validate(&self) -> StrokeposeResult<()> {
        fn positive(name: &str, v: f64) -> StrokeposeResult<()> {
            if !v.is_finite() || v <= 0.0 {
                return Err(StrokeposeError::validation(format!("{name} must be > 0")));
            }
            Ok(())
        }

        positive("brush_radius", self.brush_radius)?;
        positive("max_stroke_length", self.max_stroke_length)?;
        positive("pixel_ratio", self.pixel_ratio)?;
        if !self.blur_radius.is_finite() || self.blur_radius < 0.0 {
            return Err(StrokeposeError::validation("blur_radius must be >= 0"));
        }
        if self.frames_per_transition == 0 {
            return Err(StrokeposeError::validation(
                "frames_per_transition must be > 0",
            ));
        }
        if self.additional_frames == 0 {
            return Err(StrokeposeError::validation("additional_frames must be > 0"));
        }
        if self.additional_frames_step == 0 {
            return Err(StrokeposeError::validation(
                "additional_frames_step must be > 0",
            ));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(StrokeposeError::validation("canvas must be non-empty"));
        }
        if u16::try_from(self.raster_canvas().width).is_err()
            || u16::try_from(self.raster_canvas().height).is_err()
        {
            return Err(StrokeposeError::validation("raster surface exceeds u16"));
        }
        Fps::new(self.playback_fps.num, self.playback_fps.den)?;
        Ok(())
    }

    /// Size of the internal raster surface (`canvas * pixel_ratio`).
    pub fn raster_canvas(&self) -> Canvas {
        self.canvas.scaled(self.pixel_ratio)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
