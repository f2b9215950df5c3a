//! Boundary to the external stroke encoder and pose decoder models.
//!
//! The models themselves are opaque. This module pins down the calling contract: one embedding
//! per stroke image, one frame per pose vector, batch output in input order, frames fitted to
//! the canvas size.

use crate::foundation::core::{Canvas, FrameRGBA};
use crate::foundation::error::{StrokeposeError, StrokeposeResult};

/// Input size the reference stroke encoder was trained on.
pub const STROKE_INPUT: Canvas = Canvas {
    width: 256,
    height: 128,
};

/// Maps a finalized stroke image to an embedding vector.
pub trait StrokeEncoder {
    /// Embed one stroke image.
    fn encode(&self, image: &FrameRGBA) -> StrokeposeResult<Vec<f64>>;
}

/// Maps a pose vector to an image.
pub trait PoseDecoder {
    /// Decode one pose vector.
    fn decode(&self, pose: &[f64]) -> StrokeposeResult<FrameRGBA>;

    /// Decode a batch. Output order must match input order.
    fn decode_many(&self, poses: &[Vec<f64>]) -> StrokeposeResult<Vec<FrameRGBA>> {
        poses.iter().map(|p| self.decode(p)).collect()
    }
}

/// The two external models handed over together with the catalog.
pub struct Models {
    /// Stroke image encoder.
    pub encoder: Box<dyn StrokeEncoder>,
    /// Pose vector decoder.
    pub decoder: Box<dyn PoseDecoder>,
}

impl std::fmt::Debug for Models {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Models").finish_non_exhaustive()
    }
}

/// Typed wrapper around a [`PoseDecoder`].
///
/// Checks pose dimensions before decoding, checks batch lengths after, and resizes every
/// decoded frame to the output canvas.
pub struct FrameSynthesizer {
    decoder: Box<dyn PoseDecoder>,
    pose_dim: usize,
    output: Canvas,
}

impl FrameSynthesizer {
    /// Wrap `decoder` for pose vectors of `pose_dim` components.
    pub fn new(decoder: Box<dyn PoseDecoder>, pose_dim: usize, output: Canvas) -> Self {
        Self {
            decoder,
            pose_dim,
            output,
        }
    }

    /// Output frame size.
    pub fn output(&self) -> Canvas {
        self.output
    }

    /// Decode one pose vector into a canvas-sized frame.
    pub fn decode(&self, pose: &[f64]) -> StrokeposeResult<FrameRGBA> {
        self.check_pose(0, pose)?;
        let frame = self.decoder.decode(pose)?;
        self.fit(frame)
    }

    /// Decode a list of pose vectors, preserving order.
    #[tracing::instrument(skip_all, fields(count = poses.len()))]
    pub fn decode_many(&self, poses: &[Vec<f64>]) -> StrokeposeResult<Vec<FrameRGBA>> {
        for (i, pose) in poses.iter().enumerate() {
            self.check_pose(i, pose)?;
        }
        let frames = self.decoder.decode_many(poses)?;
        if frames.len() != poses.len() {
            return Err(StrokeposeError::model(format!(
                "decoder returned {} frames for {} poses",
                frames.len(),
                poses.len()
            )));
        }
        frames.into_iter().map(|f| self.fit(f)).collect()
    }

    fn check_pose(&self, i: usize, pose: &[f64]) -> StrokeposeResult<()> {
        if pose.len() != self.pose_dim {
            return Err(StrokeposeError::validation(format!(
                "pose {i} has dimension {}, decoder expects {}",
                pose.len(),
                self.pose_dim
            )));
        }
        Ok(())
    }

    fn fit(&self, frame: FrameRGBA) -> StrokeposeResult<FrameRGBA> {
        if frame.width == 0 || frame.height == 0 {
            return Err(StrokeposeError::model("decoder returned an empty frame"));
        }
        if frame.width == self.output.width && frame.height == self.output.height {
            return Ok(frame);
        }
        frame.resized(self.output.width, self.output.height)
    }
}

/// Turn a stroke image into encoder input: grayscale, bilinear resize to `input`, and scale
/// each value `v` to `v / 127.5 - 1` so white maps to `1` and black to `-1`.
pub fn preprocess_stroke(image: &FrameRGBA, input: Canvas) -> StrokeposeResult<Vec<f64>> {
    if input.width == 0 || input.height == 0 {
        return Err(StrokeposeError::validation("encoder input must be non-empty"));
    }
    let rgba = image.to_rgba_image()?;
    let gray = image::imageops::grayscale(&rgba);
    let resized = image::imageops::resize(
        &gray,
        input.width,
        input.height,
        image::imageops::FilterType::Triangle,
    );
    Ok(resized
        .into_raw()
        .into_iter()
        .map(|v| f64::from(v) / 127.5 - 1.0)
        .collect())
}

#[cfg(test)]
#[path = "../tests/unit/synth.rs"]
mod tests;
