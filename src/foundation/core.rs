use anyhow::Context;

use crate::foundation::error::{StrokeposeError, StrokeposeResult};

pub use kurbo::{Point, Vec2};

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> StrokeposeResult<Self> {
        if den == 0 {
            return Err(StrokeposeError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(StrokeposeError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Convert elapsed seconds into fractional virtual frames.
    pub fn secs_to_frames(self, secs: f64) -> f64 {
        secs * self.as_f64()
    }
}

/// Logical canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Scale both dimensions by `ratio`, rounding and never going below one pixel.
    pub fn scaled(self, ratio: f64) -> Self {
        let scale = |v: u32| ((f64::from(v) * ratio).round() as u32).max(1);
        Self {
            width: scale(self.width),
            height: scale(self.height),
        }
    }
}

/// An RGBA8 raster (straight alpha, tightly packed, row-major).
///
/// Used for stroke snapshots, decoded pose frames and the player's destination surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 bytes.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Wrap raw RGBA8 bytes, checking the length against `width * height * 4`.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> StrokeposeResult<Self> {
        let expected = byte_len(width, height)?;
        if data.len() != expected {
            return Err(StrokeposeError::validation(format!(
                "frame byte length {} does not match {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A frame where every pixel is `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let px = (width as usize) * (height as usize);
        Self {
            width,
            height,
            data: rgba.repeat(px),
        }
    }

    /// Opaque white frame, the blank state of the drawing surface.
    pub fn white(width: u32, height: u32) -> Self {
        Self::filled(width, height, [255, 255, 255, 255])
    }

    /// RGBA at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Resize with a bilinear (triangle) filter. Same-size input is cloned unchanged.
    pub fn resized(&self, width: u32, height: u32) -> StrokeposeResult<Self> {
        if width == 0 || height == 0 {
            return Err(StrokeposeError::validation("resize target must be non-empty"));
        }
        if width == self.width && height == self.height {
            return Ok(self.clone());
        }
        let img = self.to_rgba_image()?;
        let out = image::imageops::resize(&img, width, height, image::imageops::FilterType::Triangle);
        Ok(Self {
            width,
            height,
            data: out.into_raw(),
        })
    }

    /// Convert into an `image::RgbaImage` (copies the buffer).
    pub fn to_rgba_image(&self) -> StrokeposeResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .context("frame buffer does not match its dimensions")
            .map_err(StrokeposeError::from)
    }

    /// Write the frame as a PNG file.
    pub fn save_png(&self, path: &std::path::Path) -> StrokeposeResult<()> {
        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

fn byte_len(width: u32, height: u32) -> StrokeposeResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| StrokeposeError::validation("frame buffer size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
