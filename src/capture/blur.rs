use crate::foundation::error::{StrokeposeError, StrokeposeResult};

/// Separable gaussian blur over premultiplied RGBA8, edge pixels clamped.
///
/// `sigma <= 0` is the identity. The kernel spans `ceil(3 * sigma)` pixels on each side.
pub(crate) fn gaussian_blur_rgba8(
    pixels: &mut [u8],
    width: u32,
    height: u32,
    sigma: f64,
) -> StrokeposeResult<()> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| StrokeposeError::validation("blur buffer size overflow"))?;
    if pixels.len() != expected {
        return Err(StrokeposeError::validation(
            "blur expects a buffer of width*height*4 bytes",
        ));
    }
    if !sigma.is_finite() {
        return Err(StrokeposeError::validation("blur sigma must be finite"));
    }
    if sigma <= 0.0 || width == 0 || height == 0 {
        return Ok(());
    }

    let kernel = kernel_q16(sigma);
    let mut scratch = vec![0u8; expected];
    convolve(pixels, &mut scratch, width, height, &kernel, Axis::X);
    convolve(&scratch, pixels, width, height, &kernel, Axis::Y);
    Ok(())
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

/// Normalised weights in 16.16 fixed point; they sum to exactly `1 << 16`.
fn kernel_q16(sigma: f64) -> Vec<u32> {
    let radius = (3.0 * sigma).ceil().max(1.0) as i32;
    let denom = 2.0 * sigma * sigma;
    let weights: Vec<f64> = (-radius..=radius)
        .map(|i| (-f64::from(i * i) / denom).exp())
        .collect();
    let sum: f64 = weights.iter().sum();

    let mut q: Vec<u32> = weights
        .iter()
        .map(|w| ((w / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect();
    let total: i64 = q.iter().map(|&v| i64::from(v)).sum();
    let mid = q.len() / 2;
    q[mid] = (i64::from(q[mid]) + (65536 - total)).clamp(0, 65536) as u32;
    q
}

fn convolve(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32], axis: Axis) {
    let radius = (k.len() / 2) as i64;
    let (w, h) = (i64::from(width), i64::from(height));
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let d = ki as i64 - radius;
                let (sx, sy) = match axis {
                    Axis::X => ((x + d).clamp(0, w - 1), y),
                    Axis::Y => (x, (y + d).clamp(0, h - 1)),
                };
                let idx = ((sy * w + sx) as usize) * 4;
                for (c, a) in acc.iter_mut().enumerate() {
                    *a += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out = ((y * w + x) as usize) * 4;
            for (c, a) in acc.iter().enumerate() {
                dst[out + c] = ((a + 32768) >> 16).min(255) as u8;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/blur.rs"]
mod tests;
