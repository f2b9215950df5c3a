use vello_cpu::kurbo::{Affine, BezPath, Cap, Join, Stroke};

use crate::capture::blur::gaussian_blur_rgba8;
use crate::foundation::core::{Canvas, FrameRGBA, Point};
use crate::foundation::error::{StrokeposeError, StrokeposeResult};
use crate::foundation::math::over_premul;

/// Brush parameters, in raster pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Brush {
    /// Line width.
    pub width: f64,
    /// Gaussian sigma applied to each segment before it is composited.
    pub blur: f64,
}

/// Opaque white drawing surface that black brush segments are composited onto.
#[derive(Clone, Debug)]
pub(crate) struct StrokeRaster {
    width: u16,
    height: u16,
    data: Vec<u8>,
}

impl StrokeRaster {
    pub(crate) fn new(size: Canvas) -> StrokeposeResult<Self> {
        let width: u16 = size
            .width
            .try_into()
            .map_err(|_| StrokeposeError::validation("raster width exceeds u16"))?;
        let height: u16 = size
            .height
            .try_into()
            .map_err(|_| StrokeposeError::validation("raster height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(StrokeposeError::validation("raster must be non-empty"));
        }
        Ok(Self {
            width,
            height,
            data: [255u8; 4].repeat(usize::from(width) * usize::from(height)),
        })
    }

    /// Reset to blank white.
    pub(crate) fn clear(&mut self) {
        self.data.fill(255);
    }

    /// Rasterize one round-capped line segment, blur it, and composite it source-over.
    ///
    /// Only the segment's bounding box (grown by the stroke half-width and blur reach) is
    /// rendered.
    pub(crate) fn draw_segment(
        &mut self,
        from: Point,
        to: Point,
        brush: &Brush,
    ) -> StrokeposeResult<()> {
        let reach = brush.width / 2.0 + (3.0 * brush.blur.max(0.0)).ceil() + 1.0;
        let x0 = (from.x.min(to.x) - reach).floor().max(0.0);
        let y0 = (from.y.min(to.y) - reach).floor().max(0.0);
        let x1 = (from.x.max(to.x) + reach).ceil().min(f64::from(self.width));
        let y1 = (from.y.max(to.y) + reach).ceil().min(f64::from(self.height));
        if x1 <= x0 || y1 <= y0 {
            return Ok(());
        }
        let (lw, lh) = ((x1 - x0) as u16, (y1 - y0) as u16);

        let mut ctx = vello_cpu::RenderContext::new(lw, lh);
        ctx.set_transform(Affine::translate((-x0, -y0)));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(0, 0, 0, 255));
        ctx.set_stroke(
            Stroke::new(brush.width)
                .with_caps(Cap::Round)
                .with_join(Join::Round),
        );
        let mut path = BezPath::new();
        path.move_to(point_to_cpu(from));
        path.line_to(point_to_cpu(to));
        ctx.stroke_path(&path);
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(lw, lh);
        ctx.render_to_pixmap(&mut pixmap);
        let mut layer = pixmap.data_as_u8_slice().to_vec();
        gaussian_blur_rgba8(&mut layer, u32::from(lw), u32::from(lh), brush.blur)?;

        let (ox, oy) = (x0 as usize, y0 as usize);
        let stride = usize::from(self.width) * 4;
        for (row, src_row) in layer.chunks_exact(usize::from(lw) * 4).enumerate() {
            let start = (oy + row) * stride + ox * 4;
            let dst_row = &mut self.data[start..start + src_row.len()];
            for (dst, src) in dst_row.chunks_exact_mut(4).zip(src_row.chunks_exact(4)) {
                over_premul(dst, src);
            }
        }
        Ok(())
    }

    /// Copy of the surface resized to `size`.
    ///
    /// The surface is opaque, so the copy is already flattened onto the white background.
    pub(crate) fn snapshot(&self, size: Canvas) -> StrokeposeResult<FrameRGBA> {
        let frame = FrameRGBA::new(
            u32::from(self.width),
            u32::from(self.height),
            self.data.clone(),
        )?;
        frame.resized(size.width, size.height)
    }
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

#[cfg(test)]
#[path = "../../tests/unit/capture/raster.rs"]
mod tests;
