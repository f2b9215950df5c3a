use crate::capture::raster::{Brush, StrokeRaster};
use crate::config::SketchConfig;
use crate::events::{SubscriptionId, Subscribers};
use crate::foundation::core::{Canvas, FrameRGBA, Point};
use crate::foundation::error::{StrokeposeError, StrokeposeResult};

/// A pointer sample in viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PointerEvent {
    /// Identifier of the pointer (mouse, pen, or touch contact).
    pub pointer_id: u64,
    /// Horizontal offset from the drawing area's origin.
    pub x: f64,
    /// Vertical offset from the drawing area's origin.
    pub y: f64,
}

/// A recorded pointer input, as replayed from gesture files.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerInput {
    /// Pointer pressed.
    Down(PointerEvent),
    /// Pointer moved.
    Move(PointerEvent),
    /// Pointer released.
    Up(PointerEvent),
}

/// Result of feeding one pointer move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Not drawing, or a different pointer.
    Ignored,
    /// A segment was drawn.
    Drawn,
    /// The stroke is past its length cap; nothing was drawn.
    Capped,
}

#[derive(Clone, Copy, Debug)]
enum CaptureState {
    Idle,
    Drawing {
        pointer_id: u64,
        last: Point,
        length: f64,
    },
}

/// Pointer-driven stroke recorder.
///
/// `Idle -> Drawing` on pointer down, back to `Idle` on the matching pointer up, which emits the
/// finished stroke and clears the surface. Moves accumulate path length; once the total passes
/// `max_length` no further segment is drawn and the cursor stays at the last drawn point.
pub struct StrokeCapture {
    state: CaptureState,
    enabled: bool,
    raster: StrokeRaster,
    canvas: Canvas,
    pixel_ratio: f64,
    view_scale: (f64, f64),
    brush_width: f64,
    blur: f64,
    max_length: f64,
    draw: Subscribers<FrameRGBA>,
    draw_complete: Subscribers<FrameRGBA>,
}

impl std::fmt::Debug for StrokeCapture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrokeCapture")
            .field("state", &self.state)
            .field("enabled", &self.enabled)
            .field("canvas", &self.canvas)
            .finish_non_exhaustive()
    }
}

impl StrokeCapture {
    /// Build a capture surface from the brush, length and canvas settings of `cfg`.
    pub fn new(cfg: &SketchConfig) -> StrokeposeResult<Self> {
        cfg.validate()?;
        Ok(Self {
            state: CaptureState::Idle,
            enabled: true,
            raster: StrokeRaster::new(cfg.raster_canvas())?,
            canvas: cfg.canvas,
            pixel_ratio: cfg.pixel_ratio,
            view_scale: (1.0, 1.0),
            brush_width: cfg.brush_radius,
            blur: cfg.blur_radius,
            max_length: cfg.max_stroke_length,
            draw: Subscribers::new(),
            draw_complete: Subscribers::new(),
        })
    }

    /// Set the viewport-to-canvas scale factors (displayed size / logical canvas size).
    pub fn set_view_scale(&mut self, scale_x: f64, scale_y: f64) -> StrokeposeResult<()> {
        for s in [scale_x, scale_y] {
            if !s.is_finite() || s <= 0.0 {
                return Err(StrokeposeError::validation("view scale must be > 0"));
            }
        }
        self.view_scale = (scale_x, scale_y);
        Ok(())
    }

    /// Allow or refuse new strokes. A stroke already in progress is unaffected.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Return `true` when new strokes may begin.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Return `true` between pointer down and the matching pointer up.
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, CaptureState::Drawing { .. })
    }

    /// Accumulated path length of the stroke in progress, in canvas pixels.
    pub fn stroke_length(&self) -> Option<f64> {
        match self.state {
            CaptureState::Drawing { length, .. } => Some(length),
            CaptureState::Idle => None,
        }
    }

    /// Register a callback for intermediate snapshots.
    pub fn on_draw(&mut self, callback: impl FnMut(&FrameRGBA) + 'static) -> SubscriptionId {
        self.draw.subscribe(callback)
    }

    /// Register a callback for finished strokes.
    pub fn on_draw_complete(
        &mut self,
        callback: impl FnMut(&FrameRGBA) + 'static,
    ) -> SubscriptionId {
        self.draw_complete.subscribe(callback)
    }

    /// Remove a callback registered with either `on_draw` or `on_draw_complete`.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.draw.unsubscribe(id) || self.draw_complete.unsubscribe(id)
    }

    /// Dispatch a recorded input. Returns the finished stroke on a completing pointer up.
    pub fn handle(&mut self, input: PointerInput) -> StrokeposeResult<Option<FrameRGBA>> {
        match input {
            PointerInput::Down(ev) => {
                self.pointer_down(ev);
                Ok(None)
            }
            PointerInput::Move(ev) => {
                self.pointer_move(ev)?;
                Ok(None)
            }
            PointerInput::Up(ev) => self.pointer_up(ev),
        }
    }

    /// Begin a stroke. Ignored while drawing or disabled. Returns `true` if a stroke began.
    pub fn pointer_down(&mut self, ev: PointerEvent) -> bool {
        if !self.enabled || self.is_drawing() {
            return false;
        }
        self.state = CaptureState::Drawing {
            pointer_id: ev.pointer_id,
            last: self.to_canvas(ev),
            length: 0.0,
        };
        true
    }

    /// Extend the stroke towards `ev`.
    pub fn pointer_move(&mut self, ev: PointerEvent) -> StrokeposeResult<MoveOutcome> {
        let CaptureState::Drawing {
            pointer_id,
            last,
            length,
        } = self.state
        else {
            return Ok(MoveOutcome::Ignored);
        };
        if pointer_id != ev.pointer_id {
            return Ok(MoveOutcome::Ignored);
        }

        let next = self.to_canvas(ev);
        let length = length + last.distance(next);
        if length > self.max_length {
            self.state = CaptureState::Drawing {
                pointer_id,
                last,
                length,
            };
            return Ok(MoveOutcome::Capped);
        }

        let brush = Brush {
            width: self.brush_width * self.pixel_ratio,
            blur: self.blur * self.pixel_ratio,
        };
        self.raster
            .draw_segment(self.to_raster(last), self.to_raster(next), &brush)?;
        self.state = CaptureState::Drawing {
            pointer_id,
            last: next,
            length,
        };

        if !self.draw.is_empty() {
            let snapshot = self.raster.snapshot(self.canvas)?;
            self.draw.emit(&snapshot);
        }
        Ok(MoveOutcome::Drawn)
    }

    /// Finish the stroke if `ev` comes from the drawing pointer.
    ///
    /// Emits and returns the canvas-sized snapshot, then clears the surface.
    pub fn pointer_up(&mut self, ev: PointerEvent) -> StrokeposeResult<Option<FrameRGBA>> {
        let CaptureState::Drawing { pointer_id, .. } = self.state else {
            return Ok(None);
        };
        if pointer_id != ev.pointer_id {
            return Ok(None);
        }

        self.state = CaptureState::Idle;
        let snapshot = self.raster.snapshot(self.canvas)?;
        self.raster.clear();
        self.draw_complete.emit(&snapshot);
        Ok(Some(snapshot))
    }

    /// Viewport offset to logical canvas coordinates.
    fn to_canvas(&self, ev: PointerEvent) -> Point {
        Point::new(ev.x / self.view_scale.0, ev.y / self.view_scale.1)
    }

    fn to_raster(&self, p: Point) -> Point {
        Point::new(p.x * self.pixel_ratio, p.y * self.pixel_ratio)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/stroke.rs"]
mod tests;
