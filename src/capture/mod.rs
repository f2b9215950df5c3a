//! Pointer-driven stroke capture onto an offscreen raster.

mod blur;
/// Brush rasterization onto the capture surface.
pub mod raster;
/// The pointer state machine and its draw notifications.
pub mod stroke;
