//! Path planning between resolved poses.

/// Keyframe routing, segment interpolation and settle tails.
pub mod planner;
/// Per-session anchor history.
pub mod session;
