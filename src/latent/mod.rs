//! Vector math in pose and centroid space.

/// N-dimensional cubic Bezier curves with arc-length sampling.
pub mod curve;
/// Distances and interpolation between vectors.
pub mod vector;
