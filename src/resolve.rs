//! Nearest-neighbour lookup against catalog tables.

use crate::catalog::model::ReferenceCatalog;
use crate::foundation::core::FrameRGBA;
use crate::foundation::error::{StrokeposeError, StrokeposeResult};
use crate::latent::vector::distance_sq_unchecked;
use crate::synth::StrokeEncoder;

/// Index of the row in `candidates` closest to `query` by Euclidean distance.
///
/// Exhaustive linear scan. On ties the earliest row wins.
pub fn nearest_index(query: &[f64], candidates: &[Vec<f64>]) -> StrokeposeResult<usize> {
    if candidates.is_empty() {
        return Err(StrokeposeError::validation("no candidates to resolve against"));
    }

    let mut best = 0usize;
    let mut best_dist = f64::INFINITY;
    for (i, row) in candidates.iter().enumerate() {
        if row.len() != query.len() {
            return Err(StrokeposeError::validation(format!(
                "query has dimension {}, candidate {i} has {}",
                query.len(),
                row.len()
            )));
        }
        // Squared distance keeps the ordering of the true distance.
        let d = distance_sq_unchecked(query, row);
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    Ok(best)
}

/// Resolve a stroke embedding to the closest catalog pose.
pub fn resolve_embedding(catalog: &ReferenceCatalog, embedding: &[f64]) -> StrokeposeResult<usize> {
    nearest_index(embedding, catalog.stroke_embeddings())
}

/// Resolve an arbitrary point in centroid space to the closest catalog pose.
pub fn resolve_centroid(catalog: &ReferenceCatalog, point: &[f64]) -> StrokeposeResult<usize> {
    nearest_index(point, catalog.pose_centroids())
}

/// Encode a finalized stroke image and resolve it to a catalog index.
#[tracing::instrument(skip_all, fields(width = image.width, height = image.height))]
pub fn resolve_stroke(
    catalog: &ReferenceCatalog,
    encoder: &dyn StrokeEncoder,
    image: &FrameRGBA,
) -> StrokeposeResult<usize> {
    let embedding = encoder.encode(image)?;
    let idx = resolve_embedding(catalog, &embedding)?;
    tracing::debug!(idx, "stroke resolved");
    Ok(idx)
}

#[cfg(test)]
#[path = "../tests/unit/resolve.rs"]
mod tests;
