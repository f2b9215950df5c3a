use crate::foundation::error::{StrokeposeError, StrokeposeResult};

/// Fixed, index-aligned reference data loaded once per session.
///
/// Index `i` names the same logical pose in all three tables. Rows within one table share a
/// dimension. The catalog is immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceCatalog {
    stroke_embeddings: Vec<Vec<f64>>,
    pose_vectors: Vec<Vec<f64>>,
    pose_centroids: Vec<Vec<f64>>,
}

/// On-disk shape of a single-file catalog.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDef {
    /// Stroke embedding per pose.
    #[serde(alias = "stroke_embeddings")]
    pub stroke_embeddings: Vec<Vec<f64>>,
    /// Decodable pose vector per pose.
    #[serde(alias = "pose_vectors")]
    pub pose_vectors: Vec<Vec<f64>>,
    /// Low-dimensional projection per pose.
    #[serde(alias = "pose_centroids")]
    pub pose_centroids: Vec<Vec<f64>>,
}

impl ReferenceCatalog {
    /// Validate alignment and build the catalog.
    pub fn new(
        stroke_embeddings: Vec<Vec<f64>>,
        pose_vectors: Vec<Vec<f64>>,
        pose_centroids: Vec<Vec<f64>>,
    ) -> StrokeposeResult<Self> {
        let n = stroke_embeddings.len();
        if n == 0 {
            return Err(StrokeposeError::catalog("catalog must contain at least one pose"));
        }
        if pose_vectors.len() != n || pose_centroids.len() != n {
            return Err(StrokeposeError::catalog(format!(
                "catalog tables are not index-aligned: {} stroke embeddings, {} pose vectors, {} centroids",
                n,
                pose_vectors.len(),
                pose_centroids.len()
            )));
        }
        check_table("stroke_embeddings", &stroke_embeddings)?;
        check_table("pose_vectors", &pose_vectors)?;
        check_table("pose_centroids", &pose_centroids)?;

        Ok(Self {
            stroke_embeddings,
            pose_vectors,
            pose_centroids,
        })
    }

    /// Number of poses `N`.
    pub fn len(&self) -> usize {
        self.pose_vectors.len()
    }

    /// Always `false`; construction rejects empty catalogs.
    pub fn is_empty(&self) -> bool {
        self.pose_vectors.is_empty()
    }

    /// Stroke embedding table.
    pub fn stroke_embeddings(&self) -> &[Vec<f64>] {
        &self.stroke_embeddings
    }

    /// Pose vector table.
    pub fn pose_vectors(&self) -> &[Vec<f64>] {
        &self.pose_vectors
    }

    /// Pose centroid table.
    pub fn pose_centroids(&self) -> &[Vec<f64>] {
        &self.pose_centroids
    }

    /// Pose vector at `idx`.
    pub fn pose_vector(&self, idx: usize) -> StrokeposeResult<&[f64]> {
        self.pose_vectors
            .get(idx)
            .map(Vec::as_slice)
            .ok_or_else(|| self.out_of_range(idx))
    }

    /// Pose centroid at `idx`.
    pub fn pose_centroid(&self, idx: usize) -> StrokeposeResult<&[f64]> {
        self.pose_centroids
            .get(idx)
            .map(Vec::as_slice)
            .ok_or_else(|| self.out_of_range(idx))
    }

    /// Dimension of stroke embeddings.
    pub fn stroke_dim(&self) -> usize {
        self.stroke_embeddings[0].len()
    }

    /// Dimension of pose vectors.
    pub fn pose_dim(&self) -> usize {
        self.pose_vectors[0].len()
    }

    /// Dimension of pose centroids.
    pub fn centroid_dim(&self) -> usize {
        self.pose_centroids[0].len()
    }

    fn out_of_range(&self, idx: usize) -> StrokeposeError {
        StrokeposeError::catalog(format!(
            "catalog index {idx} out of range (len {})",
            self.len()
        ))
    }
}

impl TryFrom<CatalogDef> for ReferenceCatalog {
    type Error = StrokeposeError;

    fn try_from(def: CatalogDef) -> StrokeposeResult<Self> {
        Self::new(def.stroke_embeddings, def.pose_vectors, def.pose_centroids)
    }
}

fn check_table(name: &str, rows: &[Vec<f64>]) -> StrokeposeResult<()> {
    let dim = rows[0].len();
    if dim == 0 {
        return Err(StrokeposeError::catalog(format!("{name} rows must be non-empty")));
    }
    for (i, row) in rows.iter().enumerate() {
        if row.len() != dim {
            return Err(StrokeposeError::catalog(format!(
                "{name}[{i}] has dimension {}, expected {dim}",
                row.len()
            )));
        }
        if row.iter().any(|v| !v.is_finite()) {
            return Err(StrokeposeError::catalog(format!(
                "{name}[{i}] contains a non-finite value"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/model.rs"]
mod tests;
