use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::catalog::model::{CatalogDef, ReferenceCatalog};
use crate::foundation::error::{StrokeposeError, StrokeposeResult};

/// File names inside a catalog directory, in load order.
pub const STROKE_EMBEDDINGS_FILE: &str = "stroke_embeddings.json";
/// See [`STROKE_EMBEDDINGS_FILE`].
pub const POSE_VECTORS_FILE: &str = "pose_vectors.json";
/// See [`STROKE_EMBEDDINGS_FILE`].
pub const POSE_CENTROIDS_FILE: &str = "pose_centroids.json";

/// One step of a progressive catalog load.
#[derive(Debug)]
pub enum LoadEvent {
    /// Fraction of the load completed, in `[0, 1]`, non-decreasing.
    Progress(f64),
    /// Terminal event carrying the validated catalog.
    Ready(ReferenceCatalog),
}

#[derive(Clone, Debug)]
enum Source {
    Directory(PathBuf),
    File(PathBuf),
}

/// Progressive catalog loader.
///
/// Iterating yields `Progress` events after each unit of work, then exactly one `Ready`. The
/// first error ends the iteration.
#[derive(Debug)]
pub struct CatalogLoader {
    source: Source,
    step: usize,
    tables: Vec<Vec<Vec<f64>>>,
    done: bool,
}

impl CatalogLoader {
    /// Load from a directory holding the three table files, or from a single `catalog.json`.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let source = if path.is_dir() {
            Source::Directory(path)
        } else {
            Source::File(path)
        };
        Self {
            source,
            step: 0,
            tables: Vec::with_capacity(3),
            done: false,
        }
    }

    /// Drive the load to completion, reporting each progress value.
    pub fn load_with_progress(
        self,
        mut on_progress: impl FnMut(f64),
    ) -> StrokeposeResult<ReferenceCatalog> {
        for event in self {
            match event? {
                LoadEvent::Progress(p) => on_progress(p),
                LoadEvent::Ready(catalog) => return Ok(catalog),
            }
        }
        Err(StrokeposeError::catalog("catalog load ended without a catalog"))
    }

    fn advance(&mut self) -> StrokeposeResult<Option<LoadEvent>> {
        match self.source.clone() {
            Source::Directory(dir) => self.advance_directory(&dir),
            Source::File(file) => self.advance_file(&file),
        }
    }

    fn advance_directory(&mut self, dir: &Path) -> StrokeposeResult<Option<LoadEvent>> {
        const FILES: [&str; 3] = [STROKE_EMBEDDINGS_FILE, POSE_VECTORS_FILE, POSE_CENTROIDS_FILE];

        if let Some(name) = FILES.get(self.step) {
            let table: Vec<Vec<f64>> = read_json(&dir.join(name))?;
            tracing::debug!(file = name, rows = table.len(), "catalog table loaded");
            self.tables.push(table);
            self.step += 1;
            return Ok(Some(LoadEvent::Progress(
                self.step as f64 / FILES.len() as f64,
            )));
        }
        if self.step == FILES.len() {
            self.step += 1;
            return Ok(Some(LoadEvent::Ready(self.take_catalog()?)));
        }
        Ok(None)
    }

    fn advance_file(&mut self, file: &Path) -> StrokeposeResult<Option<LoadEvent>> {
        match self.step {
            0 => {
                let def: CatalogDef = read_json(file)?;
                self.tables = vec![def.stroke_embeddings, def.pose_vectors, def.pose_centroids];
                self.step = 1;
                Ok(Some(LoadEvent::Progress(1.0)))
            }
            1 => {
                self.step = 2;
                Ok(Some(LoadEvent::Ready(self.take_catalog()?)))
            }
            _ => Ok(None),
        }
    }

    fn take_catalog(&mut self) -> StrokeposeResult<ReferenceCatalog> {
        let mut tables = std::mem::take(&mut self.tables).into_iter();
        let (Some(strokes), Some(poses), Some(centroids)) =
            (tables.next(), tables.next(), tables.next())
        else {
            return Err(StrokeposeError::catalog("catalog tables missing"));
        };
        ReferenceCatalog::new(strokes, poses, centroids)
    }
}

impl Iterator for CatalogLoader {
    type Item = StrokeposeResult<LoadEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.advance() {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> StrokeposeResult<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read catalog file '{}'", path.display()))?;
    serde_json::from_str(&text)
        .map_err(|e| StrokeposeError::serde(format!("{}: {e}", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/loader.rs"]
mod tests;
