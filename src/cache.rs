use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::info;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::{CatalogError, Result};
use crate::photos::PhotoIndex;

/// Catalog and photo index built from one read of the data directory.
#[derive(Debug)]
pub struct Snapshot {
    pub catalog: Catalog,
    pub photos: PhotoIndex,
}

impl Snapshot {
    pub fn load(catalog_path: &Path, images_dir: &Path) -> Result<Self> {
        let photos = PhotoIndex::build(images_dir);
        let catalog = Catalog::load(catalog_path, &photos)?;
        Ok(Self { catalog, photos })
    }
}

/// Process-wide, read-mostly cache of the data directory.
///
/// The first [`get`](Self::get) builds the snapshot; [`invalidate`](Self::invalidate)
/// drops it so the next access rebuilds both catalog and photo index.
#[derive(Debug)]
pub struct CatalogCache {
    catalog_path: PathBuf,
    images_dir: PathBuf,
    current: RwLock<Option<Arc<Snapshot>>>,
}

impl CatalogCache {
    pub fn new(catalog_path: impl Into<PathBuf>, images_dir: impl Into<PathBuf>) -> Self {
        Self {
            catalog_path: catalog_path.into(),
            images_dir: images_dir.into(),
            current: RwLock::new(None),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.catalog_path(), config.images_dir())
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    pub fn get(&self) -> Result<Arc<Snapshot>> {
        {
            let current = self.current.read().map_err(|_| CatalogError::CachePoisoned)?;
            if let Some(snapshot) = current.as_ref() {
                return Ok(Arc::clone(snapshot));
            }
        }

        let mut current = self.current.write().map_err(|_| CatalogError::CachePoisoned)?;
        if let Some(snapshot) = current.as_ref() {
            return Ok(Arc::clone(snapshot));
        }
        let snapshot = Arc::new(Snapshot::load(&self.catalog_path, &self.images_dir)?);
        *current = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    pub fn invalidate(&self) -> Result<()> {
        let mut current = self.current.write().map_err(|_| CatalogError::CachePoisoned)?;
        *current = None;
        info!("Catalog cache cleared");
        Ok(())
    }
}
