use std::sync::Arc;

use crate::cache::CatalogCache;
use crate::config::{Config, ImageConfig};
use crate::export::{DocumentRenderer, PrintSheetRenderer};
use crate::photos::{HeaderProbe, ImageProbe, PhotoLinks};
use crate::share::{LinkEncoder, QrSvgEncoder};

pub const PHOTOS_MOUNT: &str = "/photos";

#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<CatalogCache>,
    pub probe: Arc<dyn ImageProbe>,
    pub renderer: Arc<dyn DocumentRenderer>,
    pub encoder: Arc<dyn LinkEncoder>,
    pub links: PhotoLinks,
    pub widths: ImageConfig,
}

impl AppState {
    pub fn new(cache: Arc<CatalogCache>, widths: ImageConfig) -> Self {
        let links = PhotoLinks::served(cache.images_dir(), PHOTOS_MOUNT);
        Self {
            probe: Arc::new(HeaderProbe),
            renderer: Arc::new(PrintSheetRenderer),
            encoder: Arc::new(QrSvgEncoder::default()),
            links,
            cache,
            widths,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(CatalogCache::from_config(config)), config.images.clone())
    }
}
