use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::{DETAIL_IMAGE_WIDTH, LIST_IMAGE_WIDTH};
use crate::error::{CatalogError, Result};

pub const CONFIG_FILE: &str = "config.toml";
pub const CATALOG_FILE: &str = "devices.json";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub server: ServerConfig,
    pub images: ImageConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub data_dir: PathBuf,
    /// Defaults to `<data_dir>/images`
    pub images_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub list_width: u32,
    pub detail_width: u32,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            images_dir: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: PathBuf::from("static"),
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            list_width: LIST_IMAGE_WIDTH,
            detail_width: DETAIL_IMAGE_WIDTH,
        }
    }
}

impl Config {
    /// Loads `config.toml` from the working directory when present, then applies
    /// environment overrides (`SUBSIDY_DATA_DIR`, `SUBSIDY_IMAGES_DIR`, `PORT`).
    pub fn load() -> Result<Self> {
        let mut config = if Path::new(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            debug!("No {} found, using defaults", CONFIG_FILE);
            Self::default()
        };
        config.apply_env()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CatalogError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(dir) = env::var("SUBSIDY_DATA_DIR") {
            self.data.data_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = env::var("SUBSIDY_IMAGES_DIR") {
            self.data.images_dir = Some(PathBuf::from(dir));
        }
        if let Ok(port) = env::var("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| CatalogError::Config(format!("PORT is not a valid port: {}", port)))?;
        }
        Ok(())
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.data.data_dir.join(CATALOG_FILE)
    }

    pub fn images_dir(&self) -> PathBuf {
        self.data
            .images_dir
            .clone()
            .unwrap_or_else(|| self.data.data_dir.join("images"))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
