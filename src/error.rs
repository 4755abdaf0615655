use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Duplicate device id in catalog: {0}")]
    DuplicateId(String),

    #[error("Device {id} has ratio cap {ratio} outside 0..=1")]
    InvalidRatio { id: String, ratio: f64 },

    #[error("Document rendering failed: {0}")]
    Render(String),

    #[error("Link encoding failed: {0}")]
    Encode(String),

    #[error("Catalog cache lock poisoned")]
    CachePoisoned,
}

pub type Result<T> = std::result::Result<T, CatalogError>;
