use qrcode::render::svg;
use qrcode::QrCode;

use crate::error::{CatalogError, Result};
use crate::types::Device;

/// The single link shared for a device: the first city notice, then the first
/// authored document or source URL, then a descriptive string naming the device.
pub fn canonical_link(device: &Device) -> String {
    let city = device
        .city_specifics
        .iter()
        .filter_map(|c| c.source_url.as_deref());
    let authored = device
        .documents
        .iter()
        .chain(&device.sources)
        .filter_map(|s| s.url.as_deref());

    city.chain(authored)
        .map(str::trim)
        .find(|url| !url.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Assistive: {}", device.name))
}

/// Turns a link into a scannable image.
pub trait LinkEncoder: Send + Sync {
    fn content_type(&self) -> &'static str;
    fn encode(&self, link: &str) -> Result<Vec<u8>>;
}

/// QR code rendered as SVG.
#[derive(Debug, Clone, Copy)]
pub struct QrSvgEncoder {
    pub min_size: u32,
}

impl Default for QrSvgEncoder {
    fn default() -> Self {
        Self { min_size: 240 }
    }
}

impl LinkEncoder for QrSvgEncoder {
    fn content_type(&self) -> &'static str {
        "image/svg+xml"
    }

    fn encode(&self, link: &str) -> Result<Vec<u8>> {
        let code = QrCode::new(link.as_bytes()).map_err(|e| CatalogError::Encode(e.to_string()))?;
        let image = code
            .render::<svg::Color>()
            .min_dimensions(self.min_size, self.min_size)
            .build();
        Ok(image.into_bytes())
    }
}
