use askama::Template;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::ImageFormat;
use std::fs;
use std::path::Path;
use tracing::warn;

use super::{DeviceSheet, DocumentRenderer, SheetImage};
use crate::error::{CatalogError, Result};
use crate::photos::is_url;
use crate::types::Citation;

#[derive(Template)]
#[template(path = "print_sheet.html")]
struct PrintSheetTemplate<'a> {
    title: &'a str,
    image: Option<PrintImage>,
    funding_lines: &'a [String],
    eligibility: &'a [String],
    city_differences: &'a [String],
    sources: &'a [Citation],
    no_source_notice: Option<&'static str>,
}

struct PrintImage {
    src: String,
    style: String,
}

/// Single-page printable A4 HTML sheet. Local images are embedded as
/// `data:` URIs so the saved file opens anywhere.
#[derive(Debug, Clone, Default)]
pub struct PrintSheetRenderer;

impl PrintSheetRenderer {
    fn print_image(&self, img: &SheetImage) -> Option<PrintImage> {
        let src = if is_url(&img.photo) {
            img.photo.clone()
        } else {
            match embed_image(Path::new(&img.photo)) {
                Ok(uri) => uri,
                Err(e) => {
                    warn!("Leaving image {} off the sheet: {}", img.photo, e);
                    return None;
                }
            }
        };
        let style = match img.size {
            Some((w, h)) => format!("width:{:.1}pt;height:{:.1}pt", w, h),
            None => "max-width:100%;height:auto".to_string(),
        };
        Some(PrintImage { src, style })
    }
}

/// Reads a local image into a base64 `data:` URI.
pub fn embed_image(path: &Path) -> Result<String> {
    let mime = ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or("application/octet-stream");
    let bytes = fs::read(path)?;
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

impl DocumentRenderer for PrintSheetRenderer {
    fn content_type(&self) -> &'static str {
        "text/html; charset=utf-8"
    }

    fn file_extension(&self) -> &'static str {
        "html"
    }

    fn render(&self, sheet: &DeviceSheet) -> Result<Vec<u8>> {
        let template = PrintSheetTemplate {
            title: &sheet.title,
            image: sheet.image.as_ref().and_then(|img| self.print_image(img)),
            funding_lines: &sheet.funding_lines,
            eligibility: &sheet.eligibility,
            city_differences: &sheet.city_differences,
            sources: &sheet.sources,
            no_source_notice: sheet.no_source_notice(),
        };
        let html = template
            .render()
            .map_err(|e| CatalogError::Render(e.to_string()))?;
        Ok(html.into_bytes())
    }
}
