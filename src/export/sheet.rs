use std::path::Path;

use crate::citations::collect_sources;
use crate::constants::{MISSING_VALUE, NO_SOURCE_DOCUMENT};
use crate::format::{format_currency, percent, years};
use crate::photos::{is_url, pick_best_image, ImageProbe, ProbeOutcome};
use crate::types::{Citation, Device};

/// A4 width minus 20mm margins on both sides, in points.
pub const PAGE_CONTENT_WIDTH_PT: f32 = 595.28 - 2.0 * 56.69;

/// Representative image placed on the sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetImage {
    pub photo: String,
    /// Display size in points once scaled to the page width; unknown for URLs.
    pub size: Option<(f32, f32)>,
}

/// Everything a document renderer prints for one device, in print order.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceSheet {
    pub device_id: String,
    pub title: String,
    pub image: Option<SheetImage>,
    pub funding_lines: Vec<String>,
    pub eligibility: Vec<String>,
    pub city_differences: Vec<String>,
    pub sources: Vec<Citation>,
}

impl DeviceSheet {
    pub fn build(device: &Device, target_width: u32, probe: &dyn ImageProbe) -> Self {
        let funding = &device.funding;
        let funding_lines = vec![
            format!("金額上限：{}", format_currency(funding.amount_cap)),
            format!("補助比例：{}", percent(funding.ratio_cap)),
            format!("使用年限：{}", years(device.lifespan_years)),
        ];

        let city_differences = device
            .city_specifics
            .iter()
            .map(|c| {
                let f = c.funding.clone().unwrap_or_default();
                format!(
                    "{} / {} - 上限 {}，比例 {}",
                    c.city,
                    c.program.as_deref().unwrap_or(MISSING_VALUE),
                    format_currency(f.amount_cap),
                    percent(f.ratio_cap)
                )
            })
            .collect();

        Self {
            device_id: device.id.clone(),
            title: device.name.clone(),
            image: sheet_image(&device.photos, target_width, probe),
            funding_lines,
            eligibility: device.eligibility.clone(),
            city_differences,
            sources: collect_sources(device),
        }
    }

    pub fn no_source_notice(&self) -> Option<&'static str> {
        self.sources.is_empty().then_some(NO_SOURCE_DOCUMENT)
    }
}

/// Local images that cannot be measured are left off the page.
fn sheet_image(photos: &[String], target_width: u32, probe: &dyn ImageProbe) -> Option<SheetImage> {
    let photo = pick_best_image(photos, target_width, probe)?;
    if is_url(photo) {
        return Some(SheetImage {
            photo: photo.to_string(),
            size: None,
        });
    }
    match probe.probe(Path::new(photo)) {
        ProbeOutcome::Measured { width, height } if width > 0 => {
            let scale = (PAGE_CONTENT_WIDTH_PT / width as f32).min(1.0);
            Some(SheetImage {
                photo: photo.to_string(),
                size: Some((width as f32 * scale, height as f32 * scale)),
            })
        }
        _ => None,
    }
}
