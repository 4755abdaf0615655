//! Per-device document export.
//!
//! [`DeviceSheet`] fixes what a printed page contains and in which order;
//! a [`DocumentRenderer`] turns it into bytes.

pub mod print;
pub mod sheet;

pub use print::PrintSheetRenderer;
pub use sheet::{DeviceSheet, SheetImage, PAGE_CONTENT_WIDTH_PT};

use crate::error::Result;

/// Produces one document per call.
pub trait DocumentRenderer: Send + Sync {
    fn content_type(&self) -> &'static str;
    fn file_extension(&self) -> &'static str;
    fn render(&self, sheet: &DeviceSheet) -> Result<Vec<u8>>;

    fn file_name(&self, sheet: &DeviceSheet) -> String {
        format!("{}.{}", sheet.device_id, self.file_extension())
    }
}
