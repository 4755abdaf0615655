//! Photo discovery on disk and best-fit selection per display width.

pub mod index;
pub mod links;
pub mod select;

pub use index::{merge_photos, PhotoIndex};
pub use links::PhotoLinks;
pub use select::{is_url, pick_best_image, HeaderProbe, ImageProbe, ProbeOutcome};
