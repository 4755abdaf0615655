use std::cmp::Reverse;
use std::path::Path;
use tracing::debug;

use crate::constants::URL_PREFIXES;

/// Result of reading an image header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Measured { width: u32, height: u32 },
    Unreadable(String),
}

impl ProbeOutcome {
    pub fn width(&self) -> Option<u32> {
        match self {
            ProbeOutcome::Measured { width, .. } => Some(*width),
            ProbeOutcome::Unreadable(_) => None,
        }
    }
}

/// Reads pixel dimensions of local image files.
pub trait ImageProbe: Send + Sync {
    fn probe(&self, path: &Path) -> ProbeOutcome;
}

/// Probes by decoding only the image header.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderProbe;

impl ImageProbe for HeaderProbe {
    fn probe(&self, path: &Path) -> ProbeOutcome {
        match image::image_dimensions(path) {
            Ok((width, height)) => ProbeOutcome::Measured { width, height },
            Err(e) => ProbeOutcome::Unreadable(e.to_string()),
        }
    }
}

pub fn is_url(photo: &str) -> bool {
    let lower = photo.to_lowercase();
    URL_PREFIXES.iter().any(|prefix| lower.starts_with(prefix))
}

/// Picks the photo whose width is closest to `target_width`.
///
/// URLs cannot be measured: if every candidate is a URL the first one wins.
/// Local files are ranked by distance to the target, then by being at least
/// as wide as the target, then by width, keeping the earlier candidate on a
/// full tie. Files that cannot be measured are skipped; if none can be
/// measured the first local file is returned.
pub fn pick_best_image<'a>(
    photos: &'a [String],
    target_width: u32,
    probe: &dyn ImageProbe,
) -> Option<&'a str> {
    let first = photos.first()?;

    let local: Vec<&'a str> = photos
        .iter()
        .map(String::as_str)
        .filter(|p| !is_url(p))
        .collect();
    let Some(&first_local) = local.first() else {
        return Some(first.as_str());
    };

    let best = local
        .iter()
        .filter_map(|&path| match probe.probe(Path::new(path)) {
            ProbeOutcome::Measured { width, .. } => Some((width, path)),
            ProbeOutcome::Unreadable(reason) => {
                debug!("Skipping unreadable photo {}: {}", path, reason);
                None
            }
        })
        .min_by_key(|&(width, _)| {
            (
                width.abs_diff(target_width),
                width < target_width,
                Reverse(width),
            )
        })
        .map(|(_, path)| path);

    Some(best.unwrap_or(first_local))
}
