use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::constants::{IMAGE_EXTENSIONS, PHOTO_ID_SEPARATOR};

/// Device id → discovered local image paths, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhotoIndex {
    entries: BTreeMap<String, Vec<String>>,
}

impl PhotoIndex {
    /// Scans `root` using two conventions:
    ///
    /// * every immediate subdirectory names a device; all images beneath it
    ///   (recursively, sorted by path) belong to that device;
    /// * every image directly in `root` whose stem contains `-` belongs to the
    ///   device named by the part before the first `-`.
    ///
    /// A missing root yields an empty index.
    pub fn build(root: &Path) -> Self {
        if !root.is_dir() {
            info!("Images directory {} not found, no photos discovered", root.display());
            return Self::default();
        }

        let entries = match fs::read_dir(root) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Could not read images directory {}: {}", root.display(), e);
                return Self::default();
            }
        };

        let mut subdirs = Vec::new();
        let mut loose_files = Vec::new();
        for entry in entries.filter_map(|e| e.ok()) {
            let path = entry.path();
            if path.is_dir() {
                subdirs.push(path);
            } else if path.is_file() && is_image(&path) {
                loose_files.push(path);
            }
        }
        subdirs.sort();
        loose_files.sort();

        let mut index: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for dir in &subdirs {
            let Some(device_id) = dir.file_name().map(|n| n.to_string_lossy().into_owned()) else {
                continue;
            };
            let mut files: Vec<PathBuf> = WalkDir::new(dir)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
                .map(|e| e.into_path())
                .filter(|p| p.is_file() && is_image(p))
                .collect();
            if files.is_empty() {
                continue;
            }
            files.sort();
            index
                .entry(device_id)
                .or_default()
                .extend(files.iter().map(|p| path_string(p)));
        }

        for file in &loose_files {
            let Some(device_id) = prefix_id(file) else {
                continue;
            };
            index.entry(device_id).or_default().push(path_string(file));
        }

        for paths in index.values_mut() {
            *paths = dedupe(std::mem::take(paths));
        }

        debug!(
            "Indexed photos for {} devices under {}",
            index.len(),
            root.display()
        );
        Self { entries: index }
    }

    pub fn get(&self, device_id: &str) -> &[String] {
        self.entries
            .get(device_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Discovered photos first, then authored ones; first occurrence wins.
pub fn merge_photos(discovered: &[String], authored: &[String]) -> Vec<String> {
    dedupe(discovered.iter().chain(authored).cloned().collect())
}

pub fn is_image(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .map_or(false, |ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

fn prefix_id(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_string_lossy();
    let (prefix, _) = stem.split_once(PHOTO_ID_SEPARATOR)?;
    if prefix.is_empty() {
        return None;
    }
    Some(prefix.to_string())
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn dedupe(paths: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    paths.into_iter().filter(|p| seen.insert(p.clone())).collect()
}
