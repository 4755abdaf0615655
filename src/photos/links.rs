use std::path::{Path, PathBuf};

use super::select::is_url;
use crate::urls::encode_segment;

/// Maps photo entries to URLs under the web server's photo mount.
#[derive(Debug, Clone)]
pub struct PhotoLinks {
    images_dir: PathBuf,
    mount: String,
}

impl PhotoLinks {
    pub fn served(images_dir: impl Into<PathBuf>, mount: impl Into<String>) -> Self {
        Self {
            images_dir: images_dir.into(),
            mount: mount.into().trim_end_matches('/').to_string(),
        }
    }

    /// URLs pass through; local files become `{mount}/{encoded/relative/path}`.
    pub fn href(&self, photo: &str) -> String {
        if is_url(photo) {
            return photo.to_string();
        }
        let path = Path::new(photo);
        let relative = path.strip_prefix(&self.images_dir).unwrap_or(path);
        let segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .filter(|s| s != "/" && s != "." && s != "..")
            .map(|s| encode_segment(&s))
            .collect();
        format!("{}/{}", self.mount, segments.join("/"))
    }
}
