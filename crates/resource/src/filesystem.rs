//! Filesystem-based resource provider.
//!
//! Stored cover paths are URL-like (`/uploads/cover.png`). They are resolved
//! against an asset root directory, and every resolved path must stay inside
//! that root.

use quire_traits::{ResourceError, ResourceProvider, SharedResourceData};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Loads book assets from a directory on the local filesystem.
#[derive(Debug)]
pub struct FilesystemResourceProvider {
    base_path: PathBuf,
    /// Canonicalized base path for containment checks
    canonical_base: Option<PathBuf>,
}

impl FilesystemResourceProvider {
    /// Creates a provider rooted at `base_path`.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        let base = base_path.as_ref().to_path_buf();
        // May fail if the directory does not exist yet; checked again per lookup
        let canonical = base.canonicalize().ok();
        Self {
            base_path: base,
            canonical_base: canonical,
        }
    }

    pub fn base(&self) -> &Path {
        &self.base_path
    }

    /// Maps a stored path onto the asset root.
    ///
    /// Returns `None` if the path would escape the root.
    fn resolve_path_safe(&self, stored: &str) -> Option<PathBuf> {
        // "/uploads/x.png" is root-relative, not a host path
        let relative = stored.trim_start_matches(['/', '\\']);
        if relative.is_empty() {
            return None;
        }
        let relative_path = Path::new(relative);
        if relative_path.is_absolute() || relative_path.has_root() {
            return None;
        }
        if relative_path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            return None;
        }

        let full_path = self.base_path.join(relative_path);

        if let Ok(canonical) = full_path.canonicalize()
            && let Some(ref base) = self.canonical_base
        {
            if canonical.starts_with(base) {
                return Some(canonical);
            }
            // Symlink pointing outside the asset root
            return None;
        }

        Some(full_path)
    }
}

impl ResourceProvider for FilesystemResourceProvider {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let full_path = self.resolve_path_safe(path).ok_or_else(|| {
            ResourceError::NotFound(format!("{} (outside asset root)", path))
        })?;

        log::debug!("Loading asset '{}' from {}", path, full_path.display());

        std::fs::read(&full_path).map(Arc::new).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ResourceError::NotFound(path.to_string())
            } else {
                ResourceError::LoadFailed {
                    path: path.to_string(),
                    message: e.to_string(),
                }
            }
        })
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve_path_safe(path)
            .map(|p| p.is_file())
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "FilesystemResourceProvider"
    }
}
