//! Trail image discovery and injection.

use std::path::{Path, PathBuf};

use image::GenericImageView;
use tracing::{info, warn};
use vitrine_platform::{Document, ElementId, FxError, Result};

pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "avif"];

#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    pub path: PathBuf,
    /// Source string handed to the document.
    pub src: String,
    /// `None` when the image could not be decoded.
    pub dimensions: Option<(u32, u32)>,
}

#[derive(Debug, Clone, Default)]
pub struct AssetManifest {
    assets: Vec<Asset>,
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

fn decode(path: &Path) -> Result<(u32, u32)> {
    let decoded = image::open(path).map_err(|e| FxError::AssetDecode {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(decoded.dimensions())
}

impl AssetManifest {
    pub fn new(assets: Vec<Asset>) -> Self {
        Self { assets }
    }

    /// Scan `dir` (non-recursive) for images, sorted by file name. Images
    /// that fail to decode are kept without dimensions.
    pub fn discover(dir: &Path) -> Result<Self> {
        let entries = std::fs::read_dir(dir).map_err(|source| FxError::AssetDir {
            path: dir.display().to_string(),
            source,
        })?;
        let mut paths = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && is_image(&path) {
                paths.push(path);
            }
        }
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        let assets: Vec<Asset> = paths
            .into_iter()
            .map(|path| {
                let dimensions = match decode(&path) {
                    Ok(dimensions) => Some(dimensions),
                    Err(err) => {
                        warn!("{err}; inserting undecoded");
                        None
                    }
                };
                Asset {
                    src: path.display().to_string(),
                    path,
                    dimensions,
                }
            })
            .collect();
        info!("discovered {} trail images in {}", assets.len(), dir.display());
        Ok(Self { assets })
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn favicon(&self) -> Option<&Asset> {
        self.assets.first()
    }

    /// Insert every asset into `container` in manifest order and return the
    /// created element handles.
    pub fn inject(&self, document: &mut dyn Document, container: ElementId) -> Vec<ElementId> {
        self.assets
            .iter()
            .map(|asset| document.insert_image(container, &asset.src))
            .collect()
    }

    /// Point the favicon at the first discovered image.
    pub fn apply_favicon(&self, document: &mut dyn Document) {
        if let Some(first) = self.favicon() {
            document.set_favicon(&first.src);
        }
    }
}
