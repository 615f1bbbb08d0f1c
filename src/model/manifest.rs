//! Model manifest.
//!
//! The small JSON description that ties a model together on disk: the
//! ordered texture list and an optional physics-settings file. The mesh data
//! itself lives in the engine-specific model file and is opaque to this
//! crate; the manifest only carries what the façade serves to the renderer.
//!
//! ```json
//! {
//!     "version": 1,
//!     "textures": ["textures/body.png", "textures/face.png"],
//!     "physics": "model.physics.json"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{MarionetteError, Result};

/// Parsed model manifest.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ModelManifest {
    /// Manifest format version.
    pub version: u32,
    /// Texture asset paths, relative to the manifest file. Order matters:
    /// drawables reference entries by index.
    pub textures: Vec<String>,
    /// Optional physics-settings file, relative to the manifest file.
    /// Consumed by the external physics collaborator, not by this crate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physics: Option<String>,
}

/// Highest manifest version this crate understands.
pub const SUPPORTED_MANIFEST_VERSION: u32 = 1;

impl ModelManifest {
    /// Reads and parses the manifest at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let manifest: Self = serde_json::from_str(&text)?;
        if manifest.version > SUPPORTED_MANIFEST_VERSION {
            return Err(MarionetteError::ModelLoadError(format!(
                "unsupported manifest version {} (max supported: {})",
                manifest.version, SUPPORTED_MANIFEST_VERSION
            )));
        }
        Ok(manifest)
    }

    /// Texture paths resolved against `base_dir` (normally the manifest's
    /// parent directory), preserving order.
    pub fn resolved_texture_urls(&self, base_dir: &Path) -> Vec<String> {
        self.textures
            .iter()
            .map(|t| base_dir.join(t).to_string_lossy().into_owned())
            .collect()
    }

    /// Physics-settings path resolved against `base_dir`, if declared.
    pub fn resolved_physics_path(&self, base_dir: &Path) -> Option<PathBuf> {
        self.physics.as_ref().map(|p| base_dir.join(p))
    }
}
