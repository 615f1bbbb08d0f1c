//! Error Types
//!
//! All public APIs that can fail return [`Result<T>`], an alias for
//! `std::result::Result<T, MarionetteError>`.
//!
//! Two failure classes exist:
//! - Load errors (`IoError`, `JsonError`, `ModelLoadError`): fatal to model
//!   construction, no partial model is returned.
//! - `DrawableIndexOutOfBounds`: a caller programming error on a per-drawable
//!   accessor. Accessors fail fast and never clamp; a failed call has no
//!   side effect on model or change-flag state.

use thiserror::Error;

/// The main error type for the marionette crate.
#[derive(Error, Debug)]
pub enum MarionetteError {
    // ========================================================================
    // Load Errors
    // ========================================================================
    /// File I/O error while reading the model manifest.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The model manifest is not valid JSON.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The asset is readable but structurally invalid (bad buffer shapes,
    /// out-of-range texture or mask references, zero drawables).
    #[error("Model load error: {0}")]
    ModelLoadError(String),

    // ========================================================================
    // Accessor Errors
    // ========================================================================
    /// A per-drawable accessor was called with an index outside
    /// `[0, drawable_count)`.
    #[error("Drawable index out of bounds: {index} (drawable count: {count})")]
    DrawableIndexOutOfBounds {
        /// The invalid index.
        index: usize,
        /// The model's drawable count.
        count: usize,
    },
}

/// Alias for `Result<T, MarionetteError>`.
pub type Result<T> = std::result::Result<T, MarionetteError>;
