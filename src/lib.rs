//! marionette — retained-mode 2D character model façade.
//!
//! Exposes a loaded 2D character model (drawable mesh parts driven by an
//! external deformation/physics engine) to a GPU renderer, tracking which
//! per-drawable attributes changed since the previous frame so the renderer
//! uploads only what it has to.

pub mod backend;
pub mod errors;
pub mod model;
pub mod raw;
pub mod render;

pub use backend::{DrawableTopology, ModelBackend};
pub use errors::{MarionetteError, Result};
pub use model::{BlendMode, DynamicFlags, Model, ModelManifest, ParameterTable};
pub use raw::{RawBuffer, RawFloats, RawInts, RawUShorts};
pub use render::vertex::{AttributeSlot, BufferSlot, DrawableVertex, TextureSlot};
