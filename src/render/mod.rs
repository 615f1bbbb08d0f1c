//! Renderer-facing contracts.

pub mod vertex;

pub use vertex::{AttributeSlot, BufferSlot, DrawableVertex, TextureSlot};
