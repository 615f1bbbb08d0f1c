//! Vertex contract.
//!
//! The fixed binary interface between façade output and the GPU pipeline:
//! per-vertex attribute layout plus the bind slot numbering for uniform
//! buffers and textures. Any change to attribute order or slot indices is a
//! breaking change for every shader compiled against this contract.

use bytemuck::{Pod, Zeroable};

use crate::raw::RawFloats;

/// One vertex as the drawable pipeline consumes it.
///
/// Opacity is uniform per drawable but passed per-vertex so the shader stays
/// a plain attribute fetch.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct DrawableVertex {
    /// Model-space position.
    pub position: [f32; 2],
    /// Texture coordinate.
    pub uv: [f32; 2],
    /// Drawable opacity, `0..=1`.
    pub opacity: f32,
}

impl DrawableVertex {
    /// Attribute layout, locations matching [`AttributeSlot`].
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2, 2 => Float32];

    /// Vertex buffer layout for pipelines taking the interleaved stream.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Vertex-stage buffer bind slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum BufferSlot {
    /// Model/view transform uniform.
    Transform = 0,
    /// Vertex position stream.
    Position = 1,
    /// Vertex UV stream.
    Uv = 2,
    /// Opacity scalar.
    Opacity = 3,
}

/// Shader attribute locations within [`DrawableVertex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum AttributeSlot {
    Position = 0,
    Uv = 1,
    Opacity = 2,
}

/// Fragment-stage texture bind slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum TextureSlot {
    /// The drawable's diffuse texture.
    Diffuse = 0,
    /// The stencil mask rendered from the drawable's mask list.
    Mask = 1,
}

impl BufferSlot {
    #[inline]
    pub const fn index(self) -> u32 {
        self as u32
    }
}

impl AttributeSlot {
    #[inline]
    pub const fn index(self) -> u32 {
        self as u32
    }
}

impl TextureSlot {
    #[inline]
    pub const fn index(self) -> u32 {
        self as u32
    }
}

/// Builds the interleaved vertex stream for one drawable, for renderers that
/// prefer a single vertex buffer over the separate position/UV streams.
///
/// `positions` and `uvs` are pair-packed and must be the same length
/// (guaranteed for model-sourced views by load-time validation). Debug
/// builds assert on a mismatch; release builds truncate to the shorter
/// stream.
pub fn interleave(positions: RawFloats<'_>, uvs: RawFloats<'_>, opacity: f32) -> Vec<DrawableVertex> {
    debug_assert_eq!(
        positions.count(),
        uvs.count(),
        "position and UV streams must be the same length"
    );
    positions
        .as_slice()
        .chunks_exact(2)
        .zip(uvs.as_slice().chunks_exact(2))
        .map(|(p, t)| DrawableVertex {
            position: [p[0], p[1]],
            uv: [t[0], t[1]],
            opacity,
        })
        .collect()
}
