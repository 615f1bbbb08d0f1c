//! External engine seam.
//!
//! The deformation math, physics simulation, and model-file parsing live in
//! an external model-computation engine. The façade consumes that engine
//! through [`ModelBackend`]: static topology once at load, then one
//! [`update`](ModelBackend::update) per frame followed by borrowed reads of
//! the dynamic state. The façade never interprets parameters itself.

use glam::Vec2;
use smallvec::SmallVec;

use crate::model::drawable::BlendMode;

/// Load-time static description of one drawable mesh part.
///
/// Everything here is fixed for the model's lifetime: topology, texture
/// binding, mask references and draw state never change after load. Only the
/// dynamic attributes read back through [`ModelBackend`] mutate per frame.
#[derive(Debug, Clone)]
pub struct DrawableTopology {
    /// Rest-pose vertex positions, pair-packed (`2 * vertex_count` floats).
    pub vertex_positions: Vec<f32>,
    /// Texture coordinates, parallel to `vertex_positions`.
    pub vertex_uvs: Vec<f32>,
    /// Triangle-list indices into the position buffer (length `% 3 == 0`).
    pub vertex_indices: Vec<u16>,
    /// Which entry of the model's texture list this drawable samples.
    pub texture_index: usize,
    /// Drawable indices rendered into this drawable's stencil mask.
    /// Empty if unmasked.
    pub masks: SmallVec<[i32; 4]>,
    /// Whether back-face culling is enabled for this drawable.
    pub is_culling_enabled: bool,
    /// Fixed blend mode.
    pub blend_mode: BlendMode,
}

impl DrawableTopology {
    /// Number of vertices described by the position buffer.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_positions.len() / 2
    }
}

/// The external model-computation engine driving a loaded model.
///
/// Contract:
/// - `drawable_count` and every `drawable_topology` are fixed after
///   construction.
/// - Dynamic reads (`vertex_positions`, `opacity`, `visibility`,
///   `render_order`) are valid immediately after construction (rest pose,
///   deterministic defaults) and reflect the latest `update` afterwards.
/// - Slices returned by `vertex_positions` keep a stable length for a given
///   drawable.
/// - `set_parameter` stages a value; it takes effect at the next `update`.
///   Physics output staged by `update_physics` is blended into the same
///   parameter set.
///
/// All calls happen on one logical frame-update thread; implementations do
/// not need internal synchronization.
pub trait ModelBackend {
    /// Static canvas dimensions of the model.
    fn canvas_size(&self) -> Vec2;

    /// Number of drawables; stable for the model's lifetime.
    fn drawable_count(&self) -> usize;

    /// Static topology for drawable `index`. Called once per drawable at
    /// load; `index` is guaranteed `< drawable_count()`.
    fn drawable_topology(&self, index: usize) -> DrawableTopology;

    /// Stages a named scalar parameter value.
    fn set_parameter(&mut self, name: &str, value: f32);

    /// Advances the physics simulation by `dt` seconds (`dt >= 0`) and
    /// blends its output into the parameter set.
    fn update_physics(&mut self, dt: f32);

    /// Applies the staged parameter set, recomputing all dynamic state.
    fn update(&mut self);

    /// Current deformed vertex positions for drawable `index`, pair-packed.
    fn vertex_positions(&self, index: usize) -> &[f32];

    /// Current opacity for drawable `index`, in `0..=1`.
    fn opacity(&self, index: usize) -> f32;

    /// Current visibility for drawable `index`.
    fn visibility(&self, index: usize) -> bool;

    /// Current paint-order priority for drawable `index`. Externally
    /// assigned; not necessarily a permutation of `0..drawable_count`.
    fn render_order(&self, index: usize) -> i32;
}
