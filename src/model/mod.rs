//! Model façade.
//!
//! [`Model`] owns the runtime state of one loaded 2D character model and is
//! the renderer's single point of contact. Per frame, the external driver:
//!
//! 1. sets zero or more named parameters ([`Model::set_parameter`]),
//! 2. advances physics ([`Model::update_physics`]),
//! 3. recomputes drawable state ([`Model::update`]),
//! 4. queries per-drawable geometry, opacity, visibility and order — plus
//!    their change flags — and uploads only what changed.
//!
//! All calls belong to one logical frame-update thread; nothing here blocks
//! or synchronizes. Views returned by the accessors borrow the model, so the
//! borrow checker keeps them from outliving the next `update`.

pub mod drawable;
pub mod manifest;
pub mod parameters;

pub use drawable::{BlendMode, DynamicFlags};
pub use manifest::ModelManifest;
pub use parameters::ParameterTable;

use std::path::{Path, PathBuf};

use glam::Vec2;

use crate::backend::{DrawableTopology, ModelBackend};
use crate::errors::{MarionetteError, Result};
use crate::raw::{RawFloats, RawInts, RawUShorts};

use drawable::Drawable;

/// A loaded 2D character model: fixed drawable topology plus per-frame
/// dynamic state, with change tracking against the previous update.
pub struct Model {
    backend: Box<dyn ModelBackend>,
    canvas_size: Vec2,
    texture_urls: Vec<String>,
    physics_path: Option<PathBuf>,
    parameters: ParameterTable,
    drawables: Vec<Drawable>,
    /// Current paint order, one entry per drawable. Contiguous so
    /// [`Model::render_orders`] can hand out a zero-copy view.
    render_orders: Vec<i32>,
}

impl Model {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Loads a model: parses the manifest at `path` and pulls the fixed
    /// drawable topology out of `backend`.
    ///
    /// The backend wraps the external model-computation engine and has
    /// already parsed the engine-specific mesh data; this step only
    /// establishes the static arrays the façade serves afterwards, and
    /// validates them. On any failure no partial model is returned.
    pub fn load(path: impl AsRef<Path>, backend: Box<dyn ModelBackend>) -> Result<Self> {
        let path = path.as_ref();
        let manifest = ModelManifest::from_path(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let texture_urls = manifest.resolved_texture_urls(base_dir);
        let physics_path = manifest.resolved_physics_path(base_dir);

        let count = backend.drawable_count();
        if count == 0 {
            return Err(MarionetteError::ModelLoadError(
                "model has no drawables".to_string(),
            ));
        }

        let mut drawables = Vec::with_capacity(count);
        let mut render_orders = Vec::with_capacity(count);
        for index in 0..count {
            let topology = backend.drawable_topology(index);
            validate_topology(index, &topology, texture_urls.len(), count)?;

            let rest = backend.vertex_positions(index);
            if rest.len() != topology.vertex_positions.len() {
                return Err(MarionetteError::ModelLoadError(format!(
                    "drawable {index}: dynamic position count {} disagrees with topology ({})",
                    rest.len(),
                    topology.vertex_positions.len()
                )));
            }

            let mut d = Drawable::new(topology, backend.opacity(index), backend.visibility(index));
            d.positions.copy_from_slice(rest);
            drawables.push(d);
            render_orders.push(backend.render_order(index));
        }

        let canvas_size = backend.canvas_size();
        log::debug!(
            "Loaded model: {count} drawables, {} textures, canvas {}x{}",
            texture_urls.len(),
            canvas_size.x,
            canvas_size.y
        );

        Ok(Self {
            backend,
            canvas_size,
            texture_urls,
            physics_path,
            parameters: ParameterTable::new(),
            drawables,
            render_orders,
        })
    }

    // ========================================================================
    // Frame step
    // ========================================================================

    /// Upserts a named parameter and stages it in the engine. Unknown names
    /// create new entries. No geometric effect until [`Model::update`] runs.
    pub fn set_parameter(&mut self, name: &str, value: f32) {
        self.parameters.set(name, value);
        self.backend.set_parameter(name, value);
    }

    /// Advances the physics simulation by `dt` seconds and blends its output
    /// into the active parameter set. Side effect only; drawable state is
    /// not recomputed until [`Model::update`].
    ///
    /// `dt` must be finite and non-negative. Anything else is a caller
    /// contract violation and is clamped to `0.0` (with a warning) so that
    /// negative or NaN time never reaches the simulation.
    pub fn update_physics(&mut self, dt: f32) {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            log::warn!("update_physics called with invalid dt {dt}; clamping to 0");
            0.0
        };
        self.backend.update_physics(dt);
    }

    /// The authoritative per-frame recomputation step.
    ///
    /// Applies the staged parameter set (post-physics) to regenerate every
    /// drawable's positions, opacity, visibility and render order, then
    /// recomputes all four change flags by diffing against the previous
    /// update's snapshot, and commits the new state as the next baseline.
    ///
    /// Call exactly once per frame, before the first render query. The diff
    /// baseline is always the immediately preceding call: two consecutive
    /// updates with no parameter change in between read as "nothing
    /// changed" on the second call.
    #[allow(clippy::float_cmp, reason = "the diff against the previous snapshot is intentionally exact")]
    pub fn update(&mut self) {
        self.backend.update();

        for (index, d) in self.drawables.iter_mut().enumerate() {
            let positions = self.backend.vertex_positions(index);
            let positions_changed = positions != d.positions.as_slice();
            if positions_changed {
                d.positions.clear();
                d.positions.extend_from_slice(positions);
            }

            let opacity = self.backend.opacity(index);
            let opacity_changed = opacity != d.opacity;
            d.opacity = opacity;

            let visible = self.backend.visibility(index);
            let visibility_changed = visible != d.is_visible();

            let order = self.backend.render_order(index);
            let order_changed = order != self.render_orders[index];
            self.render_orders[index] = order;

            let mut flags = DynamicFlags::empty();
            flags.set(DynamicFlags::VISIBLE, visible);
            flags.set(DynamicFlags::VERTEX_POSITIONS_CHANGED, positions_changed);
            flags.set(DynamicFlags::OPACITY_CHANGED, opacity_changed);
            flags.set(DynamicFlags::VISIBILITY_CHANGED, visibility_changed);
            flags.set(DynamicFlags::RENDER_ORDER_CHANGED, order_changed);
            d.flags = flags;
        }
    }

    // ========================================================================
    // Model-level accessors
    // ========================================================================

    /// Static canvas dimensions, fixed at load.
    #[inline]
    pub fn canvas_size(&self) -> Vec2 {
        self.canvas_size
    }

    /// Number of drawables; stable for the model's lifetime.
    #[inline]
    pub fn drawable_count(&self) -> usize {
        self.drawables.len()
    }

    /// Current paint-order priorities, one per drawable, valid until the
    /// next [`Model::update`]. Drawable storage itself is never re-sorted:
    /// index `i` means the same mesh part on every frame, so mask references
    /// stay valid.
    #[inline]
    pub fn render_orders(&self) -> RawInts<'_> {
        RawInts::new(&self.render_orders)
    }

    /// Drawable indices stably sorted by current render order, back to
    /// front. Convenience for renderers that paint in priority order.
    pub fn sorted_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.drawables.len()).collect();
        indices.sort_by_key(|&i| self.render_orders[i]);
        indices
    }

    /// Ordered texture asset identifiers, fixed at load. Resolved relative
    /// to the manifest directory; the renderer turns these into GPU
    /// textures.
    #[inline]
    pub fn texture_urls(&self) -> &[String] {
        &self.texture_urls
    }

    /// Physics-settings file declared by the manifest, for the external
    /// physics collaborator.
    pub fn physics_settings_path(&self) -> Option<&Path> {
        self.physics_path.as_deref()
    }

    /// Last value written through [`Model::set_parameter`] for `name`, or
    /// `None` if never set. Values the physics simulation blends into the
    /// engine's parameter set are not reflected here.
    pub fn parameter_value(&self, name: &str) -> Option<f32> {
        self.parameters.get(name)
    }

    /// The table of explicit [`Model::set_parameter`] writes. This mirrors
    /// what the caller staged, not the engine's active parameter set:
    /// physics output bypasses it.
    pub fn parameters(&self) -> &ParameterTable {
        &self.parameters
    }

    // ========================================================================
    // Per-drawable accessors
    // ========================================================================

    /// Current pair-packed vertex positions of drawable `index`
    /// (`2 * vertex_count` floats).
    pub fn vertex_positions(&self, index: usize) -> Result<RawFloats<'_>> {
        Ok(RawFloats::new(&self.drawable(index)?.positions))
    }

    /// Triangle-list vertex indices of drawable `index`. Immutable topology;
    /// identical across every update.
    pub fn vertex_indices(&self, index: usize) -> Result<RawUShorts<'_>> {
        Ok(RawUShorts::new(&self.drawable(index)?.topology.vertex_indices))
    }

    /// Texture coordinates of drawable `index`, parallel to the positions.
    pub fn vertex_uvs(&self, index: usize) -> Result<RawFloats<'_>> {
        Ok(RawFloats::new(&self.drawable(index)?.topology.vertex_uvs))
    }

    /// Vertex count of drawable `index`.
    pub fn vertex_count(&self, index: usize) -> Result<usize> {
        Ok(self.drawable(index)?.topology.vertex_count())
    }

    /// Which entry of [`Model::texture_urls`] drawable `index` samples.
    pub fn texture_index(&self, index: usize) -> Result<usize> {
        Ok(self.drawable(index)?.topology.texture_index)
    }

    /// Drawable indices used to stencil-clip drawable `index`; empty if
    /// unmasked. Static.
    pub fn masks(&self, index: usize) -> Result<RawInts<'_>> {
        Ok(RawInts::new(self.drawable(index)?.topology.masks.as_slice()))
    }

    /// Number of mask drawables clipping drawable `index`.
    pub fn mask_count(&self, index: usize) -> Result<usize> {
        Ok(self.drawable(index)?.topology.masks.len())
    }

    /// Whether back-face culling is enabled for drawable `index`. Static.
    pub fn is_culling_enabled(&self, index: usize) -> Result<bool> {
        Ok(self.drawable(index)?.topology.is_culling_enabled)
    }

    /// Blend mode of drawable `index`. Static.
    pub fn blend_mode(&self, index: usize) -> Result<BlendMode> {
        Ok(self.drawable(index)?.topology.blend_mode)
    }

    /// Current opacity of drawable `index`, in `0..=1`. Deterministic (the
    /// engine's rest-pose value) even before the first update.
    pub fn opacity(&self, index: usize) -> Result<f32> {
        Ok(self.drawable(index)?.opacity)
    }

    /// Current visibility of drawable `index`.
    pub fn visibility(&self, index: usize) -> Result<bool> {
        Ok(self.drawable(index)?.is_visible())
    }

    // ========================================================================
    // Change flags
    // ========================================================================

    /// Whether drawable `index`'s render order changed at the last update.
    pub fn is_render_order_changed(&self, index: usize) -> Result<bool> {
        Ok(self
            .drawable(index)?
            .flags
            .contains(DynamicFlags::RENDER_ORDER_CHANGED))
    }

    /// Whether drawable `index`'s vertex positions changed at the last
    /// update.
    pub fn is_vertex_positions_changed(&self, index: usize) -> Result<bool> {
        Ok(self
            .drawable(index)?
            .flags
            .contains(DynamicFlags::VERTEX_POSITIONS_CHANGED))
    }

    /// Whether drawable `index`'s opacity changed at the last update.
    pub fn is_opacity_changed(&self, index: usize) -> Result<bool> {
        Ok(self
            .drawable(index)?
            .flags
            .contains(DynamicFlags::OPACITY_CHANGED))
    }

    /// Whether drawable `index`'s visibility changed at the last update.
    pub fn is_visibility_changed(&self, index: usize) -> Result<bool> {
        Ok(self
            .drawable(index)?
            .flags
            .contains(DynamicFlags::VISIBILITY_CHANGED))
    }

    /// All dynamic state bits of drawable `index` in one read.
    pub fn dynamic_flags(&self, index: usize) -> Result<DynamicFlags> {
        Ok(self.drawable(index)?.flags)
    }

    // ========================================================================
    // Internal
    // ========================================================================

    fn drawable(&self, index: usize) -> Result<&Drawable> {
        self.drawables
            .get(index)
            .ok_or(MarionetteError::DrawableIndexOutOfBounds {
                index,
                count: self.drawables.len(),
            })
    }
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("canvas_size", &self.canvas_size)
            .field("drawable_count", &self.drawables.len())
            .field("texture_urls", &self.texture_urls)
            .field("parameter_count", &self.parameters.len())
            .finish_non_exhaustive()
    }
}

/// Load-time structural validation of one drawable's static arrays.
fn validate_topology(
    index: usize,
    topology: &DrawableTopology,
    texture_count: usize,
    drawable_count: usize,
) -> Result<()> {
    let err = |msg: String| Err(MarionetteError::ModelLoadError(msg));

    if topology.vertex_positions.len() % 2 != 0 {
        return err(format!(
            "drawable {index}: position count {} is not pair-packed",
            topology.vertex_positions.len()
        ));
    }
    if topology.vertex_uvs.len() != topology.vertex_positions.len() {
        return err(format!(
            "drawable {index}: UV count {} does not match position count {}",
            topology.vertex_uvs.len(),
            topology.vertex_positions.len()
        ));
    }
    if topology.vertex_indices.len() % 3 != 0 {
        return err(format!(
            "drawable {index}: index count {} is not a triangle list",
            topology.vertex_indices.len()
        ));
    }
    let vertex_count = topology.vertex_count();
    if let Some(&bad) = topology
        .vertex_indices
        .iter()
        .find(|&&v| usize::from(v) >= vertex_count)
    {
        return err(format!(
            "drawable {index}: vertex index {bad} out of range (vertex count: {vertex_count})"
        ));
    }
    if topology.texture_index >= texture_count {
        return err(format!(
            "drawable {index}: texture index {} out of range (texture count: {texture_count})",
            topology.texture_index
        ));
    }
    if let Some(&bad) = topology
        .masks
        .iter()
        .find(|&&m| m < 0 || m as usize >= drawable_count)
    {
        return err(format!(
            "drawable {index}: mask reference {bad} out of range (drawable count: {drawable_count})"
        ));
    }
    Ok(())
}
