//! Per-drawable render state.

use bitflags::bitflags;

use crate::backend::DrawableTopology;

/// Blend mode of a drawable. Fixed at load.
///
/// The discriminants are part of the renderer contract (pipeline-state
/// selection keys); do not reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum BlendMode {
    /// Standard alpha blending.
    #[default]
    Normal = 0,
    /// Additive blending.
    Additive = 1,
    /// Multiplicative blending.
    Multiplicative = 2,
}

bitflags! {
    /// Per-drawable dynamic state bits, recomputed once per `update`.
    ///
    /// The four `*_CHANGED` bits are a manual diff cache: each is set iff the
    /// tracked value differs from the value observed at the end of the
    /// previous `update`. They stay stable between updates, so the renderer
    /// may query them any number of times per frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DynamicFlags: u8 {
        /// Drawable is visible this frame.
        const VISIBLE = 1 << 0;
        /// Visibility differs from the previous update.
        const VISIBILITY_CHANGED = 1 << 1;
        /// Opacity differs from the previous update.
        const OPACITY_CHANGED = 1 << 2;
        /// Render order differs from the previous update.
        const RENDER_ORDER_CHANGED = 1 << 3;
        /// At least one vertex position differs from the previous update.
        const VERTEX_POSITIONS_CHANGED = 1 << 4;
    }
}

/// Internal drawable record: static topology plus the current-frame dynamic
/// snapshot. During the diff pass the current values double as the previous
/// frame's baseline, so no second buffer set is kept.
#[derive(Debug)]
pub(crate) struct Drawable {
    pub topology: DrawableTopology,

    // Dynamic state, committed by the latest update. Render order lives in
    // a contiguous vec on the Model so the whole-model view stays zero-copy.
    pub positions: Vec<f32>,
    pub opacity: f32,
    pub flags: DynamicFlags,
}

impl Drawable {
    /// Builds the load-time record. Positions seed from the rest pose;
    /// change flags start cleared so nothing reads as dirty before the
    /// first update.
    pub fn new(topology: DrawableTopology, opacity: f32, visible: bool) -> Self {
        let positions = topology.vertex_positions.clone();
        let mut flags = DynamicFlags::empty();
        flags.set(DynamicFlags::VISIBLE, visible);
        Self {
            topology,
            positions,
            opacity,
            flags,
        }
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.flags.contains(DynamicFlags::VISIBLE)
    }
}
