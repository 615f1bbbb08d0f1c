//! Shared test fixtures.
//!
//! `RigBackend` is a small deterministic stand-in for the external
//! model-computation engine: three drawables whose positions, opacity,
//! visibility and render order are simple functions of the staged
//! parameters. Staged values only take effect at `update`, matching the
//! engine contract.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use glam::Vec2;
use smallvec::smallvec;

use marionette::model::BlendMode;
use marionette::{DrawableTopology, Model, ModelBackend};

/// Parameter effects, all zero-defaulted:
/// - `ParamAngleX`: shifts every vertex x by `value * 0.01`.
/// - `ParamBreath`: shifts every vertex y by `value * 0.05` (accumulated by
///   `update_physics`).
/// - `ParamFade`: drawable 1 opacity = `(1 - value).clamp(0, 1)`.
/// - `ParamHide`: drawable 2 hidden while `value >= 0.5`.
/// - `ParamSwap`: render orders `[1, 0, 2]` normally, `[2, 0, 1]` while
///   `value > 0.5`.
pub struct RigBackend {
    pub topologies: Vec<DrawableTopology>,
    staged: HashMap<String, f32>,
    positions: Vec<Vec<f32>>,
    opacities: Vec<f32>,
    visibilities: Vec<bool>,
    orders: Vec<i32>,
}

fn quad(texture_index: usize, blend_mode: BlendMode) -> DrawableTopology {
    DrawableTopology {
        vertex_positions: vec![-1.0, -1.0, 1.0, -1.0, -1.0, 1.0, 1.0, 1.0],
        vertex_uvs: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0],
        vertex_indices: vec![0, 1, 2, 2, 1, 3],
        texture_index,
        masks: smallvec![],
        is_culling_enabled: false,
        blend_mode,
    }
}

fn masked_triangle() -> DrawableTopology {
    DrawableTopology {
        vertex_positions: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
        vertex_uvs: vec![0.5, 0.5, 1.0, 0.5, 0.5, 1.0],
        vertex_indices: vec![0, 1, 2],
        texture_index: 0,
        masks: smallvec![0],
        is_culling_enabled: true,
        blend_mode: BlendMode::Additive,
    }
}

impl RigBackend {
    pub fn new() -> Self {
        let topologies = vec![
            quad(0, BlendMode::Normal),
            masked_triangle(),
            quad(1, BlendMode::Multiplicative),
        ];
        let positions = topologies
            .iter()
            .map(|t| t.vertex_positions.clone())
            .collect();
        let mut backend = Self {
            topologies,
            staged: HashMap::new(),
            positions,
            opacities: vec![1.0; 3],
            visibilities: vec![true; 3],
            orders: vec![1, 0, 2],
        };
        backend.recompute();
        backend
    }

    fn param(&self, name: &str) -> f32 {
        self.staged.get(name).copied().unwrap_or(0.0)
    }

    fn recompute(&mut self) {
        let dx = self.param("ParamAngleX") * 0.01;
        let dy = self.param("ParamBreath") * 0.05;
        for (i, topology) in self.topologies.iter().enumerate() {
            let positions = &mut self.positions[i];
            positions.clear();
            for pair in topology.vertex_positions.chunks_exact(2) {
                positions.push(pair[0] + dx);
                positions.push(pair[1] + dy);
            }
        }
        self.opacities[1] = (1.0 - self.param("ParamFade")).clamp(0.0, 1.0);
        self.visibilities[2] = self.param("ParamHide") < 0.5;
        self.orders = if self.param("ParamSwap") > 0.5 {
            vec![2, 0, 1]
        } else {
            vec![1, 0, 2]
        };
    }
}

impl ModelBackend for RigBackend {
    fn canvas_size(&self) -> Vec2 {
        Vec2::new(800.0, 600.0)
    }

    fn drawable_count(&self) -> usize {
        self.topologies.len()
    }

    fn drawable_topology(&self, index: usize) -> DrawableTopology {
        self.topologies[index].clone()
    }

    fn set_parameter(&mut self, name: &str, value: f32) {
        self.staged.insert(name.to_string(), value);
    }

    fn update_physics(&mut self, dt: f32) {
        let breath = self.param("ParamBreath") + dt;
        self.staged.insert("ParamBreath".to_string(), breath);
    }

    fn update(&mut self) {
        self.recompute();
    }

    fn vertex_positions(&self, index: usize) -> &[f32] {
        &self.positions[index]
    }

    fn opacity(&self, index: usize) -> f32 {
        self.opacities[index]
    }

    fn visibility(&self, index: usize) -> bool {
        self.visibilities[index]
    }

    fn render_order(&self, index: usize) -> i32 {
        self.orders[index]
    }
}

/// Writes a valid two-texture manifest to a per-test temp file.
pub fn write_manifest(test_name: &str) -> PathBuf {
    // Surface the crate's log output under --nocapture.
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = std::env::temp_dir().join("marionette_tests");
    fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join(format!("{test_name}.model.json"));
    fs::write(
        &path,
        r#"{
    "version": 1,
    "textures": ["textures/body.png", "textures/face.png"],
    "physics": "rig.physics.json"
}"#,
    )
    .expect("write manifest");
    path
}

/// Loads a model over a fresh `RigBackend`.
pub fn load_model(test_name: &str) -> Model {
    Model::load(write_manifest(test_name), Box::new(RigBackend::new())).expect("model should load")
}
