//! Parameter table: named scalars driving the deformation engine.

use rustc_hash::FxHashMap;

/// Name → value table of deformation parameters (angles, mouth-open amount,
/// breath phase, ...).
///
/// Writes are upserts: setting an unknown name creates the entry rather than
/// erroring, so animation data may reference optional parameters a given
/// model does not declare.
#[derive(Debug, Default)]
pub struct ParameterTable {
    values: FxHashMap<String, f32>,
}

impl ParameterTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upserts a parameter. Returns the previous value, if any.
    pub fn set(&mut self, name: &str, value: f32) -> Option<f32> {
        self.values.insert(name.to_string(), value)
    }

    /// Last value written for `name`, or `None` if never set.
    #[inline]
    pub fn get(&self, name: &str) -> Option<f32> {
        self.values.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over `(name, value)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
