//! Raw buffer views.
//!
//! Read-only, non-owning typed views over contiguous memory owned by a
//! [`Model`](crate::model::Model). The renderer copies straight out of these
//! (see [`as_bytes`](RawBuffer::as_bytes)) without an intermediate collection.
//!
//! Validity is tied to the borrow: a view holds `&'a [T]` into the model's
//! current-frame storage, so the borrow checker rejects any attempt to keep a
//! view alive across the next `update()` (which takes `&mut self`). This
//! replaces the raw-pointer + "do not dereference after update" contract of
//! C-style bindings with a compile-time guarantee.

use bytemuck::Pod;

/// A read-only view over `count` elements of externally owned memory.
///
/// Cheap to copy; never allocates, never frees.
#[derive(Debug, Clone, Copy)]
pub struct RawBuffer<'a, T: Pod> {
    data: &'a [T],
}

/// View over pair-packed `f32` data (vertex positions, UVs).
pub type RawFloats<'a> = RawBuffer<'a, f32>;

/// View over `i32` data (render orders, mask drawable indices).
pub type RawInts<'a> = RawBuffer<'a, i32>;

/// View over `u16` data (triangle-list vertex indices).
pub type RawUShorts<'a> = RawBuffer<'a, u16>;

impl<'a, T: Pod> RawBuffer<'a, T> {
    /// Wraps a borrowed slice. The view is valid exactly as long as `data`.
    pub fn new(data: &'a [T]) -> Self {
        Self { data }
    }

    /// Number of elements.
    #[inline]
    pub fn count(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bounds-checked element access.
    #[inline]
    pub fn get(&self, index: usize) -> Option<T> {
        self.data.get(index).copied()
    }

    /// The underlying slice, for bulk copies.
    #[inline]
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// The underlying bytes, ready for a GPU queue write.
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.data)
    }

    /// Iterate elements by value.
    pub fn iter(&self) -> impl Iterator<Item = T> + 'a {
        self.data.iter().copied()
    }
}

/// Unchecked-looking access with slice semantics: panics on out-of-range,
/// same as indexing a `&[T]`. Use [`RawBuffer::get`] for the checked form.
impl<T: Pod> std::ops::Index<usize> for RawBuffer<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<'a, T: Pod> From<&'a [T]> for RawBuffer<'a, T> {
    fn from(data: &'a [T]) -> Self {
        Self::new(data)
    }
}

impl<'a, T: Pod> IntoIterator for RawBuffer<'a, T> {
    type Item = T;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter().copied()
    }
}
