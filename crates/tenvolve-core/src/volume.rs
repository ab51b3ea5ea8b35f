//! Dense 3-D activation storage.
//!
//! A [`Volume`] is the unit of data the convolution passes consume and
//! produce: one contiguous `f32` buffer plus its 3-D extent. Layers
//! allocate volumes once and overwrite them in place on every pass.

use crate::error::{Result, VolumeError};
use crate::shape::VolumeShape;

/// A dense 3-D array of `f32` activations.
///
/// Addressed by `(depth, width, height)` with depth outermost and
/// height innermost. The shape is fixed at construction and the volume
/// is never resized.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    shape: VolumeShape,
    data: Vec<f32>,
}

impl Volume {
    /// Create a zero-filled volume with the given extents.
    pub fn new(depth: usize, width: usize, height: usize) -> Result<Self> {
        let shape = VolumeShape::new(depth, width, height);
        shape.validate("volume_new")?;
        Ok(Self {
            data: vec![0.0; shape.size()],
            shape,
        })
    }

    /// Wrap an existing buffer; its length must match the shape size.
    pub fn from_vec(data: Vec<f32>, depth: usize, width: usize, height: usize) -> Result<Self> {
        let shape = VolumeShape::new(depth, width, height);
        shape.validate("volume_from_vec")?;
        if data.len() != shape.size() {
            return Err(VolumeError::shape_mismatch(
                "volume_from_vec",
                &format!("{} elements for shape {shape}", shape.size()),
                &format!("{} elements", data.len()),
            ));
        }
        Ok(Self { shape, data })
    }

    pub fn shape(&self) -> VolumeShape {
        self.shape
    }

    pub fn depth(&self) -> usize {
        self.shape.depth()
    }

    pub fn width(&self) -> usize {
        self.shape.width()
    }

    pub fn height(&self) -> usize {
        self.shape.height()
    }

    /// Total element count.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bounds-checked element read.
    pub fn get(&self, depth: usize, width: usize, height: usize) -> Option<f32> {
        self.shape
            .contains(depth, width, height)
            .then(|| self.data[self.shape.offset(depth, width, height)])
    }

    /// Element read for kernel inner loops; bounds are the caller's
    /// contract (checked only in debug builds).
    #[inline]
    pub fn at(&self, depth: usize, width: usize, height: usize) -> f32 {
        self.data[self.shape.offset(depth, width, height)]
    }

    /// Bounds-checked element write.
    pub fn set(&mut self, depth: usize, width: usize, height: usize, value: f32) -> Result<()> {
        if !self.shape.contains(depth, width, height) {
            return Err(VolumeError::out_of_bounds(
                "volume_set",
                &format!("index ({depth}, {width}, {height}) outside shape {}", self.shape),
            ));
        }
        let offset = self.shape.offset(depth, width, height);
        self.data[offset] = value;
        Ok(())
    }

    /// Overwrite every element with `value`.
    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Read-only view of one depth plane, without copying. Ownership
    /// stays with this volume.
    pub fn plane(&self, depth: usize) -> Result<PlaneView<'_>> {
        if depth >= self.shape.depth() {
            return Err(VolumeError::out_of_bounds(
                "volume_plane",
                &format!("plane {depth} outside shape {}", self.shape),
            ));
        }
        let plane_len = self.shape.width() * self.shape.height();
        Ok(PlaneView {
            data: &self.data[depth * plane_len..(depth + 1) * plane_len],
            width: self.shape.width(),
            height: self.shape.height(),
        })
    }
}

/// Borrowed 2-D projection of a [`Volume`] with the depth axis fixed.
#[derive(Debug, Clone, Copy)]
pub struct PlaneView<'a> {
    data: &'a [f32],
    width: usize,
    height: usize,
}

impl PlaneView<'_> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Bounds-checked element read.
    pub fn get(&self, width: usize, height: usize) -> Option<f32> {
        (width < self.width && height < self.height).then(|| self.at(width, height))
    }

    #[inline]
    pub fn at(&self, width: usize, height: usize) -> f32 {
        debug_assert!(width < self.width && height < self.height);
        self.data[width * self.height + height]
    }

    pub fn as_slice(&self) -> &[f32] {
        self.data
    }
}
