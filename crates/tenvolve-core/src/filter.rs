//! Filter bank storage.
//!
//! A [`FilterBank`] holds the trainable weights of a convolution
//! engine: one dense 3-D kernel per neuron, stored back to back in a
//! single contiguous buffer and addressed `(neuron, depth, width,
//! height)`. The bank is read-mostly: a training collaborator writes
//! weights between passes, the passes only read them.

use crate::error::{Result, VolumeError};
use crate::shape::VolumeShape;

/// A dense 4-D array of weights: `neuron_count` kernels of a common
/// 3-D shape.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterBank {
    neuron_count: usize,
    neuron_shape: VolumeShape,
    data: Vec<f32>,
}

impl FilterBank {
    /// Create a zero-initialized bank of `neuron_count` filters with
    /// extents `depth × width × height` each.
    pub fn new(neuron_count: usize, depth: usize, width: usize, height: usize) -> Result<Self> {
        let neuron_shape = VolumeShape::new(depth, width, height);
        neuron_shape.validate("filter_bank_new")?;
        if neuron_count == 0 {
            return Err(VolumeError::invalid_shape(
                "filter_bank_new",
                "neuron count must be positive",
            ));
        }
        Ok(Self {
            neuron_count,
            neuron_shape,
            data: vec![0.0; neuron_count * neuron_shape.size()],
        })
    }

    /// Wrap an existing weight buffer; its length must match the bank
    /// extents.
    pub fn from_vec(
        data: Vec<f32>,
        neuron_count: usize,
        depth: usize,
        width: usize,
        height: usize,
    ) -> Result<Self> {
        let mut bank = Self::new(neuron_count, depth, width, height)?;
        bank.set_weights(&data)?;
        Ok(bank)
    }

    /// Number of filters in the bank.
    pub fn neuron_count(&self) -> usize {
        self.neuron_count
    }

    /// Shape of each individual filter.
    pub fn neuron_shape(&self) -> VolumeShape {
        self.neuron_shape
    }

    /// Total weight count across all filters.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bounds-checked weight read.
    pub fn get(&self, neuron: usize, depth: usize, width: usize, height: usize) -> Option<f32> {
        (neuron < self.neuron_count && self.neuron_shape.contains(depth, width, height)).then(|| {
            self.data[neuron * self.neuron_shape.size() + self.neuron_shape.offset(depth, width, height)]
        })
    }

    /// Bounds-checked weight write.
    pub fn set(
        &mut self,
        neuron: usize,
        depth: usize,
        width: usize,
        height: usize,
        value: f32,
    ) -> Result<()> {
        if neuron >= self.neuron_count || !self.neuron_shape.contains(depth, width, height) {
            return Err(VolumeError::out_of_bounds(
                "filter_bank_set",
                &format!(
                    "index ({neuron}, {depth}, {width}, {height}) outside bank of {} neurons with shape {}",
                    self.neuron_count, self.neuron_shape
                ),
            ));
        }
        let offset = neuron * self.neuron_shape.size() + self.neuron_shape.offset(depth, width, height);
        self.data[offset] = value;
        Ok(())
    }

    /// Replace every weight in the bank.
    pub fn set_weights(&mut self, weights: &[f32]) -> Result<()> {
        if weights.len() != self.data.len() {
            return Err(VolumeError::shape_mismatch(
                "filter_bank_set_weights",
                &format!("{} weights", self.data.len()),
                &format!("{} weights", weights.len()),
            ));
        }
        self.data.copy_from_slice(weights);
        Ok(())
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Read-only 3-D view of one filter, without copying. Ownership
    /// stays with the bank.
    pub fn neuron(&self, neuron: usize) -> Result<NeuronView<'_>> {
        if neuron >= self.neuron_count {
            return Err(VolumeError::out_of_bounds(
                "filter_bank_neuron",
                &format!("neuron {neuron} outside bank of {} neurons", self.neuron_count),
            ));
        }
        let neuron_len = self.neuron_shape.size();
        Ok(NeuronView {
            data: &self.data[neuron * neuron_len..(neuron + 1) * neuron_len],
            shape: self.neuron_shape,
        })
    }
}

/// Borrowed 3-D projection of a [`FilterBank`] with the neuron axis
/// fixed.
#[derive(Debug, Clone, Copy)]
pub struct NeuronView<'a> {
    data: &'a [f32],
    shape: VolumeShape,
}

impl NeuronView<'_> {
    pub fn shape(&self) -> VolumeShape {
        self.shape
    }

    /// Bounds-checked weight read.
    pub fn get(&self, depth: usize, width: usize, height: usize) -> Option<f32> {
        self.shape
            .contains(depth, width, height)
            .then(|| self.at(depth, width, height))
    }

    #[inline]
    pub fn at(&self, depth: usize, width: usize, height: usize) -> f32 {
        self.data[self.shape.offset(depth, width, height)]
    }

    pub fn as_slice(&self) -> &[f32] {
        self.data
    }
}
