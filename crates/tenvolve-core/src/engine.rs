//! The convolution engine: a fixed filter bank plus the two passes.

use crate::error::Result;
use crate::filter::FilterBank;
use crate::ops;
use crate::volume::Volume;

/// A fixed-size bank of 3-D filters with a forward and a backward
/// transform between activation volumes.
///
/// The engine owns its [`FilterBank`] exclusively and keeps no other
/// state: both passes are pure functions of their input volume and the
/// current weights, so repeated calls with the same inputs produce
/// bit-identical outputs.
#[derive(Debug, Clone)]
pub struct ConvolveEngine {
    filters: FilterBank,
}

impl ConvolveEngine {
    /// Engine with `neuron_count` zero-initialized filters of
    /// `depth × width × height` each.
    pub fn new(neuron_count: usize, depth: usize, width: usize, height: usize) -> Result<Self> {
        Ok(Self {
            filters: FilterBank::new(neuron_count, depth, width, height)?,
        })
    }

    /// Wrap an existing filter bank.
    pub fn from_bank(filters: FilterBank) -> Self {
        Self { filters }
    }

    /// Number of filters; every top volume must have this depth.
    pub fn neuron_num(&self) -> usize {
        self.filters.neuron_count()
    }

    pub fn filters(&self) -> &FilterBank {
        &self.filters
    }

    /// Mutable access for the training collaborator. Must not be used
    /// while a pass is in flight.
    pub fn filters_mut(&mut self) -> &mut FilterBank {
        &mut self.filters
    }

    /// Forward (discriminative) pass; see [`ops::pass_up`].
    pub fn pass_up(&self, bottom: &Volume, top: &mut Volume) -> Result<()> {
        ops::pass_up(&self.filters, bottom, top)
    }

    /// Backward (generative) pass; see [`ops::pass_down`].
    pub fn pass_down(&self, top: &Volume, bottom: &mut Volume) -> Result<()> {
        ops::pass_down(&self.filters, top, bottom)
    }
}
