//! Data and convolve layers.

use rand_distr::{Distribution, Normal};
use tenvolve_core::{ConvolveEngine, Result, Volume, VolumeError, VolumeShape};

/// Activation storage between convolve layers.
///
/// Owns one [`Volume`] of fixed shape, allocated at construction and
/// overwritten in place on every pass.
#[derive(Debug, Clone)]
pub struct DataLayer {
    volume: Volume,
}

impl DataLayer {
    pub fn new(depth: usize, width: usize, height: usize) -> Result<Self> {
        Ok(Self {
            volume: Volume::new(depth, width, height)?,
        })
    }

    pub fn shape(&self) -> VolumeShape {
        self.volume.shape()
    }

    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    pub fn volume_mut(&mut self) -> &mut Volume {
        &mut self.volume
    }

    /// Copy `activations` into this layer; shapes must match exactly.
    pub fn load(&mut self, activations: &Volume) -> Result<()> {
        if activations.shape() != self.volume.shape() {
            return Err(VolumeError::shape_mismatch(
                "data_layer_load",
                &format!("{}", self.volume.shape()),
                &format!("{}", activations.shape()),
            ));
        }
        self.volume
            .as_mut_slice()
            .copy_from_slice(activations.as_slice());
        Ok(())
    }
}

/// A convolution layer: a [`ConvolveEngine`] between two data layers.
#[derive(Debug, Clone)]
pub struct ConvolveLayer {
    engine: ConvolveEngine,
}

impl ConvolveLayer {
    /// Layer with zero-initialized weights.
    pub fn new(neuron_count: usize, depth: usize, width: usize, height: usize) -> Result<Self> {
        Ok(Self {
            engine: ConvolveEngine::new(neuron_count, depth, width, height)?,
        })
    }

    /// Layer with Gaussian-initialized weights, `std = sqrt(2/fan_in)`.
    pub fn new_gaussian(
        neuron_count: usize,
        depth: usize,
        width: usize,
        height: usize,
    ) -> Result<Self> {
        let mut layer = Self::new(neuron_count, depth, width, height)?;
        layer.randomize_weights();
        Ok(layer)
    }

    /// Re-draw every weight from `N(0, 2/fan_in)`, with fan-in the
    /// per-neuron weight count. A degenerate distribution leaves the
    /// bank zeroed.
    pub fn randomize_weights(&mut self) {
        let fan_in = self.engine.filters().neuron_shape().size();
        let std_dev = (2.0 / fan_in as f32).sqrt();
        match Normal::new(0.0f32, std_dev) {
            Ok(normal) => {
                let mut rng = rand::rng();
                for weight in self.engine.filters_mut().as_mut_slice() {
                    *weight = normal.sample(&mut rng);
                }
            }
            Err(_) => self.engine.filters_mut().as_mut_slice().fill(0.0),
        }
    }

    pub fn neuron_num(&self) -> usize {
        self.engine.neuron_num()
    }

    pub fn engine(&self) -> &ConvolveEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ConvolveEngine {
        &mut self.engine
    }

    /// The largest top extent this layer can produce from `bottom`:
    /// depth = neuron count, spatial = bottom - filter + 1 (valid-mode
    /// correlation).
    pub fn valid_top_shape(&self, bottom: VolumeShape) -> Result<VolumeShape> {
        let filter_shape = self.engine.filters().neuron_shape();
        if bottom.depth() != filter_shape.depth() {
            return Err(VolumeError::shape_mismatch(
                "valid_top_shape",
                &format!("bottom depth {}", filter_shape.depth()),
                &format!("bottom depth {}", bottom.depth()),
            ));
        }
        if bottom.width() < filter_shape.width() || bottom.height() < filter_shape.height() {
            return Err(VolumeError::invalid_shape(
                "valid_top_shape",
                &format!(
                    "bottom extent {bottom} smaller than filter extent {filter_shape}"
                ),
            ));
        }
        Ok(VolumeShape::new(
            self.engine.neuron_num(),
            bottom.width() - filter_shape.width() + 1,
            bottom.height() - filter_shape.height() + 1,
        ))
    }

    /// Forward pass; see [`ConvolveEngine::pass_up`].
    pub fn pass_up(&self, bottom: &Volume, top: &mut Volume) -> Result<()> {
        self.engine.pass_up(bottom, top)
    }

    /// Backward pass; see [`ConvolveEngine::pass_down`].
    pub fn pass_down(&self, top: &Volume, bottom: &mut Volume) -> Result<()> {
        self.engine.pass_down(top, bottom)
    }
}
