//! Alternating data/convolve layer stacks.

use crate::layer::{ConvolveLayer, DataLayer};
use tenvolve_core::{Result, Volume, VolumeError};

/// An ordered stack of data and convolve layers.
///
/// Layers alternate strictly (data, convolve, data, ...): convolve layer
/// `i` maps `data[i]` (its bottom) onto `data[i+1]` (its top). Shapes
/// are validated when a layer is added, so the passes themselves cannot
/// hit a shape error mid-stack. The top data layer of a convolve layer
/// may use any spatial extent up to the full valid-mode extent
/// `bottom - filter + 1`; its depth must equal the neuron count.
#[derive(Debug, Clone, Default)]
pub struct DeepModel {
    data_layers: Vec<DataLayer>,
    convolve_layers: Vec<ConvolveLayer>,
}

impl DeepModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of data layers in the stack.
    pub fn num_data_layers(&self) -> usize {
        self.data_layers.len()
    }

    /// Number of convolve layers in the stack.
    pub fn num_convolve_layers(&self) -> usize {
        self.convolve_layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data_layers.is_empty()
    }

    /// True when every convolve layer sits between two data layers.
    pub fn is_complete(&self) -> bool {
        !self.data_layers.is_empty()
            && self.data_layers.len() == self.convolve_layers.len() + 1
    }

    pub fn data_layer(&self, index: usize) -> Option<&DataLayer> {
        self.data_layers.get(index)
    }

    pub fn convolve_layer(&self, index: usize) -> Option<&ConvolveLayer> {
        self.convolve_layers.get(index)
    }

    pub fn convolve_layer_mut(&mut self, index: usize) -> Option<&mut ConvolveLayer> {
        self.convolve_layers.get_mut(index)
    }

    /// Activations of the bottom-most data layer.
    pub fn input(&self) -> Option<&Volume> {
        self.data_layers.first().map(DataLayer::volume)
    }

    /// Activations of the top-most data layer.
    pub fn output(&self) -> Option<&Volume> {
        self.data_layers.last().map(DataLayer::volume)
    }

    /// Append a data layer. The stack must be expecting one, and when
    /// it tops a convolve layer its shape must be a valid top extent
    /// for that layer.
    pub fn add_data_layer(&mut self, depth: usize, width: usize, height: usize) -> Result<()> {
        if self.data_layers.len() != self.convolve_layers.len() {
            return Err(VolumeError::invalid_shape(
                "add_data_layer",
                "stack expects a convolve layer next",
            ));
        }
        let layer = DataLayer::new(depth, width, height)?;
        if let (Some(conv), Some(below)) = (self.convolve_layers.last(), self.data_layers.last()) {
            let max_top = conv.valid_top_shape(below.shape())?;
            let shape = layer.shape();
            if shape.depth() != max_top.depth()
                || shape.width() > max_top.width()
                || shape.height() > max_top.height()
            {
                return Err(VolumeError::shape_mismatch(
                    "add_data_layer",
                    &format!("top extent up to {max_top}"),
                    &format!("{shape}"),
                ));
            }
        }
        self.data_layers.push(layer);
        Ok(())
    }

    /// Append a convolve layer on top of the last data layer. The
    /// filter must fit that layer's volume: equal depth, spatial extent
    /// no larger than the volume's.
    pub fn add_convolve_layer(
        &mut self,
        neuron_count: usize,
        depth: usize,
        width: usize,
        height: usize,
    ) -> Result<()> {
        let below = self.data_layers.last().ok_or_else(|| {
            VolumeError::invalid_shape("add_convolve_layer", "stack expects a data layer first")
        })?;
        if self.data_layers.len() != self.convolve_layers.len() + 1 {
            return Err(VolumeError::invalid_shape(
                "add_convolve_layer",
                "stack expects a data layer next",
            ));
        }
        let layer = ConvolveLayer::new(neuron_count, depth, width, height)?;
        layer.valid_top_shape(below.shape())?;
        self.convolve_layers.push(layer);
        Ok(())
    }

    /// Propagate `input` bottom-to-top through every convolve layer.
    /// The result lands in [`DeepModel::output`].
    pub fn pass_up(&mut self, input: &Volume) -> Result<()> {
        self.require_complete("pass_up")?;
        self.data_layers[0].load(input)?;
        for (i, conv) in self.convolve_layers.iter().enumerate() {
            let (below, above) = self.data_layers.split_at_mut(i + 1);
            conv.pass_up(below[i].volume(), above[0].volume_mut())?;
        }
        Ok(())
    }

    /// Reconstruct top-to-bottom from `top` activations. The
    /// reconstruction lands in [`DeepModel::input`].
    pub fn pass_down(&mut self, top: &Volume) -> Result<()> {
        self.require_complete("pass_down")?;
        let last = self.data_layers.len() - 1;
        self.data_layers[last].load(top)?;
        for (i, conv) in self.convolve_layers.iter().enumerate().rev() {
            let (below, above) = self.data_layers.split_at_mut(i + 1);
            conv.pass_down(above[0].volume(), below[i].volume_mut())?;
        }
        Ok(())
    }

    fn require_complete(&self, operation: &str) -> Result<()> {
        if !self.is_complete() {
            return Err(VolumeError::invalid_shape(
                operation,
                "model must end on a data layer and hold at least one",
            ));
        }
        Ok(())
    }
}
