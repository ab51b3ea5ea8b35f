//! Filter-bank checkpointing.
//!
//! A checkpoint is one JSON document per filter bank: the bank extents
//! plus the flat weight buffer.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tenvolve_core::{FilterBank, Result, VolumeError, VolumeShape};

#[derive(Serialize, Deserialize)]
struct FilterBankState {
    neuron_count: usize,
    neuron_shape: VolumeShape,
    weights: Vec<f32>,
}

/// Write a filter bank's weights to `path` as pretty JSON.
pub fn save_filters<P: AsRef<Path>>(bank: &FilterBank, path: P) -> Result<()> {
    let state = FilterBankState {
        neuron_count: bank.neuron_count(),
        neuron_shape: bank.neuron_shape(),
        weights: bank.as_slice().to_vec(),
    };
    let serialized = serde_json::to_string_pretty(&state)
        .map_err(|e| VolumeError::serialization("save_filters", &format!("{e}")))?;
    std::fs::write(path, serialized).map_err(|e| VolumeError::io("save_filters", &format!("{e}")))?;
    Ok(())
}

/// Read a filter bank back from a checkpoint written by
/// [`save_filters`]. The stored extents are re-validated against the
/// weight buffer on load.
pub fn load_filters<P: AsRef<Path>>(path: P) -> Result<FilterBank> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| VolumeError::io("load_filters", &format!("{e}")))?;
    let state: FilterBankState = serde_json::from_str(&contents)
        .map_err(|e| VolumeError::serialization("load_filters", &format!("{e}")))?;
    FilterBank::from_vec(
        state.weights,
        state.neuron_count,
        state.neuron_shape.depth(),
        state.neuron_shape.width(),
        state.neuron_shape.height(),
    )
}
