//! Forward and backward volumetric convolution kernels.
//!
//! `pass_up` runs a valid-mode 3-D cross-correlation of a bottom volume
//! against every filter in a bank; `pass_down` runs the transposed
//! accumulation that reconstructs a bottom volume from a top volume.
//! This is the inference/reconstruction pair of restricted-Boltzmann
//! style convolutional training.
//!
//! Both kernels evaluate every output element independently of every
//! other: the output buffer is cut into disjoint leading-axis planes
//! and each plane becomes one rayon task, with sequential inner loops
//! per element. No task reads another task's output and the filter
//! bank is shared read-only, so the result is bit-identical under any
//! schedule.

use crate::error::{Result, VolumeError};
use crate::filter::{FilterBank, NeuronView};
use crate::volume::Volume;
use rayon::prelude::*;

/// Forward (discriminative) pass: valid-mode 3-D cross-correlation.
///
/// For every coordinate `(n, w, h)` of `top`:
///
/// ```text
/// top[n,w,h] = Σ_{d,dw,dh} bottom[d, w+dw, h+dh] · filter_n[d, dw, dh]
/// ```
///
/// summed over the filter's full extent. `top` is written completely;
/// its prior contents are discarded, never read. `bottom` is read-only.
///
/// Preconditions, checked before any work is dispatched and before any
/// element of `top` is touched: `top.depth()` must equal the bank's
/// neuron count, `bottom.depth()` must equal the filter depth, and
/// `top`'s spatial extent must keep every `(w+dw, h+dh)` read inside
/// `bottom`. On failure the call rejects atomically with no output
/// mutation.
pub fn pass_up(filters: &FilterBank, bottom: &Volume, top: &mut Volume) -> Result<()> {
    validate_pass_up(filters, bottom, top)?;

    let neurons = collect_neurons(filters)?;
    let filter_shape = filters.neuron_shape();
    let (top_width, top_height) = (top.width(), top.height());

    top.as_mut_slice()
        .par_chunks_mut(top_width * top_height)
        .zip(neurons.par_iter())
        .for_each(|(out_plane, neuron)| {
            for w in 0..top_width {
                for h in 0..top_height {
                    let mut acc = 0.0f32;
                    for d in 0..filter_shape.depth() {
                        for dw in 0..filter_shape.width() {
                            for dh in 0..filter_shape.height() {
                                acc += bottom.at(d, w + dw, h + dh) * neuron.at(d, dw, dh);
                            }
                        }
                    }
                    out_plane[w * top_height + h] = acc;
                }
            }
        });

    Ok(())
}

/// Backward (generative) pass: transposed accumulation of `pass_up`.
///
/// For every coordinate `(d, w, h)` of `bottom`, every filter `n` and
/// offset `(dw, dh)` whose source coordinate lands on `top`
/// contributes:
///
/// ```text
/// bottom[d,w,h] = Σ_n Σ_{dw,dh} filter_n[d, dw, dh] · top[n, w-dw, h-dh]
/// ```
///
/// with `(dw, dh)` restricted to `0 ≤ w-dw < top.width()` and
/// `0 ≤ h-dh < top.height()`. At `w = 0, h = 0` only the `(0, 0)`
/// offset contributes. `bottom` is written completely; `top` is
/// read-only.
///
/// Preconditions, checked before dispatch: `top.depth()` must equal the
/// bank's neuron count and `bottom.depth()` must equal the filter
/// depth.
pub fn pass_down(filters: &FilterBank, top: &Volume, bottom: &mut Volume) -> Result<()> {
    validate_pass_down(filters, top, bottom)?;

    let neurons = collect_neurons(filters)?;
    let filter_shape = filters.neuron_shape();
    let (bottom_width, bottom_height) = (bottom.width(), bottom.height());
    let (top_width, top_height) = (top.width(), top.height());

    bottom
        .as_mut_slice()
        .par_chunks_mut(bottom_width * bottom_height)
        .enumerate()
        .for_each(|(d, out_plane)| {
            for w in 0..bottom_width {
                // offsets whose source column stays on `top`: w-dw in [0, top_width)
                let dw_lo = (w + 1).saturating_sub(top_width);
                let dw_hi = filter_shape.width().min(w + 1);
                for h in 0..bottom_height {
                    let dh_lo = (h + 1).saturating_sub(top_height);
                    let dh_hi = filter_shape.height().min(h + 1);
                    let mut acc = 0.0f32;
                    for (n, neuron) in neurons.iter().enumerate() {
                        for dw in dw_lo..dw_hi {
                            for dh in dh_lo..dh_hi {
                                acc += neuron.at(d, dw, dh) * top.at(n, w - dw, h - dh);
                            }
                        }
                    }
                    out_plane[w * bottom_height + h] = acc;
                }
            }
        });

    Ok(())
}

fn validate_pass_up(filters: &FilterBank, bottom: &Volume, top: &Volume) -> Result<()> {
    let filter_shape = filters.neuron_shape();
    if top.depth() != filters.neuron_count() {
        return Err(VolumeError::shape_mismatch(
            "pass_up",
            &format!("top depth {}", filters.neuron_count()),
            &format!("top depth {}", top.depth()),
        ));
    }
    if bottom.depth() != filter_shape.depth() {
        return Err(VolumeError::shape_mismatch(
            "pass_up",
            &format!("bottom depth {}", filter_shape.depth()),
            &format!("bottom depth {}", bottom.depth()),
        ));
    }
    if top.width() + filter_shape.width() > bottom.width() + 1
        || top.height() + filter_shape.height() > bottom.height() + 1
    {
        return Err(VolumeError::out_of_bounds(
            "pass_up",
            &format!(
                "top extent {} with filter extent {} overruns bottom extent {}",
                top.shape(),
                filter_shape,
                bottom.shape()
            ),
        ));
    }
    Ok(())
}

fn validate_pass_down(filters: &FilterBank, top: &Volume, bottom: &Volume) -> Result<()> {
    let filter_shape = filters.neuron_shape();
    if top.depth() != filters.neuron_count() {
        return Err(VolumeError::shape_mismatch(
            "pass_down",
            &format!("top depth {}", filters.neuron_count()),
            &format!("top depth {}", top.depth()),
        ));
    }
    if bottom.depth() != filter_shape.depth() {
        return Err(VolumeError::shape_mismatch(
            "pass_down",
            &format!("bottom depth {}", filter_shape.depth()),
            &format!("bottom depth {}", bottom.depth()),
        ));
    }
    Ok(())
}

fn collect_neurons(filters: &FilterBank) -> Result<Vec<NeuronView<'_>>> {
    (0..filters.neuron_count())
        .map(|n| filters.neuron(n))
        .collect()
}
