//! Volumetric activation storage and convolution kernels for
//! TenvolveRS.
//!
//! This crate is the numerical core of the project: dense 3-D
//! activation [`Volume`]s, a 4-D [`FilterBank`] of per-neuron weights,
//! and the [`ConvolveEngine`] that maps one volume onto another through
//! the bank: forward with a valid-mode cross-correlation (`pass_up`),
//! backward with the transposed accumulation (`pass_down`). Both passes
//! run as a single data-parallel dispatch over the output and return a
//! complete, deterministic result.
//!
//! Layer stacking and sample ingestion live in the companion crates
//! `tenvolve-model` and `tenvolve-dataset`.

pub mod engine;
pub mod error;
pub mod filter;
pub mod ops;
pub mod shape;
pub mod volume;

pub use engine::ConvolveEngine;
pub use error::{Result, VolumeError};
pub use filter::{FilterBank, NeuronView};
pub use shape::VolumeShape;
pub use volume::{PlaneView, Volume};
