//! # TenvolveRS: volumetric convolutional feature learning
//!
//! TenvolveRS is a minimal volumetric feature-learning primitive: a
//! fixed bank of 3-D convolution filters that transforms a 3-D
//! activation volume into another 3-D activation volume, and runs the
//! same transform in reverse to reconstruct an input from an output.
//! This is the inference/reconstruction pair of restricted-Boltzmann
//! style convolutional training: `pass_up` is a valid-mode 3-D
//! cross-correlation, `pass_down` its transposed accumulation. Both
//! run as a single data-parallel dispatch with deterministic results.
//!
//! ## Quick start
//!
//! ```
//! use tenvolve::prelude::*;
//!
//! fn main() -> Result<()> {
//!     // one 1x1x1 filter of weight 2.0: pass_up doubles the input
//!     let mut engine = ConvolveEngine::new(1, 1, 1, 1)?;
//!     engine.filters_mut().set(0, 0, 0, 0, 2.0)?;
//!
//!     let bottom = Volume::from_vec(vec![1.0, 2.0, 3.0, 4.0], 1, 2, 2)?;
//!     let mut top = Volume::new(1, 2, 2)?;
//!     engine.pass_up(&bottom, &mut top)?;
//!     assert_eq!(top.as_slice(), &[2.0, 4.0, 6.0, 8.0]);
//!     Ok(())
//! }
//! ```
//!
//! ## Crates
//!
//! - `tenvolve-core`: volumes, filter banks, the convolution engine
//! - `tenvolve-model`: alternating data/convolve layer stacks
//! - `tenvolve-dataset`: on-disk sample ingestion

pub use tenvolve_core::{
    ConvolveEngine, FilterBank, NeuronView, PlaneView, Result, Volume, VolumeError, VolumeShape,
};
pub use tenvolve_dataset::SampleSet;
#[cfg(feature = "serialize")]
pub use tenvolve_model::checkpoint;
pub use tenvolve_model::{ConvolveLayer, DataLayer, DeepModel};

/// Everything a consumer typically needs.
pub mod prelude {
    pub use tenvolve_core::{
        ConvolveEngine, FilterBank, Result, Volume, VolumeError, VolumeShape,
    };
    pub use tenvolve_dataset::SampleSet;
    pub use tenvolve_model::{ConvolveLayer, DataLayer, DeepModel};
}
