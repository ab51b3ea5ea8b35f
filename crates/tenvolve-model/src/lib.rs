//! Layer stacking and model assembly for TenvolveRS.
//!
//! A [`DeepModel`] is an alternating stack of [`DataLayer`]s (activation
//! storage) and [`ConvolveLayer`]s (filter banks), wired together at
//! add time with full shape validation. The model propagates a sample
//! bottom-to-top with `pass_up` and reconstructs top-to-bottom with
//! `pass_down`; weight updates belong to an external training
//! collaborator and are out of scope here.

#[cfg(feature = "serialize")]
pub mod checkpoint;
pub mod layer;
pub mod model;

pub use layer::{ConvolveLayer, DataLayer};
pub use model::DeepModel;
