//! Data-parallel transforms between volumes.

mod convolve;

pub use convolve::{pass_down, pass_up};
