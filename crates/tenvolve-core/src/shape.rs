#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, VolumeError};

/// Extent of a dense activation volume: depth × width × height, with
/// depth the outermost axis and height the innermost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct VolumeShape {
    depth: usize,
    width: usize,
    height: usize,
}

impl VolumeShape {
    pub fn new(depth: usize, width: usize, height: usize) -> Self {
        Self {
            depth,
            width,
            height,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total element count.
    pub fn size(&self) -> usize {
        self.depth * self.width * self.height
    }

    pub fn contains(&self, depth: usize, width: usize, height: usize) -> bool {
        depth < self.depth && width < self.width && height < self.height
    }

    /// Linear offset of `(depth, width, height)` in contiguous storage.
    #[inline]
    pub fn offset(&self, depth: usize, width: usize, height: usize) -> usize {
        debug_assert!(self.contains(depth, width, height));
        (depth * self.width + width) * self.height + height
    }

    pub(crate) fn validate(&self, operation: &str) -> Result<()> {
        if self.depth == 0 || self.width == 0 || self.height == 0 {
            return Err(VolumeError::invalid_shape(
                operation,
                &format!("extents must be positive, got {self}"),
            ));
        }
        Ok(())
    }
}

impl std::fmt::Display for VolumeShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}, {}]", self.depth, self.width, self.height)
    }
}
