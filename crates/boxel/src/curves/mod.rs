//! Curves that linearise the boxel grid of a layer.

use crate::{coord::BoxelCoord, error};

/// Octant-by-octant Hilbert ordering of a cubic grid.
mod cube;
/// Boxel-layer Hilbert curve.
pub mod hilbert;

/// A bijection between the boxel grid of one layer and `[0, length)`.
///
/// The navigator depends only on this interface, so any curve that visits
/// every cell exactly once can stand in for [`hilbert::Hilbert`].
pub trait LayerCurve {
    /// Build the curve covering the boxel grid of `mass_code`.
    ///
    /// Fails with [`error::Error::NoSubdivision`] for mass code 7.
    fn for_mass_code(mass_code: u8) -> error::Result<Self>
    where
        Self: Sized;

    /// Number of cells on the curve.
    fn length(&self) -> u32;

    /// Position of `p` on the curve.
    fn index(&self, p: &BoxelCoord) -> u32;

    /// Cell at position `h`, or `None` past the end of the curve.
    fn point(&self, h: u32) -> Option<BoxelCoord>;

    /// The last valid position.
    fn max_h(&self) -> u32 {
        self.length() - 1
    }
}
