use crate::{
    coord::BoxelCoord,
    curves::{LayerCurve, cube},
    error::{Error, Result},
    id64,
};

/// A 3D Hilbert curve over the boxel grid of one layer.
///
/// The curve starts at the origin and ends at `(0, 0, side - 1)`. Positions
/// follow this crate's orientation of the curve and are not interchangeable
/// with those of other Hilbert implementations, Skilling's transform among
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hilbert {
    /// The order of the curve: bits per axis, `7 - mass_code`.
    pub order: u32,
    /// Cached total number of cells, `2^(3 * order)`.
    length: u32,
}

impl Hilbert {
    /// Construct a curve of the given order. Orders outside `1..=7` have no
    /// boxel layer behind them.
    pub fn with_order(order: u32) -> Option<Self> {
        (1..=id64::MAX_BOXEL_BITS).contains(&order).then(|| Self {
            order,
            length: 1u32 << (3 * order),
        })
    }

    /// Side length of the grid along each axis.
    pub fn side(&self) -> u32 {
        1 << self.order
    }
}

impl LayerCurve for Hilbert {
    fn for_mass_code(mass_code: u8) -> Result<Self> {
        Self::with_order(id64::boxel_bits(mass_code)).ok_or(Error::NoSubdivision { mass_code })
    }

    fn length(&self) -> u32 {
        self.length
    }

    fn index(&self, p: &BoxelCoord) -> u32 {
        debug_assert!(p.fits(self.order), "boxel coordinate out of bounds");
        cube::index(self.order, p)
    }

    fn point(&self, h: u32) -> Option<BoxelCoord> {
        (h < self.length).then(|| cube::point(self.order, h))
    }
}
