//! Coordinate triples for sectors and boxels.

use std::fmt;

/// A boxel cell within a sector. Each axis spans `[0, 2^(7 - mass_code))`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BoxelCoord {
    /// X axis.
    pub x: u32,
    /// Y axis.
    pub y: u32,
    /// Z axis.
    pub z: u32,
}

impl BoxelCoord {
    /// The origin cell of every layer.
    pub const ORIGIN: Self = Self::new(0, 0, 0);

    /// Create a new coordinate.
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }

    /// Calculate the Euclidean distance between two cells.
    pub fn distance(&self, other: &Self) -> f64 {
        let tot: u64 = self
            .as_array()
            .iter()
            .zip(other.as_array())
            .map(|(a, b)| {
                let d = a.abs_diff(b) as u64;
                d * d
            })
            .sum();
        (tot as f64).sqrt()
    }

    /// The coordinates as `[x, y, z]`.
    pub const fn as_array(&self) -> [u32; 3] {
        [self.x, self.y, self.z]
    }

    /// True if every axis fits in `bits` bits.
    pub fn fits(&self, bits: u32) -> bool {
        let side = 1u64 << bits;
        self.as_array().iter().all(|&c| (c as u64) < side)
    }
}

impl From<[u32; 3]> for BoxelCoord {
    fn from([x, y, z]: [u32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl fmt::Display for BoxelCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// A sector cell. X and Z span 7 bits, Y spans 6.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectorCoord {
    /// X axis.
    pub x: u32,
    /// Y axis.
    pub y: u32,
    /// Z axis.
    pub z: u32,
}

impl SectorCoord {
    /// Create a new coordinate.
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for SectorCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
