//! Hilbert ordering of a cubic boxel grid.
//!
//! Each level of the curve visits the eight octants of the current cube in
//! Gray-code order. A cube corner is a 3-bit label `x << 2 | y << 1 | z`. The
//! orientation of the current cube (its entry corner and principal axis) is
//! carried from one level down to the next.

use crate::coord::BoxelCoord;

/// Bits in a corner label, one per axis.
const AXES: u32 = 3;

/// Mask of a corner label.
const LABEL: u32 = 0b111;

/// Entry corner of octant `w` in the canonical frame.
const ENTRY: [u32; 8] = [0, 0, 0, 3, 3, 6, 6, 5];

/// Axis along which octant `w` is traversed, relative to its parent.
const DIRECTION: [u32; 8] = [0, 1, 1, 2, 2, 1, 1, 0];

/// Rotate a corner label left by `shift` axes.
fn rotate_left(label: u32, shift: u32) -> u32 {
    let shift = shift % AXES;
    ((label << shift) | (label >> (AXES - shift))) & LABEL
}

/// Rotate a corner label right by `shift` axes.
fn rotate_right(label: u32, shift: u32) -> u32 {
    let shift = shift % AXES;
    ((label >> shift) | (label << (AXES - shift))) & LABEL
}

/// Gray code of an octant number.
fn gray(w: u32) -> u32 {
    w ^ (w >> 1)
}

/// Octant number of a Gray code.
fn ungray(g: u32) -> u32 {
    g ^ (g >> 1) ^ (g >> 2)
}

/// Entry corner and principal axis of the cube being visited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Orientation {
    /// Corner the curve enters through.
    entry: u32,
    /// Principal axis, in `[0, 3)`.
    axis: u32,
}

impl Orientation {
    /// Map a corner of this cube to the canonical frame.
    fn canonical(self, label: u32) -> u32 {
        rotate_right(label ^ self.entry, self.axis + 1)
    }

    /// Map a canonical corner into this cube.
    fn local(self, label: u32) -> u32 {
        rotate_left(label, self.axis + 1) ^ self.entry
    }

    /// The orientation of octant `w` of this cube.
    fn child(self, w: u32) -> Self {
        Self {
            entry: self.entry ^ rotate_left(ENTRY[w as usize], self.axis + 1),
            axis: (self.axis + DIRECTION[w as usize] + 1) % AXES,
        }
    }
}

/// Cell at position `h` of the curve over a grid of side `2^order`.
///
/// Only the low `3 * order` bits of `h` are read.
pub fn point(order: u32, h: u32) -> BoxelCoord {
    let mut orientation = Orientation::default();
    let mut cell = BoxelCoord::ORIGIN;
    for bit in (0..order).rev() {
        let w = (h >> (AXES * bit)) & LABEL;
        let label = orientation.local(gray(w));
        cell.x |= ((label >> 2) & 1) << bit;
        cell.y |= ((label >> 1) & 1) << bit;
        cell.z |= (label & 1) << bit;
        orientation = orientation.child(w);
    }
    cell
}

/// Position of `cell` on the curve over a grid of side `2^order`.
pub fn index(order: u32, cell: &BoxelCoord) -> u32 {
    let mut orientation = Orientation::default();
    let mut h = 0;
    for bit in (0..order).rev() {
        let label =
            (((cell.x >> bit) & 1) << 2) | (((cell.y >> bit) & 1) << 1) | ((cell.z >> bit) & 1);
        let w = ungray(orientation.canonical(label));
        orientation = orientation.child(w);
        h = (h << AXES) | w;
    }
    h
}
