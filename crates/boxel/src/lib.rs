//! Core library for id64 system addresses and boxel navigation.
//!
//! An id64 packs a size class, a sector, a boxel within that sector and an
//! object index into a single `u64`. This crate decodes and re-encodes those
//! fields, renders them as catalogue names, and walks the boxel grid of a
//! layer in Hilbert curve order.
//!
//! # Layers
//!
//! - [`id64`]: the bit-exact codec.
//! - [`sector`]: the load-once sector name table.
//! - [`name`]: display names, the name parser and the catalogue filter.
//! - [`curves`]: the 3D Hilbert mapping over a layer's boxel grid.
//! - [`navigator`]: next-star and next-boxel queries.
//!
//! Curve positions (`h`) and the boxels reached by offset moves follow this
//! crate's own Hilbert orientation. They are not comparable with positions
//! from Skilling's transform, such as the Python `hilbertcurve` package
//! produces for the same boxel.

/// Boxel and sector coordinate triples.
pub mod coord;
/// Curve implementations used to order the boxel grid.
pub mod curves;
/// Error types used across the crate.
pub mod error;
/// Bit-level codec between `u64` and [`id64::Address`].
pub mod id64;
/// Display names, the boxel name parser and known-index extraction.
pub mod name;
/// Navigation queries over a layer.
pub mod navigator;
/// Internal bit masks shared by the codec and navigator.
#[doc(hidden)]
pub mod ops;
/// The sector name table.
pub mod sector;

pub use crate::{
    coord::{BoxelCoord, SectorCoord},
    curves::{LayerCurve, hilbert::Hilbert},
    id64::{Address, decode, encode},
    name::{BoxelName, KnownIndexSet, format_suffix, known_indices},
    navigator::{CurvePosition, Navigator, OffsetStepper, Survey, SurveyOptions},
    sector::SectorTable,
};

/// Render the display name of `id64` against the installed sector table.
pub fn id64_to_name(id64: u64) -> String {
    SectorTable::global().resolve_name(&decode(id64))
}
