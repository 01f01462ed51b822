//! Error type shared by the codec, curve and sector table.

use std::{fmt, io, result};

use thiserror::Error;

/// A named field of an [`crate::id64::Address`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Size class.
    MassCode,
    /// Sector X coordinate.
    SectorX,
    /// Sector Y coordinate.
    SectorY,
    /// Sector Z coordinate.
    SectorZ,
    /// Boxel X coordinate.
    BoxelX,
    /// Boxel Y coordinate.
    BoxelY,
    /// Boxel Z coordinate.
    BoxelZ,
    /// Object index within the boxel.
    Index,
    /// Body identifier in the high bits.
    BodyId,
}

impl Field {
    /// The snake_case name used in messages and CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MassCode => "mass_code",
            Self::SectorX => "sector_x",
            Self::SectorY => "sector_y",
            Self::SectorZ => "sector_z",
            Self::BoxelX => "boxel_x",
            Self::BoxelY => "boxel_y",
            Self::BoxelZ => "boxel_z",
            Self::Index => "index",
            Self::BodyId => "body_id",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A field value does not fit in its bit width.
    #[error("{field} value {value} does not fit in {width} bits")]
    FieldOverflow {
        /// The offending field.
        field: Field,
        /// The value that was supplied.
        value: u64,
        /// The field's width for this mass code.
        width: u32,
    },

    /// The finest size class has no boxel grid.
    #[error("mass code {mass_code} has no boxel subdivision")]
    NoSubdivision {
        /// The mass code of the address.
        mass_code: u8,
    },

    /// Reading the sector list failed.
    #[error("failed to read sector list: {0}")]
    Io(#[from] io::Error),

    /// The sector list is not valid CSV or has unexpected columns.
    #[error("malformed sector list: {0}")]
    Csv(#[from] csv::Error),

    /// A sector row has an X coordinate but lacks another axis.
    #[error("sector list line {line} has no {axis} coordinate")]
    IncompleteSector {
        /// One-based line number in the source.
        line: u64,
        /// The missing axis.
        axis: char,
    },

    /// A process-wide sector table has already been installed.
    #[error("a sector table is already installed")]
    SectorTableInstalled,
}

/// Convenient result alias for this crate.
pub type Result<T> = result::Result<T, Error>;
