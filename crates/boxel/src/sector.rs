//! Load-once mapping from sector coordinates to sector names.
//!
//! The table is read from a CSV sector list with `id64 X`, `id64 Y`, `id64 Z`
//! and `Sector` columns; other columns are ignored and rows without an X
//! coordinate are skipped. A table is immutable once built. One table may be
//! installed process-wide with [`SectorTable::install`] before first use.

use std::{collections::HashMap, fs::File, io::Read, path::Path};

use csv::{Position, StringRecord};
use once_cell::sync::{Lazy, OnceCell};
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    coord::SectorCoord,
    error::{Error, Result},
    id64::Address,
    name::format_suffix,
};

/// Name used for sectors missing from the table.
pub const UNKNOWN_SECTOR: &str = "Unknown Sector";

/// The process-wide table, set at most once.
static INSTALLED: OnceCell<SectorTable> = OnceCell::new();

/// Stand-in returned by [`SectorTable::global`] before anything is installed.
static EMPTY: Lazy<SectorTable> = Lazy::new(SectorTable::default);

/// One row of the sector list.
#[derive(Debug, Deserialize)]
struct SectorRow {
    /// Sector X coordinate; rows without one are skipped.
    #[serde(rename = "id64 X")]
    x: Option<u32>,
    /// Sector Y coordinate.
    #[serde(rename = "id64 Y")]
    y: Option<u32>,
    /// Sector Z coordinate.
    #[serde(rename = "id64 Z")]
    z: Option<u32>,
    /// Display name.
    #[serde(rename = "Sector")]
    name: String,
}

/// Immutable sector name table.
#[derive(Debug, Default, Clone)]
pub struct SectorTable {
    /// Names keyed by coordinates.
    by_coord: HashMap<SectorCoord, String>,
}

impl SectorTable {
    /// Build a table from `(coordinates, name)` pairs. Later duplicates win.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (SectorCoord, S)>,
        S: Into<String>,
    {
        Self {
            by_coord: entries
                .into_iter()
                .map(|(coord, name)| (coord, name.into()))
                .collect(),
        }
    }

    /// Parse a CSV sector list.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let headers = rdr.headers()?.clone();
        let mut record = StringRecord::new();
        let mut by_coord = HashMap::new();
        let mut skipped = 0usize;
        while rdr.read_record(&mut record)? {
            let row: SectorRow = record.deserialize(Some(&headers))?;
            // Line the record starts on; quoted fields may span lines.
            let line = record.position().map_or(0, Position::line);
            let Some(x) = row.x else {
                skipped += 1;
                continue;
            };
            let y = row.y.ok_or(Error::IncompleteSector { line, axis: 'Y' })?;
            let z = row.z.ok_or(Error::IncompleteSector { line, axis: 'Z' })?;
            by_coord.insert(SectorCoord::new(x, y, z), row.name);
        }
        debug!(skipped, "skipped sector rows without coordinates");
        info!(sectors = by_coord.len(), "loaded sector list");
        Ok(Self { by_coord })
    }

    /// Read a CSV sector list from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading sector list");
        Self::from_reader(File::open(path)?)
    }

    /// Install `table` as the process-wide table. Fails if one is already
    /// installed.
    pub fn install(table: Self) -> Result<&'static Self> {
        INSTALLED
            .set(table)
            .map_err(|_| Error::SectorTableInstalled)?;
        Ok(Self::global())
    }

    /// The installed table, or an empty one if none has been installed.
    pub fn global() -> &'static Self {
        INSTALLED.get().unwrap_or(&*EMPTY)
    }

    /// Number of named sectors.
    pub fn len(&self) -> usize {
        self.by_coord.len()
    }

    /// True if the table has no sectors.
    pub fn is_empty(&self) -> bool {
        self.by_coord.is_empty()
    }

    /// Name of the sector at `coord`, if known.
    pub fn get(&self, coord: &SectorCoord) -> Option<&str> {
        self.by_coord.get(coord).map(String::as_str)
    }

    /// Name of the sector at `coord`, or [`UNKNOWN_SECTOR`].
    pub fn sector_name(&self, coord: &SectorCoord) -> &str {
        self.get(coord).unwrap_or(UNKNOWN_SECTOR)
    }

    /// Coordinates of the sector called `name`.
    pub fn coords_of(&self, name: &str) -> Option<SectorCoord> {
        self.by_coord
            .iter()
            .filter(|(_, n)| n.as_str() == name)
            .map(|(coord, _)| *coord)
            .min()
    }

    /// Full display name of `addr`: sector name, a space, and the suffix.
    pub fn resolve_name(&self, addr: &Address) -> String {
        format!("{} {}", self.sector_name(&addr.sector), format_suffix(addr))
    }
}
