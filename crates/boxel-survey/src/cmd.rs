//! Command handlers for the `boxel-survey` CLI.
//!
//! Each handler returns the text to print; `main` owns the output streams.

use std::{fs, path::Path};

use anyhow::{Context, Result, anyhow, bail};
use boxel::{
    Address, BoxelCoord, BoxelName, KnownIndexSet, Navigator, SectorCoord, SectorTable,
    SurveyOptions, decode, encode, known_indices, name::mass_letter,
};
use tracing::{debug, info};

/// Where the known indices for a boxel come from.
#[derive(Debug, Clone, Default)]
pub struct KnownSource<'a> {
    /// Indices given directly.
    pub indices: &'a [u32],
    /// File of catalogued names, one per line.
    pub catalogue: Option<&'a Path>,
    /// Ignore known indices when picking the next star.
    pub include_known: bool,
}

/// Load the sector list at `path`, if any, and install it process-wide.
pub fn load_sectors(path: Option<&Path>) -> Result<&'static SectorTable> {
    let Some(path) = path else {
        info!("no sector list given; every sector is unknown");
        return Ok(SectorTable::global());
    };
    let table = SectorTable::from_path(path)
        .with_context(|| format!("loading sector list {}", path.display()))?;
    Ok(SectorTable::install(table)?)
}

/// Collect the known indices for the boxel of `id64`.
///
/// Catalogue names are matched against the boxel prefix of `id64`'s own
/// name. If that name is not boxel-addressed the catalogue contributes
/// nothing.
pub fn known_set(
    sectors: &SectorTable,
    id64: u64,
    source: &KnownSource<'_>,
) -> Result<KnownIndexSet> {
    let mut known: KnownIndexSet = source.indices.iter().copied().collect();
    if let Some(path) = source.catalogue {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading catalogue {}", path.display()))?;
        let own = sectors.resolve_name(&decode(id64));
        match BoxelName::parse(&own) {
            Some(parsed) => {
                let found = known_indices(parsed.prefix(), text.lines().map(str::trim));
                debug!(prefix = parsed.prefix(), found = found.len(), "catalogue matches");
                known.extend(found.iter());
            }
            None => debug!(name = %own, "not a boxel-addressed name; ignoring catalogue"),
        }
    }
    Ok(known)
}

/// Describe every field of `id64`, one `key: value` per line.
pub fn decode_fields(sectors: &SectorTable, id64: u64) -> String {
    let a = decode(id64);
    [
        format!("id64: {id64}"),
        format!("mass_code: {} ({})", a.mass_code, mass_letter(a.mass_code)),
        format!("sector: {} {}", a.sector, sectors.sector_name(&a.sector)),
        format!("boxel: {}", a.boxel),
        format!("index: {}", a.index),
        format!("body_id: {}", a.body_id),
        format!("name: {}", sectors.resolve_name(&a)),
    ]
    .join("\n")
}

/// Fields for the `encode` subcommand.
#[derive(Debug, Clone, Copy)]
pub struct EncodeFields {
    /// Size class.
    pub mass_code: u8,
    /// Sector cell.
    pub sector: SectorCoord,
    /// Boxel cell.
    pub boxel: BoxelCoord,
    /// Object index.
    pub index: u32,
    /// Body identifier.
    pub body_id: u32,
}

/// Pack fields into an id64.
pub fn encode_fields(fields: EncodeFields) -> Result<u64> {
    let addr = Address {
        mass_code: fields.mass_code,
        sector: fields.sector,
        boxel: fields.boxel,
        index: fields.index,
        body_id: fields.body_id,
    };
    Ok(encode(&addr)?)
}

/// Name of the next uncatalogued star in the boxel of `id64`.
pub fn next(sectors: &SectorTable, id64: u64, source: &KnownSource<'_>) -> Result<String> {
    let nav: Navigator<'_> = Navigator::new(sectors);
    let known = if source.include_known {
        KnownIndexSet::new()
    } else {
        known_set(sectors, id64, source)?
    };
    Ok(nav.next_uncatalogued_index(id64, &known)?)
}

/// Name of the first star `offset` boxels along the curve from `id64`.
pub fn boxel(sectors: &SectorTable, id64: u64, offset: i64) -> Result<String> {
    let nav: Navigator<'_> = Navigator::new(sectors);
    nav.boxel_at_offset(id64, offset)?.ok_or_else(|| {
        let name = sectors.resolve_name(&decode(id64));
        anyhow!("{name} is in the last boxel of its layer")
    })
}

/// Curve position of the boxel of `id64`.
pub fn position(sectors: &SectorTable, id64: u64) -> Result<String> {
    let nav: Navigator<'_> = Navigator::new(sectors);
    let pos = nav.current_position(&decode(id64))?;
    Ok(format!("h: {}\nmax_h: {}", pos.h, pos.max_h))
}

/// Split a boxel-addressed name into prefix and index.
pub fn parse_name(name: &str) -> Result<String> {
    let Some(parsed) = BoxelName::parse(name) else {
        bail!("'{name}' is not a boxel-addressed name");
    };
    Ok(format!(
        "prefix: {}\nindex: {}\nmass_code: {}",
        parsed.prefix(),
        parsed.index,
        parsed.mass_code
    ))
}

/// Turn a boxel-addressed name back into its id64.
pub fn lookup(sectors: &SectorTable, name: &str) -> Result<u64> {
    let parsed =
        BoxelName::parse(name).ok_or_else(|| anyhow!("'{name}' is not a boxel-addressed name"))?;
    let addr = parsed.to_address(sectors).ok_or_else(|| {
        anyhow!("sector '{}' is unknown or the boxel does not fit", parsed.sector)
    })?;
    Ok(encode(&addr)?)
}

/// The full survey snapshot for `id64`.
pub fn survey(
    sectors: &SectorTable,
    id64: u64,
    steps: i64,
    source: &KnownSource<'_>,
) -> Result<String> {
    let nav: Navigator<'_> = Navigator::new(sectors);
    let known = known_set(sectors, id64, source)?;
    let options = SurveyOptions {
        skip_known: !source.include_known,
        steps,
    };
    let survey = nav.survey(id64, &known, options)?;
    Ok(survey.to_string().trim_end().to_string())
}
