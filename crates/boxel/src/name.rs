//! Catalogue-style display names.
//!
//! A boxel-addressed name reads `<Sector> <AB>-<C> <m><idx>` or
//! `<Sector> <AB>-<C> <m><D>-<idx>`. The letters and `D` spell the boxel's
//! packed coordinates in base 26, least significant first, and `m` is the
//! mass code as a lowercase letter.

use std::{collections::BTreeSet, fmt};

use crate::{
    coord::{BoxelCoord, SectorCoord},
    id64::{self, Address},
    sector::SectorTable,
};

/// Bits each boxel axis occupies in the packed boxel index, whatever the
/// mass code.
const BOXEL_INDEX_AXIS_BITS: u32 = 7;

/// Radix of the boxel letters.
const LETTERS: u64 = 26;

/// Pack boxel coordinates into one integer, X least significant.
pub fn boxel_index(boxel: &BoxelCoord) -> u64 {
    u64::from(boxel.x)
        + (u64::from(boxel.y) << BOXEL_INDEX_AXIS_BITS)
        + (u64::from(boxel.z) << (2 * BOXEL_INDEX_AXIS_BITS))
}

/// Inverse of [`boxel_index`]. Returns `None` if `z` overflows `u32`.
fn unpack_boxel_index(packed: u64) -> Option<BoxelCoord> {
    let mask = (1u64 << BOXEL_INDEX_AXIS_BITS) - 1;
    Some(BoxelCoord::new(
        (packed & mask) as u32,
        ((packed >> BOXEL_INDEX_AXIS_BITS) & mask) as u32,
        u32::try_from(packed >> (2 * BOXEL_INDEX_AXIS_BITS)).ok()?,
    ))
}

/// Mass letters, indexed by mass code.
const MASS_LETTERS: &[u8; 8] = b"abcdefgh";

/// Lowercase letter for a mass code: `a` for 0 through `h` for 7. Codes out
/// of range render as `?`.
pub fn mass_letter(mass_code: u8) -> char {
    MASS_LETTERS
        .get(usize::from(mass_code))
        .map_or('?', |&letter| char::from(letter))
}

/// Uppercase letter for a base-26 digit.
fn letter(digit: u64) -> char {
    char::from(b'A' + (digit % LETTERS) as u8)
}

/// The suffix that follows the sector name, e.g. `AA-A a5` or `AA-A a2-5`.
pub fn format_suffix(addr: &Address) -> String {
    let packed = boxel_index(&addr.boxel);
    let [a, b, c] = [0, 1, 2].map(|place| letter(packed / LETTERS.pow(place)));
    let d = packed / LETTERS.pow(3);
    let m = mass_letter(addr.mass_code);
    let index = addr.index;
    if d == 0 {
        format!("{a}{b}-{c} {m}{index}")
    } else {
        format!("{a}{b}-{c} {m}{d}-{index}")
    }
}

/// A parsed boxel-addressed name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxelName {
    /// Sector name.
    pub sector: String,
    /// Mass code spelled by the mass letter.
    pub mass_code: u8,
    /// Packed boxel coordinates spelled by the letters and `D`.
    pub boxel_index: u64,
    /// Trailing object index.
    pub index: u32,
    /// Everything before the trailing index.
    prefix: String,
}

impl BoxelName {
    /// Parse a display name. Returns `None` for anything that is not a
    /// boxel-addressed name; that is an answer, not an error.
    pub fn parse(name: &str) -> Option<Self> {
        let (head, tail) = name.rsplit_once(' ')?;
        let (sector, letters) = head.rsplit_once(' ')?;
        if sector.is_empty()
            || !sector
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == ' ')
        {
            return None;
        }

        let &[a, b, b'-', c] = letters.as_bytes() else {
            return None;
        };
        if ![a, b, c].iter().all(u8::is_ascii_uppercase) {
            return None;
        }

        let mut tail_chars = tail.chars();
        let mass_code = match tail_chars.next()? {
            m @ 'a'..='h' => m as u8 - b'a',
            _ => return None,
        };
        let numbers = tail_chars.as_str();
        let (d, index_digits) = match numbers.split_once('-') {
            Some((d, index)) => (parse_digits(d)?, index),
            None => (0, numbers),
        };
        let index = u32::try_from(parse_digits(index_digits)?).ok()?;

        let digit = |l: u8| u64::from(l - b'A');
        let boxel_index = d
            .checked_mul(LETTERS.pow(3))?
            .checked_add(digit(a) + digit(b) * LETTERS + digit(c) * LETTERS.pow(2))?;

        Some(Self {
            sector: sector.to_string(),
            mass_code,
            boxel_index,
            index,
            prefix: name[..name.len() - index_digits.len()].to_string(),
        })
    }

    /// Everything before the trailing index: `<Sector> <AB>-<C> <m>` or
    /// `<Sector> <AB>-<C> <m><D>-`. Catalogue entries in the same boxel
    /// share this prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Boxel coordinates spelled by the name.
    pub fn boxel(&self) -> Option<BoxelCoord> {
        unpack_boxel_index(self.boxel_index)
    }

    /// Rebuild the address this name stands for. Returns `None` if the sector
    /// is not in `table` or the boxel does not fit the mass code's grid.
    pub fn to_address(&self, table: &SectorTable) -> Option<Address> {
        let sector: SectorCoord = table.coords_of(&self.sector)?;
        let boxel = self.boxel()?;
        if !boxel.fits(id64::boxel_bits(self.mass_code)) {
            return None;
        }
        Address::new(self.mass_code, sector, boxel, self.index).ok()
    }
}

impl fmt::Display for BoxelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.index)
    }
}

/// Parse a non-empty run of ASCII digits.
fn parse_digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Indices already catalogued within one boxel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownIndexSet(BTreeSet<u32>);

impl KnownIndexSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `index` as known.
    pub fn insert(&mut self, index: u32) -> bool {
        self.0.insert(index)
    }

    /// True if `index` is known.
    pub fn contains(&self, index: u32) -> bool {
        self.0.contains(&index)
    }

    /// Number of known indices.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if nothing is known.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Largest known index.
    pub fn max(&self) -> Option<u32> {
        self.0.last().copied()
    }

    /// Estimated population of the boxel: one past the largest known index.
    pub fn estimate(&self) -> Option<u64> {
        self.max().map(|m| u64::from(m) + 1)
    }

    /// Smallest non-negative index not in the set.
    pub fn first_missing(&self) -> u64 {
        let mut candidate = 0u64;
        for &known in &self.0 {
            if u64::from(known) != candidate {
                break;
            }
            candidate += 1;
        }
        candidate
    }

    /// Known indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<u32> for KnownIndexSet {
    fn from_iter<T: IntoIterator<Item = u32>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<u32> for KnownIndexSet {
    fn extend<T: IntoIterator<Item = u32>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

/// Split a catalogue name into its prefix and trailing index. The index must
/// be preceded by `-` or a mass letter.
fn split_trailing_index(name: &str) -> Option<(&str, u32)> {
    let prefix = name.trim_end_matches(|c: char| c.is_ascii_digit());
    if prefix.len() == name.len() || !prefix.ends_with(|c: char| matches!(c, '-' | 'a'..='h')) {
        return None;
    }
    let index = name[prefix.len()..].parse().ok()?;
    Some((prefix, index))
}

/// Collect the indices of the `names` that share `prefix` exactly.
pub fn known_indices<'a, I>(prefix: &str, names: I) -> KnownIndexSet
where
    I: IntoIterator<Item = &'a str>,
{
    names
        .into_iter()
        .filter_map(split_trailing_index)
        .filter(|(p, _)| *p == prefix)
        .map(|(_, index)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;

    fn addr(mass_code: u8, boxel: [u32; 3], index: u32) -> Address {
        Address {
            mass_code,
            boxel: boxel.into(),
            index,
            ..Address::default()
        }
    }

    #[test]
    fn suffix_without_d() {
        assert_eq!(format_suffix(&addr(0, [0, 0, 0], 5)), "AA-A a5");
        assert_eq!(format_suffix(&addr(0, [0, 0, 1], 0)), "EG-Y a0");
        assert_eq!(format_suffix(&addr(7, [0, 0, 0], 12)), "AA-A h12");
    }

    #[test]
    fn out_of_range_mass_code_renders_placeholder() {
        assert_eq!(mass_letter(8), '?');
        assert_eq!(format_suffix(&addr(200, [0, 0, 0], 1)), "AA-A ?1");
        assert_eq!(format_suffix(&addr(u8::MAX, [0, 0, 0], 1)), "AA-A ?1");
    }

    #[test]
    fn suffix_with_d() {
        // 80 + 18 * 128 + 2 * 16384 == 2 * 26^3
        assert_eq!(format_suffix(&addr(0, [80, 18, 2], 5)), "AA-A a2-5");
        assert_eq!(format_suffix(&addr(0, [127, 127, 127], 42)), "RH-I a119-42");
        assert_eq!(format_suffix(&addr(3, [1, 2, 3], 500)), "JC-V d2-500");
    }

    #[test]
    fn parse_both_shapes() {
        let n = BoxelName::parse("Col 285 Sector AA-A a5").expect("short form");
        assert_eq!(n.sector, "Col 285 Sector");
        assert_eq!(n.prefix(), "Col 285 Sector AA-A a");
        assert_eq!(n.index, 5);
        assert_eq!(n.mass_code, 0);
        assert_eq!(n.boxel_index, 0);

        let n = BoxelName::parse("Wregoe JC-V d2-500").expect("long form");
        assert_eq!(n.prefix(), "Wregoe JC-V d2-");
        assert_eq!(n.index, 500);
        assert_eq!(n.mass_code, 3);
        assert_eq!(n.boxel(), Some(BoxelCoord::new(1, 2, 3)));
        assert_eq!(n.to_string(), "Wregoe JC-V d2-500");
    }

    #[test]
    fn parse_rejects_other_shapes() {
        for name in [
            "Sol",
            "Col 285 Sector AA-A",
            "Col 285 Sector AA-A i5",
            "Col 285 Sector Aa-A a5",
            "Col 285 Sector AA-A a",
            "Col 285 Sector AA-A a5-",
            "Col 285 Sector AA-A a-5",
            "Col 285 Sector AAA a5",
            " AA-A a5",
            "HIP 1234 A",
            "Col 285 Sector AA-A a99999999999",
            "Ha-Ill Hoper AA-A a5",
            "Col 285 Sector AA-A a99999999999999999999-1",
            "Col 285 Sector AA-A a9999999999999999-1",
        ] {
            assert!(BoxelName::parse(name).is_none(), "{name:?} should not parse");
        }
    }

    #[test]
    fn name_to_address() -> Result<()> {
        let table = SectorTable::from_entries([(SectorCoord::new(40, 32, 18), "Wregoe")]);
        let expected =
            Address::new(3, SectorCoord::new(40, 32, 18), BoxelCoord::new(1, 2, 3), 500)?;
        let parsed = BoxelName::parse(&table.resolve_name(&expected)).expect("parses");
        assert_eq!(parsed.to_address(&table), Some(expected));

        // Boxel z of 3 does not fit the single-bit grid of mass code 6.
        let too_wide = BoxelName::parse("Wregoe JC-V g2-500").expect("parses");
        assert_eq!(too_wide.to_address(&table), None);

        let unknown = BoxelName::parse("Nowhere JC-V d2-500").expect("parses");
        assert_eq!(unknown.to_address(&table), None);
        Ok(())
    }

    #[test]
    fn known_indices_filters_by_prefix() {
        let names = [
            "Wregoe JC-V d2-0",
            "Wregoe JC-V d2-1",
            "Wregoe JC-V d2-7",
            "Wregoe JC-V d3-2",
            "Wregoe JC-V d2-4 A",
            "Wregoe JC-V d12-9",
            "Sol",
        ];
        let known = known_indices("Wregoe JC-V d2-", names);
        assert_eq!(known.iter().collect::<Vec<_>>(), vec![0, 1, 7]);
        assert_eq!(known.estimate(), Some(8));

        let short = known_indices(
            "Col 285 Sector AA-A a",
            ["Col 285 Sector AA-A a3", "Col 285 Sector AA-A b3"],
        );
        assert_eq!(short.iter().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn first_missing() {
        assert_eq!(KnownIndexSet::new().first_missing(), 0);
        assert_eq!(KnownIndexSet::from_iter([0, 1, 2]).first_missing(), 3);
        assert_eq!(KnownIndexSet::from_iter([0, 2]).first_missing(), 1);
        assert_eq!(KnownIndexSet::from_iter([1, 2]).first_missing(), 0);
    }
}
