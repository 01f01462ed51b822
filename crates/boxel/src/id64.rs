//! Bit-exact codec between a `u64` id64 and its [`Address`] fields.
//!
//! Fields are packed from the least significant bit upward:
//!
//! ```text
//! mass_code[3] boxel_z[p] sector_z[7] boxel_y[p] sector_y[6]
//! boxel_x[p] sector_x[7] index[32 - 3p] body_id[9]
//! ```
//!
//! where `p = 7 - mass_code`. The field widths always sum to 64, so every
//! `u64` decodes and every in-range [`Address`] encodes losslessly.

use crate::{
    coord::{BoxelCoord, SectorCoord},
    error::{Error, Field, Result},
    ops::field_mask,
};

/// Width of the mass code field.
pub const MASS_CODE_BITS: u32 = 3;
/// Largest mass code; its boxel fields are zero-width.
pub const MAX_MASS_CODE: u8 = 7;
/// Boxel width per axis at mass code 0.
pub const MAX_BOXEL_BITS: u32 = 7;
/// Width of the sector X field.
pub const SECTOR_X_BITS: u32 = 7;
/// Width of the sector Y field.
pub const SECTOR_Y_BITS: u32 = 6;
/// Width of the sector Z field.
pub const SECTOR_Z_BITS: u32 = 7;
/// Combined width of the three boxel fields and the index.
pub const BOXEL_AND_INDEX_BITS: u32 = 32;
/// Width of the body identifier in the high bits.
pub const BODY_ID_BITS: u32 = 9;

/// Boxel bits per axis for `mass_code`.
pub const fn boxel_bits(mass_code: u8) -> u32 {
    MAX_BOXEL_BITS.saturating_sub(mass_code as u32)
}

/// Index bits for `mass_code`.
pub const fn index_bits(mass_code: u8) -> u32 {
    BOXEL_AND_INDEX_BITS - 3 * boxel_bits(mass_code)
}

/// Decoded id64.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Address {
    /// Size class in `[0, 7]`; 0 is the coarsest boxel grid.
    pub mass_code: u8,
    /// Sector cell.
    pub sector: SectorCoord,
    /// Boxel cell within the sector. Always the origin at mass code 7.
    pub boxel: BoxelCoord,
    /// Object index within the boxel.
    pub index: u32,
    /// Body within the system; zero for a system address.
    pub body_id: u32,
}

impl Address {
    /// Build an address, checking every field against its width.
    pub fn new(mass_code: u8, sector: SectorCoord, boxel: BoxelCoord, index: u32) -> Result<Self> {
        let addr = Self {
            mass_code,
            sector,
            boxel,
            index,
            body_id: 0,
        };
        addr.validate()?;
        Ok(addr)
    }

    /// Boxel bits per axis for this address's mass code.
    pub const fn boxel_bits(&self) -> u32 {
        boxel_bits(self.mass_code)
    }

    /// Index bits for this address's mass code.
    pub const fn index_bits(&self) -> u32 {
        index_bits(self.mass_code)
    }

    /// The same address with a different object index.
    pub const fn with_index(self, index: u32) -> Self {
        Self { index, ..self }
    }

    /// The same address with a different boxel cell.
    pub const fn with_boxel(self, boxel: BoxelCoord) -> Self {
        Self { boxel, ..self }
    }

    /// The system this address belongs to, dropping any body identifier.
    pub const fn system(self) -> Self {
        Self { body_id: 0, ..self }
    }

    /// Check every field against its declared width.
    pub fn validate(&self) -> Result<()> {
        if self.mass_code > MAX_MASS_CODE {
            return Err(Error::FieldOverflow {
                field: Field::MassCode,
                value: self.mass_code.into(),
                width: MASS_CODE_BITS,
            });
        }
        self.fields().try_for_each(|(field, value, width)| check(field, value, width))
    }

    /// Fields in packing order, least significant first, with their widths.
    fn fields(&self) -> impl Iterator<Item = (Field, u64, u32)> {
        let p = self.boxel_bits();
        [
            (Field::MassCode, u64::from(self.mass_code), MASS_CODE_BITS),
            (Field::BoxelZ, u64::from(self.boxel.z), p),
            (Field::SectorZ, u64::from(self.sector.z), SECTOR_Z_BITS),
            (Field::BoxelY, u64::from(self.boxel.y), p),
            (Field::SectorY, u64::from(self.sector.y), SECTOR_Y_BITS),
            (Field::BoxelX, u64::from(self.boxel.x), p),
            (Field::SectorX, u64::from(self.sector.x), SECTOR_X_BITS),
            (Field::Index, u64::from(self.index), self.index_bits()),
            (Field::BodyId, u64::from(self.body_id), BODY_ID_BITS),
        ]
        .into_iter()
    }
}

/// Reject `value` if it does not fit in `width` bits.
fn check(field: Field, value: u64, width: u32) -> Result<()> {
    if value & !field_mask(width) != 0 {
        return Err(Error::FieldOverflow {
            field,
            value,
            width,
        });
    }
    Ok(())
}

/// Sequential reader of fields from the least significant bit upward.
struct Unpacker {
    /// Source word.
    bits: u64,
    /// Bits consumed so far.
    offset: u32,
}

impl Unpacker {
    /// Take the next `width` bits.
    fn take(&mut self, width: u32) -> u32 {
        let value = (self.bits >> self.offset) & field_mask(width);
        self.offset += width;
        value as u32
    }
}

/// Decode an id64. Every `u64` is a valid input.
pub fn decode(id64: u64) -> Address {
    let mut r = Unpacker {
        bits: id64,
        offset: 0,
    };
    let mass_code = r.take(MASS_CODE_BITS) as u8;
    let p = boxel_bits(mass_code);
    let boxel_z = r.take(p);
    let sector_z = r.take(SECTOR_Z_BITS);
    let boxel_y = r.take(p);
    let sector_y = r.take(SECTOR_Y_BITS);
    let boxel_x = r.take(p);
    let sector_x = r.take(SECTOR_X_BITS);
    let index = r.take(index_bits(mass_code));
    let body_id = r.take(BODY_ID_BITS);
    debug_assert_eq!(r.offset, u64::BITS);

    Address {
        mass_code,
        sector: SectorCoord::new(sector_x, sector_y, sector_z),
        boxel: BoxelCoord::new(boxel_x, boxel_y, boxel_z),
        index,
        body_id,
    }
}

/// Encode an address, failing with [`Error::FieldOverflow`] if any field
/// exceeds its width.
pub fn encode(addr: &Address) -> Result<u64> {
    addr.validate()?;
    let (id64, offset) = addr
        .fields()
        .fold((0u64, 0u32), |(acc, offset), (_, value, width)| {
            (acc | (value << offset), offset + width)
        });
    debug_assert_eq!(offset, u64::BITS);
    Ok(id64)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sol.
    const SOL: u64 = 10_477_373_803;

    #[test]
    fn widths_fill_64_bits() {
        for mc in 0..=MAX_MASS_CODE {
            let total = MASS_CODE_BITS
                + 3 * boxel_bits(mc)
                + SECTOR_X_BITS
                + SECTOR_Y_BITS
                + SECTOR_Z_BITS
                + index_bits(mc)
                + BODY_ID_BITS;
            assert_eq!(total, 64, "mass code {mc}");
        }
        assert_eq!(index_bits(0), 11);
        assert_eq!(index_bits(7), 32);
    }

    #[test]
    fn decode_sol() {
        let a = decode(SOL);
        assert_eq!(a.mass_code, 3);
        assert_eq!(a.sector, SectorCoord::new(39, 32, 18));
        assert_eq!(a.boxel, BoxelCoord::new(0, 0, 13));
        assert_eq!(a.index, 0);
        assert_eq!(a.body_id, 0);
    }

    #[test]
    fn encode_known_values() -> Result<()> {
        let a = Address::new(0, SectorCoord::new(1, 2, 3), BoxelCoord::new(4, 5, 6), 7)?;
        assert_eq!(encode(&a)?, 123_287_070_444_592);

        let a = Address::new(3, SectorCoord::new(10, 20, 30), BoxelCoord::new(1, 2, 3), 500)?;
        assert_eq!(encode(&a)?, 17_182_575_595_291);

        let a = Address {
            body_id: 3,
            ..Address::new(2, SectorCoord::new(33, 12, 90), BoxelCoord::new(5, 17, 30), 99)?
        };
        assert_eq!(encode(&a)?, 108_113_675_185_347_314);
        assert_eq!(decode(108_113_675_185_347_314), a);
        Ok(())
    }

    #[test]
    fn all_ones_is_mass_code_seven() -> Result<()> {
        let a = decode(u64::MAX);
        assert_eq!(a.mass_code, 7);
        assert_eq!(a.boxel, BoxelCoord::ORIGIN);
        assert_eq!(a.sector, SectorCoord::new(127, 63, 127));
        assert_eq!(a.index, u32::MAX);
        assert_eq!(a.body_id, 511);
        assert_eq!(encode(&a)?, u64::MAX);
        Ok(())
    }

    #[test]
    fn overflow_names_the_field() {
        let base = Address::default();
        let cases = [
            (Address { mass_code: 8, ..base }, Field::MassCode),
            (Address { sector: SectorCoord::new(0, 64, 0), ..base }, Field::SectorY),
            (Address { sector: SectorCoord::new(128, 0, 0), ..base }, Field::SectorX),
            (Address { boxel: BoxelCoord::new(0, 0, 128), ..base }, Field::BoxelZ),
            (Address { mass_code: 6, boxel: BoxelCoord::new(2, 0, 0), ..base }, Field::BoxelX),
            (Address { index: 1 << 11, ..base }, Field::Index),
            (Address { body_id: 512, ..base }, Field::BodyId),
        ];
        for (addr, expected) in cases {
            match encode(&addr) {
                Err(Error::FieldOverflow { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected overflow on {expected}, got {other:?}"),
            }
        }

        // Zero-width boxel fields at mass code 7.
        let finest = Address { mass_code: 7, boxel: BoxelCoord::new(0, 1, 0), ..base };
        assert!(matches!(
            encode(&finest),
            Err(Error::FieldOverflow { field: Field::BoxelY, width: 0, .. })
        ));
    }

    #[test]
    fn builders_leave_other_fields() {
        let a = decode(SOL);
        let b = a.with_index(9).with_boxel(BoxelCoord::new(1, 1, 1));
        assert_eq!(b.mass_code, a.mass_code);
        assert_eq!(b.sector, a.sector);
        assert_eq!(b.index, 9);
        assert_eq!(a.index, 0);
    }
}
