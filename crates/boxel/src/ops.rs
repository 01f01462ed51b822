//! Bit masks for id64 field packing.

/// Bitmask with `width` least-significant bits set, for fields up to 64 bits.
#[inline]
pub const fn field_mask(width: u32) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}
