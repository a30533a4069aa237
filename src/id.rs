//! Bit layout of the five sub-fields packed into a 29-bit arbitration
//! identifier. The spans are contiguous and non-overlapping, ordered
//! high-to-low as device_type(5) | manufacturer(8) | api_class(6) |
//! api_index(4) | device_id(6). The layout is a fixed protocol contract.

pub const DEVICE_TYPE_MASK: u32 = 0x1F00_0000;
pub const MANUFACTURER_MASK: u32 = 0x00FF_0000;
pub const API_CLASS_MASK: u32 = 0x0000_FC00;
pub const API_INDEX_MASK: u32 = 0x0000_03C0;
pub const DEVICE_ID_MASK: u32 = 0x0000_003F;

pub const DEVICE_TYPE_SHIFT: u32 = 24;
pub const MANUFACTURER_SHIFT: u32 = 16;
pub const API_CLASS_SHIFT: u32 = 10;
pub const API_INDEX_SHIFT: u32 = 6;
pub const DEVICE_ID_SHIFT: u32 = 0;

/// Shifts a field value into its layout position, truncating to the field
/// width (values wider than the field are a don't-care, not an error).
pub(crate) const fn pack_field(value: u32, shift: u32, mask: u32) -> u32 {
    (value << shift) & mask
}

/// Extracts a field value from an arbitration identifier.
pub(crate) const fn unpack_field(id: u32, shift: u32, mask: u32) -> u32 {
    (id & mask) >> shift
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_MASKS: [u32; 5] = [
        DEVICE_TYPE_MASK,
        MANUFACTURER_MASK,
        API_CLASS_MASK,
        API_INDEX_MASK,
        DEVICE_ID_MASK,
    ];

    #[test]
    fn masks_cover_all_29_bits_without_overlap() {
        let mut union = 0u32;

        for (i, mask) in ALL_MASKS.iter().enumerate() {
            for other in &ALL_MASKS[i + 1..] {
                assert_eq!(mask & other, 0);
            }

            union |= mask;
        }

        assert_eq!(union, 0x1FFF_FFFF);
    }

    #[test]
    fn field_extraction_matches_documented_layout() {
        let id = 0x0804_B543;

        assert_eq!(unpack_field(id, DEVICE_TYPE_SHIFT, DEVICE_TYPE_MASK), 8);
        assert_eq!(unpack_field(id, MANUFACTURER_SHIFT, MANUFACTURER_MASK), 4);
        assert_eq!(unpack_field(id, API_CLASS_SHIFT, API_CLASS_MASK), 45);
        assert_eq!(unpack_field(id, API_INDEX_SHIFT, API_INDEX_MASK), 5);
        assert_eq!(unpack_field(id, DEVICE_ID_SHIFT, DEVICE_ID_MASK), 3);
    }

    #[test]
    fn packing_truncates_to_field_width() {
        assert_eq!(pack_field(0x7F, API_CLASS_SHIFT, API_CLASS_MASK), 0xFC00);
        assert_eq!(pack_field(0x1F, API_INDEX_SHIFT, API_INDEX_MASK), 0x03C0);
        assert_eq!(pack_field(0x7F, DEVICE_ID_SHIFT, DEVICE_ID_MASK), 0x003F);
    }
}
