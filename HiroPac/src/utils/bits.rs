//! Bit rotation helpers
//!
//! Counts are taken modulo 8, so `rot_byte_left(v, 4)` and
//! `rot_byte_right(v, 4)` both swap the nibbles of `v`.

/// Rotate an 8-bit value left by `count` bits.
#[inline]
#[must_use]
pub fn rot_byte_left(value: u8, count: u32) -> u8 {
    value.rotate_left(count & 7)
}

/// Rotate an 8-bit value right by `count` bits.
#[inline]
#[must_use]
pub fn rot_byte_right(value: u8, count: u32) -> u8 {
    value.rotate_right(count & 7)
}

/// Rotation direction for [`rot_byte`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Left,
    Right,
}

/// Rotate an 8-bit value by `count` bits in the given direction.
#[inline]
#[must_use]
pub fn rot_byte(value: u8, count: u32, direction: Rotation) -> u8 {
    match direction {
        Rotation::Left => rot_byte_left(value, count),
        Rotation::Right => rot_byte_right(value, count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nibble_swap() {
        assert_eq!(rot_byte_left(0x12, 4), 0x21);
        assert_eq!(rot_byte_right(0x12, 4), 0x21);
        assert_eq!(rot_byte_left(0xF0, 4), 0x0F);
    }

    #[test]
    fn test_count_is_masked() {
        assert_eq!(rot_byte_left(0x81, 9), rot_byte_left(0x81, 1));
        assert_eq!(rot_byte_right(0x81, 8), 0x81);
    }

    #[test]
    fn test_opposite_directions_restore() {
        for count in 0..8 {
            for value in 0..=u8::MAX {
                assert_eq!(rot_byte_right(rot_byte_left(value, count), count), value);
                assert_eq!(rot_byte_left(rot_byte_right(value, count), count), value);
            }
        }
    }

    #[test]
    fn test_same_direction_twice_only_restores_for_nibbles() {
        // A one-bit rotation applied twice in the same direction moves bits by two.
        assert_eq!(rot_byte_left(rot_byte_left(0x01, 1), 1), 0x04);
        assert_ne!(rot_byte_right(rot_byte_right(0x01, 1), 1), 0x01);

        // Four bits twice is a full turn, so the nibble swap is its own inverse.
        for value in 0..=u8::MAX {
            assert_eq!(rot_byte_left(rot_byte_left(value, 4), 4), value);
        }
    }
}
