//! Archive byte order.
//!
//! Every multi-byte number in a WAD2 file is stored little-endian regardless
//! of the machine that wrote it. These helpers convert between that order and
//! host values.

use byteorder::{ByteOrder, LittleEndian};

/// Decode a 32-bit signed integer stored in archive byte order.
#[inline]
pub fn little_long(bytes: [u8; 4]) -> i32 {
    LittleEndian::read_i32(&bytes)
}

/// Encode a host value into archive byte order.
#[inline]
pub fn to_little_long(value: i32) -> [u8; 4] {
    let mut bytes = [0u8; 4];
    LittleEndian::write_i32(&mut bytes, value);
    bytes
}

/// Reinterpret a value whose bits were loaded verbatim from the archive as a
/// host value.
///
/// A no-op on little-endian hosts and a byte swap on big-endian ones.
#[inline]
pub fn little_to_host(raw: i32) -> i32 {
    little_long(raw.to_ne_bytes())
}

/// Inverse of [`little_to_host`].
#[inline]
pub fn host_to_little(value: i32) -> i32 {
    i32::from_ne_bytes(to_little_long(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_little_long() {
        assert_eq!(little_long([0x40, 0x00, 0x00, 0x00]), 64);
        assert_eq!(little_long([0xFF, 0xFF, 0xFF, 0xFF]), -1);
        assert_eq!(little_long([0x01, 0x02, 0x03, 0x04]), 0x04030201);
    }

    #[test]
    fn test_to_little_long() {
        assert_eq!(to_little_long(0x04030201), [0x01, 0x02, 0x03, 0x04]);
        assert_eq!(to_little_long(-2), [0xFE, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_little_to_host_matches_from_le() {
        let raw = i32::from_ne_bytes([0x20, 0x00, 0x00, 0x00]);
        assert_eq!(little_to_host(raw), 32);
        assert_eq!(little_to_host(raw), i32::from_le(raw));
    }

    proptest! {
        #[test]
        fn host_order_round_trip(value in any::<i32>()) {
            prop_assert_eq!(little_to_host(host_to_little(value)), value);
            prop_assert_eq!(host_to_little(little_to_host(value)), value);
        }

        #[test]
        fn byte_round_trip(bytes in any::<[u8; 4]>()) {
            prop_assert_eq!(to_little_long(little_long(bytes)), bytes);
        }
    }
}
