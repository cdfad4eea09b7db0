//! FIT CRC-16 checksum engine
//!
//! The FIT container carries two checksums computed with the same
//! algorithm: one over the first 12 header bytes, stored in header
//! bytes 12-13, and one over the whole header + message stream, stored
//! in the final two bytes of the file. The algorithm is the CRC-16/ARC
//! variant from the FIT SDK, implemented with a 16-entry nibble lookup
//! table.

/// Nibble lookup table from the FIT SDK CRC-16 definition.
const CRC_TABLE: [u16; 16] = [
    0x0000, 0xCC01, 0xD801, 0x1400, 0xF001, 0x3C00, 0x2800, 0xE401,
    0xA001, 0x6C00, 0x7800, 0xB401, 0x5000, 0x9C01, 0x8801, 0x4400,
];

/// Compute the FIT CRC-16 over a byte slice.
///
/// Each byte is processed as two 4-bit nibbles, low nibble first. The
/// empty slice yields 0.
pub fn crc16(data: &[u8]) -> u16 {
    let mut crc = 0u16;
    for &byte in data {
        crc = update_nibble(crc, byte & 0x0F);
        crc = update_nibble(crc, byte >> 4);
    }
    crc
}

fn update_nibble(crc: u16, nibble: u8) -> u16 {
    let tmp = CRC_TABLE[(crc & 0x0F) as usize];
    let crc = (crc >> 4) & 0x0FFF;
    crc ^ tmp ^ CRC_TABLE[(nibble & 0x0F) as usize]
}

/// Verify the trailing whole-file checksum of an encoded FIT file.
///
/// Recomputes the CRC over all bytes except the final two and compares
/// against the little-endian value stored there.
pub fn verify_file_crc(frame: &[u8]) -> bool {
    if frame.len() < 2 {
        return false;
    }
    let data_end = frame.len() - 2;
    let computed = crc16(&frame[..data_end]);
    let stored = u16::from_le_bytes([frame[data_end], frame[data_end + 1]]);
    computed == stored
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_zero() {
        assert_eq!(crc16(b""), 0);
    }

    #[test]
    fn test_zero_bytes_are_zero() {
        // Every nibble of 0x00 maps through table[0] == 0
        assert_eq!(crc16(&[0x00]), 0);
        assert_eq!(crc16(&[0x00; 12]), 0);
    }

    #[test]
    fn test_standard_check_value() {
        // CRC-16/ARC check value for the conventional test input
        assert_eq!(crc16(b"123456789"), 0xBB3D);
    }

    #[test]
    fn test_deterministic() {
        let data = b"Threshold workout \xF0\x9F\x9A\xB4";
        assert_eq!(crc16(data), crc16(data));
    }

    #[test]
    fn test_order_sensitive() {
        assert_ne!(crc16(b"ab"), crc16(b"ba"));
    }

    #[test]
    fn test_verify_file_crc_roundtrip() {
        let payload = b"arbitrary message stream";
        let mut frame = payload.to_vec();
        frame.extend_from_slice(&crc16(payload).to_le_bytes());
        assert!(verify_file_crc(&frame));

        // Corrupt one payload byte
        frame[3] ^= 0xFF;
        assert!(!verify_file_crc(&frame));
    }

    #[test]
    fn test_verify_file_crc_short_frame() {
        assert!(!verify_file_crc(&[]));
        assert!(!verify_file_crc(&[0x00]));
    }
}
