//! Header bit layout for the EV3 UART sensor protocol
//!
//! A header byte packs three fields:
//! - bits 7..6: message type (SYS, CMD, INFO, DATA)
//! - bits 5..3: payload length code, length = `2^code`
//! - bits 2..0: sub-type, meaning depends on the message type

/// Mask selecting the message type bits
pub const TYPE_MASK: u8 = 0xC0;

/// Mask selecting the sub-type bits
pub const SUBTYPE_MASK: u8 = 0x07;

/// Mask selecting the length code bits
pub const LENGTH_MASK: u8 = 0x38;

/// Shift of the length code within the header
pub const LENGTH_SHIFT: u8 = 3;

/// Mask keeping only the type and sub-type bits
pub const SANITIZE_MASK: u8 = TYPE_MASK | SUBTYPE_MASK;

/// Largest payload a single message can carry
pub const MAX_PAYLOAD_LEN: usize = 32;

/// Largest length code a WRITE header may carry (`2^5 == 32`)
pub const MAX_WRITE_LENGTH_CODE: u8 = 5;

/// Buffer needed to hold the largest frame (HEADER + PAYLOAD + CHECKSUM)
pub const BUFFER_LEN: usize = 1 + MAX_PAYLOAD_LEN + 1;

/// System messages, single byte, no payload
pub mod sys {
    pub const BASE: u8 = 0x00;
    pub const SYNC: u8 = 0x00;
    pub const NACK: u8 = 0x02;
    pub const ACK: u8 = 0x04;
}

/// Command messages, payload + checksum
pub mod cmd {
    pub const BASE: u8 = 0x40;
    pub const TYPE: u8 = 0x00;
    pub const MODES: u8 = 0x01;
    pub const SPEED: u8 = 0x02;
    pub const SELECT: u8 = 0x03;
    pub const WRITE: u8 = 0x04;
}

/// Info messages (sensor to brick only)
pub mod info {
    pub const BASE: u8 = 0x80;
}

/// Data messages (sensor to brick only)
pub mod data {
    pub const BASE: u8 = 0xC0;
}

/// Extract the length code from a header byte
pub const fn length_code(header: u8) -> u8 {
    (header & LENGTH_MASK) >> LENGTH_SHIFT
}

/// Strip the length code from a header byte
pub const fn sanitize(header: u8) -> u8 {
    header & SANITIZE_MASK
}

/// Build a header byte from its fields
pub const fn header(base: u8, subtype: u8, length_code: u8) -> u8 {
    base | subtype | ((length_code << LENGTH_SHIFT) & LENGTH_MASK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_fits_largest_frame() {
        assert_eq!(BUFFER_LEN, 34);
    }

    #[test]
    fn test_length_code() {
        assert_eq!(length_code(0x44), 0);
        assert_eq!(length_code(0x6C), 5);
        assert_eq!(length_code(0xFF), 7);
    }

    #[test]
    fn test_sanitize_keeps_type_and_subtype() {
        assert_eq!(sanitize(0x6C), cmd::BASE | cmd::WRITE);
        assert_eq!(sanitize(0xFF), 0xC7);
    }

    #[test]
    fn test_header_roundtrip_fields() {
        let hdr = header(cmd::BASE, cmd::WRITE, 3);
        assert_eq!(hdr, 0x5C);
        assert_eq!(length_code(hdr), 3);
        assert_eq!(sanitize(hdr), 0x44);
    }
}
