//! Header byte analysis
//!
//! Decides whether a byte is a header the brick can legally send to a
//! sensor, and if so, how many payload bytes follow it.

use crate::magics::{self, cmd, sys, MAX_WRITE_LENGTH_CODE};

/// Raise two to the power of `val`
///
/// Only defined for `val` in `[0, 7]`.
pub const fn two_pow(val: u8) -> u8 {
    1 << val
}

/// The kinds of header the brick sends to a sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HeaderKind {
    /// SYS ACK, no payload
    SysAck,
    /// SYS NACK, no payload
    SysNack,
    /// CMD SELECT, one byte payload (the mode)
    CmdSelect,
    /// CMD WRITE, 1 to 32 byte payload
    CmdWrite,
}

impl HeaderKind {
    /// Classify a sanitized header byte
    pub fn from_sanitized(sanitized: u8) -> Option<Self> {
        const SYS_ACK: u8 = sys::BASE | sys::ACK;
        const SYS_NACK: u8 = sys::BASE | sys::NACK;
        const CMD_SELECT: u8 = cmd::BASE | cmd::SELECT;
        const CMD_WRITE: u8 = cmd::BASE | cmd::WRITE;

        match sanitized {
            SYS_ACK => Some(HeaderKind::SysAck),
            SYS_NACK => Some(HeaderKind::SysNack),
            CMD_SELECT => Some(HeaderKind::CmdSelect),
            CMD_WRITE => Some(HeaderKind::CmdWrite),
            _ => None,
        }
    }

    /// Check if this is a CMD header (payload and checksum follow)
    pub fn is_command(&self) -> bool {
        matches!(self, HeaderKind::CmdSelect | HeaderKind::CmdWrite)
    }

    /// Largest length code allowed for this kind of header
    fn max_length_code(&self) -> u8 {
        match self {
            HeaderKind::CmdWrite => MAX_WRITE_LENGTH_CODE,
            _ => 0,
        }
    }
}

/// Result of [`analyze_header`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HeaderInfo {
    /// `true` if the byte is a legal header
    pub valid: bool,
    /// Header with the length code removed
    pub sanitized: u8,
    /// Payload length in bytes, 0 for SYS headers and invalid headers
    pub payload_len: u8,
    /// Decoded header kind, `None` if invalid
    pub kind: Option<HeaderKind>,
}

/// Analyze a candidate header byte
///
/// A header is invalid when its type is not SYS or CMD, its sub-type is not
/// one the brick sends (ACK/NACK, SELECT/WRITE), or its length code is out of
/// range: SYS and SELECT require code 0, WRITE allows codes 0 to 5.
pub fn analyze_header(hdr: u8) -> HeaderInfo {
    let sanitized = magics::sanitize(hdr);
    let code = magics::length_code(hdr);

    let kind = HeaderKind::from_sanitized(sanitized).filter(|k| code <= k.max_length_code());

    let payload_len = match kind {
        Some(k) if k.is_command() => two_pow(code),
        _ => 0,
    };

    HeaderInfo {
        valid: kind.is_some(),
        sanitized,
        payload_len,
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::magics::{data, header, info};

    #[test]
    fn test_two_pow() {
        let expected = [1u8, 2, 4, 8, 16, 32, 64, 128];
        for (i, want) in expected.iter().enumerate() {
            assert_eq!(two_pow(i as u8), *want);
        }
    }

    #[test]
    fn test_sys_headers() {
        let ack = analyze_header(sys::BASE | sys::ACK);
        assert!(ack.valid);
        assert_eq!(ack.payload_len, 0);
        assert_eq!(ack.kind, Some(HeaderKind::SysAck));

        let nack = analyze_header(sys::BASE | sys::NACK);
        assert!(nack.valid);
        assert_eq!(nack.kind, Some(HeaderKind::SysNack));
    }

    #[test]
    fn test_sys_with_length_code_is_invalid() {
        for code in 1..8 {
            assert!(!analyze_header(header(sys::BASE, sys::ACK, code)).valid);
            assert!(!analyze_header(header(sys::BASE, sys::NACK, code)).valid);
        }
    }

    #[test]
    fn test_sync_is_invalid() {
        assert!(!analyze_header(sys::BASE | sys::SYNC).valid);
    }

    #[test]
    fn test_select_only_code_zero() {
        let info = analyze_header(cmd::BASE | cmd::SELECT);
        assert!(info.valid);
        assert_eq!(info.payload_len, 1);
        assert_eq!(info.sanitized, 0x43);

        for code in 1..8 {
            assert!(!analyze_header(header(cmd::BASE, cmd::SELECT, code)).valid);
        }
    }

    #[test]
    fn test_write_length_codes() {
        for code in 0..=5 {
            let info = analyze_header(header(cmd::BASE, cmd::WRITE, code));
            assert!(info.valid);
            assert_eq!(info.payload_len, 1 << code);
            assert_eq!(info.sanitized, cmd::BASE | cmd::WRITE);
        }
        for code in 6..8 {
            let info = analyze_header(header(cmd::BASE, cmd::WRITE, code));
            assert!(!info.valid);
            assert_eq!(info.payload_len, 0);
        }
    }

    #[test]
    fn test_other_commands_invalid() {
        for sub in [cmd::TYPE, cmd::MODES, cmd::SPEED, 0x05, 0x06, 0x07] {
            assert!(!analyze_header(cmd::BASE | sub).valid);
        }
    }

    #[test]
    fn test_info_and_data_invalid() {
        for low in 0..0x40u8 {
            assert!(!analyze_header(info::BASE | low).valid);
            assert!(!analyze_header(data::BASE | low).valid);
        }
    }

    #[test]
    fn test_exactly_nine_valid_headers() {
        let valid = (0..=255u8).filter(|&b| analyze_header(b).valid).count();
        // ACK, NACK, SELECT, WRITE x6
        assert_eq!(valid, 9);
    }
}
