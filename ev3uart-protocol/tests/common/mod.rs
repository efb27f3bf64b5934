//! Frame builders mirroring what the EV3 puts on the wire

#![allow(dead_code)]

use ev3uart_protocol::checksum;
use ev3uart_protocol::magics::{self, cmd, sys, BUFFER_LEN};

/// Smallest length code whose payload fits `len` bytes
pub fn length_code_for(len: usize) -> u8 {
    let mut code = 0u8;
    while (1usize << code) < len {
        code += 1;
    }
    code
}

/// A single encoded frame
pub struct Frame {
    pub bytes: [u8; BUFFER_LEN],
    pub len: usize,
}

impl Frame {
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Flip the checksum to a wrong value
    pub fn corrupt_checksum(&mut self) {
        let last = self.len - 1;
        self.bytes[last] = self.bytes[last].wrapping_add(1);
    }

    /// The padded payload as it appears on the wire
    pub fn payload(&self) -> &[u8] {
        &self.bytes[1..self.len - 1]
    }
}

fn command(hdr: u8, payload: &[u8], padded_len: usize) -> Frame {
    let mut bytes = [0u8; BUFFER_LEN];
    bytes[0] = hdr;
    bytes[1..=payload.len()].copy_from_slice(payload);
    bytes[padded_len + 1] = checksum(&bytes[..=padded_len]);
    Frame {
        bytes,
        len: padded_len + 2,
    }
}

/// CMD WRITE, payload zero-padded up to the next power of two
pub fn write(payload: &[u8]) -> Frame {
    assert!(!payload.is_empty() && payload.len() <= magics::MAX_PAYLOAD_LEN);
    let code = length_code_for(payload.len());
    command(magics::header(cmd::BASE, cmd::WRITE, code), payload, 1 << code)
}

/// CMD SELECT for a sensor mode
pub fn select(mode: u8) -> Frame {
    command(cmd::BASE | cmd::SELECT, &[mode], 1)
}

/// SYS message, header byte only
pub fn system(subtype: u8) -> Frame {
    let mut bytes = [0u8; BUFFER_LEN];
    bytes[0] = sys::BASE | subtype;
    Frame { bytes, len: 1 }
}
