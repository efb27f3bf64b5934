//! Message checksum
//!
//! The checksum byte is `0xFF` XORed with every byte of the header and
//! payload. The parser takes the algorithm through the [`Checksum`] trait so
//! it can be swapped out in tests.

/// Compute the EV3 checksum over `bytes`
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0xFF, |acc, &b| acc ^ b)
}

/// Checksum algorithm used by the parser
pub trait Checksum {
    /// Compute the checksum of a header followed by its payload
    fn checksum(&self, bytes: &[u8]) -> u8;
}

/// The checksum used by the EV3 brick
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ev3Checksum;

impl Checksum for Ev3Checksum {
    fn checksum(&self, bytes: &[u8]) -> u8 {
        checksum(bytes)
    }
}

impl<F> Checksum for F
where
    F: Fn(&[u8]) -> u8,
{
    fn checksum(&self, bytes: &[u8]) -> u8 {
        self(bytes)
    }
}
