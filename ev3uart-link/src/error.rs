//! Link errors

use thiserror::Error;

/// Errors returned while receiving messages
///
/// `E` is the error type of the underlying serial reader.
#[derive(Debug, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError<E> {
    /// The serial reader failed
    #[error("serial read failed")]
    Read(E),
    /// The serial reader has no more bytes
    #[error("serial stream ended")]
    EndOfStream,
    /// A CMD message arrived with a checksum mismatch
    #[error("bad checksum on CMD message (header {header:#04x}, {len} byte payload)")]
    BadChecksum {
        /// Header byte of the rejected message
        header: u8,
        /// Payload length of the rejected message
        len: u8,
    },
}

impl<E> LinkError<E> {
    /// Check if the link can keep receiving after this error
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, LinkError::EndOfStream)
    }
}
