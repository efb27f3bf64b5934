//! Owned copies of received messages
//!
//! [`Parser::data`](crate::Parser::data) only borrows the parser buffer, which
//! the next byte may overwrite. A [`Message`] holds its own copy of the
//! payload so it can be queued or handed to another task.

use heapless::Vec;

use crate::header::HeaderKind;
use crate::magics::MAX_PAYLOAD_LEN;

/// A complete, checksum-verified message from the EV3
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Message {
    /// What kind of message this is
    pub kind: HeaderKind,
    /// Raw header byte, including the length code
    pub header: u8,
    /// Payload bytes, empty for SYS messages
    pub payload: Vec<u8, MAX_PAYLOAD_LEN>,
}

impl Message {
    /// Create a SYS message, which has no payload
    pub fn system(kind: HeaderKind, header: u8) -> Self {
        Self {
            kind,
            header,
            payload: Vec::new(),
        }
    }

    /// Create a CMD message by copying its payload
    ///
    /// Returns `None` if the payload is longer than any legal message.
    pub fn command(kind: HeaderKind, header: u8, payload: &[u8]) -> Option<Self> {
        Some(Self {
            kind,
            header,
            payload: Vec::from_slice(payload).ok()?,
        })
    }

    /// Payload bytes
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Check if this is a CMD message
    pub fn is_command(&self) -> bool {
        self.kind.is_command()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_has_no_payload() {
        let msg = Message::system(HeaderKind::SysAck, 0x04);
        assert!(msg.payload().is_empty());
        assert!(!msg.is_command());
    }

    #[test]
    fn test_command_copies_payload() {
        let msg = Message::command(HeaderKind::CmdWrite, 0x4C, &[1, 2]).unwrap();
        assert_eq!(msg.payload(), &[1, 2]);
        assert!(msg.is_command());
    }

    #[test]
    fn test_command_rejects_oversized_payload() {
        let payload = [0u8; MAX_PAYLOAD_LEN + 1];
        assert!(Message::command(HeaderKind::CmdWrite, 0x6C, &payload).is_none());
    }
}
