//! Receive counters

use ev3uart_protocol::{HeaderKind, Message};

/// Counters for everything the receiver has seen
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStats {
    /// Messages delivered (SYS and CMD)
    pub messages: u32,
    /// SYS ACK messages delivered
    pub acks: u32,
    /// SYS NACK messages delivered
    pub nacks: u32,
    /// Bytes rejected as header candidates
    pub invalid_headers: u32,
    /// CMD messages with a checksum mismatch
    pub bad_checksums: u32,
    /// Failed reads from the serial reader
    pub read_errors: u32,
}

impl LinkStats {
    pub(crate) fn record(&mut self, msg: &Message) {
        self.messages = self.messages.wrapping_add(1);
        match msg.kind {
            HeaderKind::SysAck => self.acks = self.acks.wrapping_add(1),
            HeaderKind::SysNack => self.nacks = self.nacks.wrapping_add(1),
            HeaderKind::CmdSelect | HeaderKind::CmdWrite => {}
        }
    }
}
