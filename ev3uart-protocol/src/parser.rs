//! Byte-at-a-time parser for messages from the EV3
//!
//! The parser is a two state machine. While waiting for a header, every byte
//! is a header candidate; an invalid one is reported and the next byte is
//! tried again. A CMD header moves the parser to collecting its payload and
//! trailing checksum byte, after which it goes back to waiting for a header.

use crate::checksum::{Checksum, Ev3Checksum};
use crate::header::{analyze_header, HeaderKind};
use crate::magics::{self, BUFFER_LEN};
use crate::message::Message;

/// Parser state machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Next byte is a header candidate
    AwaitingHeader,
    /// Collecting payload bytes and the checksum byte
    AwaitingChecksum,
}

impl State {
    /// The state following this one, wrapping around
    pub const fn next(self) -> Self {
        match self {
            State::AwaitingHeader => State::AwaitingChecksum,
            State::AwaitingChecksum => State::AwaitingHeader,
        }
    }
}

/// Result of feeding one byte to the [`Parser`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseResult {
    /// More bytes are needed before anything can be reported
    NeedMoreData,
    /// The byte is not a header the brick can send to a sensor
    ///
    /// Either the type is not SYS or CMD, the sub-type is not ACK/NACK or
    /// SELECT/WRITE, or the length code is not 0 (SYS, SELECT) or in `[0, 5]`
    /// (WRITE).
    InvalidHeader,
    /// SYS ACK received
    SysAck,
    /// SYS NACK received
    SysNack,
    /// CMD SELECT received with a good checksum
    CmdSelect,
    /// CMD WRITE received with a good checksum
    CmdWrite,
    /// CMD message received with a checksum mismatch
    CmdBadChecksum,
}

/// What [`Parser::update`] returns
///
/// `hdr` is always the most recently received header byte. `len` is the
/// payload length for `CmdSelect`, `CmdWrite` and `CmdBadChecksum`, and 0
/// for every other result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParserReturn {
    /// Result of parsing
    pub res: ParseResult,
    /// Header of the message being parsed
    pub hdr: u8,
    /// Payload length of the parsed message
    pub len: u8,
}

impl ParserReturn {
    /// Check if this result ends a message (or rejects a byte)
    pub fn is_terminal(&self) -> bool {
        self.res != ParseResult::NeedMoreData
    }

    /// Check if this result reports a fully received CMD message
    pub fn is_command(&self) -> bool {
        matches!(
            self.res,
            ParseResult::CmdSelect | ParseResult::CmdWrite | ParseResult::CmdBadChecksum
        )
    }
}

/// Parser for messages sent by the EV3 to a sensor
///
/// The parser owns a single buffer sized for the largest frame and reuses it
/// for every message:
/// - `buffer[0]` holds the last header byte
/// - `buffer[1..=payload_len]` holds the payload
/// - `buffer[payload_len + 1]` holds the checksum byte
#[derive(Debug, Clone)]
pub struct Parser<C = Ev3Checksum> {
    buffer: [u8; BUFFER_LEN],
    payload_len: u8,
    pending: u8,
    state: State,
    checksum: C,
}

impl Default for Parser<Ev3Checksum> {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser<Ev3Checksum> {
    /// Create a parser using the EV3 checksum
    pub fn new() -> Self {
        Self::with_checksum(Ev3Checksum)
    }
}

impl<C: Checksum> Parser<C> {
    /// Create a parser using a custom checksum algorithm
    pub fn with_checksum(checksum: C) -> Self {
        Self {
            buffer: [0; BUFFER_LEN],
            payload_len: 0,
            pending: 0,
            state: State::AwaitingHeader,
            checksum,
        }
    }

    /// Current state machine state
    pub fn state(&self) -> State {
        self.state
    }

    /// Payload length of the current (or last) CMD message
    pub fn payload_len(&self) -> u8 {
        self.payload_len
    }

    /// Feed one byte received from the EV3
    pub fn update(&mut self, input: u8) -> ParserReturn {
        let mut rtn = ParserReturn {
            res: ParseResult::NeedMoreData,
            hdr: 0,
            len: 0,
        };

        match self.state {
            State::AwaitingHeader => {
                let info = analyze_header(input);
                self.buffer[0] = input;

                rtn.res = match info.kind {
                    None => ParseResult::InvalidHeader,
                    Some(HeaderKind::SysAck) => ParseResult::SysAck,
                    Some(HeaderKind::SysNack) => ParseResult::SysNack,
                    Some(HeaderKind::CmdSelect | HeaderKind::CmdWrite) => {
                        self.payload_len = info.payload_len;
                        // + 1 for the checksum byte
                        self.pending = info.payload_len + 1;
                        self.state = self.state.next();
                        ParseResult::NeedMoreData
                    }
                };
            }
            State::AwaitingChecksum => {
                let len = usize::from(self.payload_len);
                let write_index = len + 2 - usize::from(self.pending);
                self.buffer[write_index] = input;
                self.pending -= 1;

                if self.pending == 0 {
                    rtn.len = self.payload_len;
                    let expected = self.checksum.checksum(&self.buffer[..=len]);
                    rtn.res = if expected != input {
                        ParseResult::CmdBadChecksum
                    } else {
                        match HeaderKind::from_sanitized(magics::sanitize(self.buffer[0])) {
                            Some(HeaderKind::CmdWrite) => ParseResult::CmdWrite,
                            _ => ParseResult::CmdSelect,
                        }
                    };
                    self.state = self.state.next();
                }
            }
        }

        rtn.hdr = self.buffer[0];
        rtn
    }

    /// Feed bytes until one of them produces a terminal result
    ///
    /// Returns the number of bytes consumed along with that result, or
    /// `None` if every byte was consumed without one. Bytes after the
    /// terminal one are left untouched.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Option<(usize, ParserReturn)> {
        for (i, &byte) in bytes.iter().enumerate() {
            let rtn = self.update(byte);
            if rtn.is_terminal() {
                return Some((i + 1, rtn));
            }
        }
        None
    }

    /// Payload of the current (or last) CMD message
    ///
    /// Only meaningful once `update` has returned a CMD result for it. The
    /// contents are overwritten by the next call to `update`, so copy them out
    /// (see [`Parser::message`]) if they must outlive it.
    pub fn data(&self) -> &[u8] {
        &self.buffer[1..=usize::from(self.payload_len)]
    }

    /// Mutable view of the payload, same validity rules as [`Parser::data`]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.buffer[1..=usize::from(self.payload_len)]
    }

    /// Copy out the message a terminal result refers to
    ///
    /// Returns `None` for `NeedMoreData`, `InvalidHeader` and
    /// `CmdBadChecksum`.
    pub fn message(&self, rtn: &ParserReturn) -> Option<Message> {
        match rtn.res {
            ParseResult::SysAck => Some(Message::system(HeaderKind::SysAck, rtn.hdr)),
            ParseResult::SysNack => Some(Message::system(HeaderKind::SysNack, rtn.hdr)),
            ParseResult::CmdSelect => {
                Message::command(HeaderKind::CmdSelect, rtn.hdr, self.data())
            }
            ParseResult::CmdWrite => Message::command(HeaderKind::CmdWrite, rtn.hdr, self.data()),
            _ => None,
        }
    }

    /// Treat the next byte as a header candidate
    ///
    /// Use this when the link to the EV3 is known to have been reset. Buffered
    /// bytes are left in place and are stale until the next CMD message.
    pub fn reset(&mut self) {
        self.state = State::AwaitingHeader;
    }
}
