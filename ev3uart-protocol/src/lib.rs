//! EV3 UART Sensor Protocol, sensor side
//!
//! This crate decodes the messages an EV3 brick sends to a UART sensor. Bytes
//! are pushed into a [`Parser`] one at a time, straight from the UART, and
//! every byte yields a [`ParserReturn`] saying whether a complete message is
//! available.
//!
//! # Message Format
//!
//! ```text
//! ┌────────┬─────────────┬──────────┐
//! │ HEADER │ PAYLOAD     │ CHECKSUM │
//! │ 1B     │ 1–32B       │ 1B       │
//! └────────┴─────────────┴──────────┘
//!
//! HEADER bits: 7..6 type, 5..3 length code, 2..0 sub-type
//! ```
//!
//! SYS messages (ACK, NACK) are the header byte alone. CMD messages (SELECT,
//! WRITE) carry `2^code` payload bytes followed by a checksum over the header
//! and payload.
//!
//! ```ignore
//! let mut parser = Parser::new();
//! let rtn = parser.update(uart_get_byte());
//! if rtn.res == ParseResult::CmdWrite {
//!     handle_write(&parser.data()[..rtn.len as usize]);
//! }
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod checksum;
pub mod header;
pub mod magics;
pub mod message;
pub mod parser;

pub use checksum::{checksum, Checksum, Ev3Checksum};
pub use header::{analyze_header, two_pow, HeaderInfo, HeaderKind};
pub use magics::{BUFFER_LEN, MAX_PAYLOAD_LEN};
pub use message::Message;
pub use parser::{ParseResult, Parser, ParserReturn, State};
