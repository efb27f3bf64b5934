//! Transport-independent receive loop shared by the async and blocking links

use ev3uart_protocol::{Checksum, Message, ParseResult, Parser};

use crate::config::LinkConfig;
use crate::error::LinkError;
use crate::stats::LinkStats;

/// Buffer size for serial reads
pub const RX_BUF_SIZE: usize = 64;

/// Parser plus the bytes read from the serial line but not parsed yet
pub(crate) struct Receiver<C> {
    pub(crate) parser: Parser<C>,
    pub(crate) config: LinkConfig,
    pub(crate) stats: LinkStats,
    buf: [u8; RX_BUF_SIZE],
    start: usize,
    end: usize,
}

impl<C: Checksum> Receiver<C> {
    pub(crate) fn new(parser: Parser<C>, config: LinkConfig) -> Self {
        Self {
            parser,
            config,
            stats: LinkStats::default(),
            buf: [0; RX_BUF_SIZE],
            start: 0,
            end: 0,
        }
    }

    /// Number of bytes read but not yet parsed
    pub(crate) fn buffered(&self) -> usize {
        self.end - self.start
    }

    /// Parse buffered bytes until a message (or surfaced error) comes out
    ///
    /// Returns `None` once the buffer is drained.
    pub(crate) fn pump<E>(&mut self) -> Option<Result<Message, LinkError<E>>> {
        while self.start < self.end {
            let byte = self.buf[self.start];
            self.start += 1;

            let rtn = self.parser.update(byte);
            match rtn.res {
                ParseResult::NeedMoreData => {}
                ParseResult::InvalidHeader => {
                    self.stats.invalid_headers = self.stats.invalid_headers.wrapping_add(1);
                    trace!("Invalid header: {:#x}", rtn.hdr);
                }
                ParseResult::CmdBadChecksum => {
                    self.stats.bad_checksums = self.stats.bad_checksums.wrapping_add(1);
                    warn!("Bad checksum: header {:#x}, {} bytes", rtn.hdr, rtn.len);
                    if self.config.surface_bad_checksum {
                        return Some(Err(LinkError::BadChecksum {
                            header: rtn.hdr,
                            len: rtn.len,
                        }));
                    }
                }
                ParseResult::SysAck
                | ParseResult::SysNack
                | ParseResult::CmdSelect
                | ParseResult::CmdWrite => {
                    if let Some(msg) = self.parser.message(&rtn) {
                        self.stats.record(&msg);
                        debug!("Message: {:?}", msg);
                        return Some(Ok(msg));
                    }
                }
            }
        }
        None
    }

    /// Free space for the next read
    ///
    /// Only called once [`Receiver::pump`] has drained the buffer.
    pub(crate) fn slot(&mut self) -> &mut [u8] {
        self.start = 0;
        self.end = 0;
        &mut self.buf
    }

    /// Mark `n` bytes of the slot as filled
    pub(crate) fn commit(&mut self, n: usize) {
        trace!("RX: {} bytes", n);
        self.end = n.min(RX_BUF_SIZE);
    }

    /// Record a failed read and turn it into an error
    pub(crate) fn read_failed<E: embedded_io::Error>(&mut self, err: E) -> LinkError<E> {
        self.stats.read_errors = self.stats.read_errors.wrapping_add(1);
        warn!("Serial read error: {:?}", err.kind());
        if self.config.reset_on_read_error {
            self.reset();
        }
        LinkError::Read(err)
    }

    /// Drop buffered bytes and make the parser wait for a header
    pub(crate) fn reset(&mut self) {
        self.parser.reset();
        self.start = 0;
        self.end = 0;
    }
}
