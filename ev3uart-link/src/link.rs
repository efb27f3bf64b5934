//! Sensor links over async and blocking serial readers
//!
//! A link owns the receive half of a serial port that is already configured
//! for the EV3 (2400 baud at handshake, then the negotiated speed) and hands
//! out complete messages. Opening and configuring the port is up to the
//! caller.

use embedded_io::ErrorType;
use ev3uart_protocol::{Checksum, Ev3Checksum, Message, Parser};

use crate::config::LinkConfig;
use crate::error::LinkError;
use crate::receiver::Receiver;
use crate::stats::LinkStats;

macro_rules! link_accessors {
    () => {
        /// Receive counters
        pub fn stats(&self) -> &LinkStats {
            &self.rx.stats
        }

        /// Active configuration
        pub fn config(&self) -> &LinkConfig {
            &self.rx.config
        }

        /// The underlying parser
        pub fn parser(&self) -> &Parser<C> {
            &self.rx.parser
        }

        /// Bytes read from the port but not parsed yet
        pub fn buffered(&self) -> usize {
            self.rx.buffered()
        }

        /// Forget any partial message and buffered bytes
        ///
        /// Call this when the connection to the EV3 has been reset. Counters
        /// are kept.
        pub fn reset(&mut self) {
            debug!("Link reset");
            self.rx.reset();
        }

        /// Release the serial reader
        pub fn into_inner(self) -> R {
            self.reader
        }
    };
}

/// Receives messages from an async serial reader
pub struct SensorLink<R, C = Ev3Checksum> {
    reader: R,
    rx: Receiver<C>,
}

impl<R: embedded_io_async::Read> SensorLink<R> {
    /// Create a link with the EV3 checksum and default configuration
    pub fn new(reader: R) -> Self {
        Self::with_parser(reader, Parser::new(), LinkConfig::default())
    }
}

impl<R: embedded_io_async::Read, C: Checksum> SensorLink<R, C> {
    /// Create a link around an existing parser
    pub fn with_parser(reader: R, parser: Parser<C>, config: LinkConfig) -> Self {
        Self {
            reader,
            rx: Receiver::new(parser, config),
        }
    }

    /// Wait for the next message
    ///
    /// Invalid header bytes are skipped. Bad checksums are skipped unless
    /// [`LinkConfig::surface_bad_checksum`] is set.
    pub async fn receive(&mut self) -> Result<Message, LinkError<<R as ErrorType>::Error>> {
        loop {
            if let Some(result) = self.rx.pump() {
                return result;
            }

            match self.reader.read(self.rx.slot()).await {
                Ok(0) => return Err(LinkError::EndOfStream),
                Ok(n) => self.rx.commit(n),
                Err(e) => return Err(self.rx.read_failed(e)),
            }
        }
    }

    link_accessors!();
}

/// Receives messages from a blocking serial reader
pub struct BlockingSensorLink<R, C = Ev3Checksum> {
    reader: R,
    rx: Receiver<C>,
}

impl<R: embedded_io::Read> BlockingSensorLink<R> {
    /// Create a link with the EV3 checksum and default configuration
    pub fn new(reader: R) -> Self {
        Self::with_parser(reader, Parser::new(), LinkConfig::default())
    }
}

impl<R: embedded_io::Read, C: Checksum> BlockingSensorLink<R, C> {
    /// Create a link around an existing parser
    pub fn with_parser(reader: R, parser: Parser<C>, config: LinkConfig) -> Self {
        Self {
            reader,
            rx: Receiver::new(parser, config),
        }
    }

    /// Block until the next message
    ///
    /// Same skipping rules as [`SensorLink::receive`].
    pub fn receive(&mut self) -> Result<Message, LinkError<<R as ErrorType>::Error>> {
        loop {
            if let Some(result) = self.rx.pump() {
                return result;
            }

            match self.reader.read(self.rx.slot()) {
                Ok(0) => return Err(LinkError::EndOfStream),
                Ok(n) => self.rx.commit(n),
                Err(e) => return Err(self.rx.read_failed(e)),
            }
        }
    }

    link_accessors!();
}
