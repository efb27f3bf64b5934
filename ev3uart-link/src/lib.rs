//! Serial receiver for the EV3 UART sensor protocol
//!
//! Pulls bytes from the receive half of a serial port and runs them through
//! the [`ev3uart_protocol::Parser`], handing back complete messages:
//!
//! ```text
//! ┌──────────────┐  bytes   ┌──────────────────┐  Message  ┌─────────────┐
//! │ serial RX    │ ───────▶ │ SensorLink       │ ────────▶ │ sensor task │
//! │ (embedded-io)│          │  Parser + stats  │           │             │
//! └──────────────┘          └──────────────────┘           └─────────────┘
//! ```
//!
//! Invalid header bytes never reach the caller; they are counted in
//! [`LinkStats`]. Whether bad checksums are surfaced is set by
//! [`LinkConfig`].

#![no_std]
#![deny(unsafe_code)]

// This mod MUST go first, so that the others see its macros.
mod fmt;

pub mod config;
pub mod error;
pub mod link;
mod receiver;
pub mod stats;

pub use config::LinkConfig;
pub use error::LinkError;
pub use link::{BlockingSensorLink, SensorLink};
pub use receiver::RX_BUF_SIZE;
pub use stats::LinkStats;
