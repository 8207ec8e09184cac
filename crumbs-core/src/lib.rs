//! Endpoint logic for the CRUMBS I2C protocol
//!
//! This crate holds everything above the wire format that does not depend
//! on a particular bus implementation:
//!
//! - Endpoint context (role, address, CRC statistics, SET_REPLY register)
//! - Fixed-capacity opcode handler table
//! - Peripheral receive dispatch and reply building
//! - Controller send, read, query and bus scan
//! - Mutex-guarded shared context for interrupt or multi-thread access
//!
//! Every operation is synchronous and bounded; blocking and timeouts belong
//! to the [`I2cBus`] implementation.

#![no_std]
#![deny(unsafe_code)]

// Must come first so the logging macros are visible to later modules
mod fmt;

pub mod context;
pub mod controller;
pub mod error;
pub mod handlers;
pub mod peripheral;
pub mod shared;

pub use context::{Context, Endpoint, MessageCallback, RequestCallback, Role};
pub use controller::ScanConfig;
pub use error::{BusError, Error};
pub use handlers::{Handler, DEFAULT_MAX_HANDLERS};
pub use shared::SharedContext;

pub use crumbs_hal::I2cBus;
pub use crumbs_protocol::{
    payload, CrcStats, FrameError, Message, CMD_SET_REPLY, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE,
    MIN_FRAME_SIZE, VERSION,
};
