//! CRUMBS wire protocol
//!
//! This crate defines the byte-exact frame format exchanged between an I2C
//! controller and its peripherals. One bus transaction carries one frame:
//!
//! ```text
//! ┌─────────┬────────┬──────────┬─────────────┬──────┐
//! │ TYPE_ID │ OPCODE │ DATA_LEN │ DATA        │ CRC8 │
//! │ 1B      │ 1B     │ 1B       │ 0–27B       │ 1B   │
//! └─────────┴────────┴──────────┴─────────────┴──────┘
//! ```
//!
//! The CRC-8 (poly 0x07, init 0x00, no reflection, no final XOR) covers
//! every byte before it. Frames are 4 to 31 bytes long, which fits a single
//! Arduino Wire buffer.
//!
//! Encoding and decoding are pure: no dispatch, no allocation, no I/O.

#![no_std]
#![deny(unsafe_code)]

pub mod crc;
pub mod frame;
pub mod message;
pub mod payload;
pub mod version;

pub use crc::crc8;
pub use frame::{
    CrcStats, FrameError, CMD_SET_REPLY, HEADER_SIZE, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE,
    MIN_FRAME_SIZE,
};
pub use message::Message;
pub use version::{VERSION, VERSION_MAJOR, VERSION_MINOR, VERSION_PATCH, VERSION_STRING};
