//! CRUMBS Hardware Abstraction Layer
//!
//! This crate defines the transport traits the protocol core depends on.
//! The core never opens, configures or closes a bus; it only borrows
//! something that can write a frame to an address and read a frame back.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (controller / peripheral)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  crumbs-core (context, dispatch, scan)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  crumbs-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-hal  │       │  test fakes,  │
//! │  I2c drivers  │       │  custom buses │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - Frame-level I2C write and read

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;

pub use i2c::{EmbeddedHalBus, I2cBus};
