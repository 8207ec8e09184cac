//! Logical CRUMBS message and payload builders
//!
//! Builders append little-endian values to the payload and refuse to grow it
//! past [`MAX_PAYLOAD_SIZE`]; a failed push leaves the message unchanged.

use heapless::Vec;

use crate::frame::{FrameError, CMD_SET_REPLY, MAX_PAYLOAD_SIZE};

/// A single logical message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Message {
    /// Local routing hint (peripheral address); not serialized
    pub address: u8,
    /// Device/module family
    pub type_id: u8,
    /// Command or query selector
    pub opcode: u8,
    /// Payload bytes
    pub data: Vec<u8, MAX_PAYLOAD_SIZE>,
    /// CRC byte seen on the wire; only meaningful after decode
    pub crc8: u8,
}

impl Message {
    /// Create a message with the given header and payload
    pub fn new(type_id: u8, opcode: u8, data: &[u8]) -> Result<Self, FrameError> {
        let mut msg = Self::empty(type_id, opcode);
        msg.push_bytes(data)?;
        Ok(msg)
    }

    /// Create a message with no payload
    pub fn empty(type_id: u8, opcode: u8) -> Self {
        Self {
            type_id,
            opcode,
            ..Self::default()
        }
    }

    /// Build a SET_REPLY command asking for `target` on the next read
    pub fn set_reply(type_id: u8, target: u8) -> Self {
        let mut msg = Self::empty(type_id, CMD_SET_REPLY);
        // One byte always fits an empty payload
        let _ = msg.data.push(target);
        msg
    }

    /// Number of payload bytes
    pub fn data_len(&self) -> u8 {
        self.data.len() as u8
    }

    /// Returns true if this is a SET_REPLY command
    pub fn is_set_reply(&self) -> bool {
        self.opcode == CMD_SET_REPLY
    }

    /// Append raw bytes to the payload
    pub fn push_bytes(&mut self, bytes: &[u8]) -> Result<(), FrameError> {
        if self.data.len() + bytes.len() > MAX_PAYLOAD_SIZE {
            return Err(FrameError::PayloadTooLarge);
        }
        self.data
            .extend_from_slice(bytes)
            .map_err(|_| FrameError::PayloadTooLarge)
    }

    pub fn push_u8(&mut self, value: u8) -> Result<(), FrameError> {
        self.push_bytes(&[value])
    }

    pub fn push_u16(&mut self, value: u16) -> Result<(), FrameError> {
        self.push_bytes(&value.to_le_bytes())
    }

    pub fn push_u32(&mut self, value: u32) -> Result<(), FrameError> {
        self.push_bytes(&value.to_le_bytes())
    }

    pub fn push_i8(&mut self, value: i8) -> Result<(), FrameError> {
        self.push_bytes(&value.to_le_bytes())
    }

    pub fn push_i16(&mut self, value: i16) -> Result<(), FrameError> {
        self.push_bytes(&value.to_le_bytes())
    }

    pub fn push_i32(&mut self, value: i32) -> Result<(), FrameError> {
        self.push_bytes(&value.to_le_bytes())
    }

    /// Append an IEEE 754 single-precision float
    pub fn push_f32(&mut self, value: f32) -> Result<(), FrameError> {
        self.push_bytes(&value.to_le_bytes())
    }
}
