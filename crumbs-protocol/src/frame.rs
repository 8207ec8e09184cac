//! Frame encoding and decoding for CRUMBS messages.
//!
//! Frame format:
//! - TYPE_ID (1 byte): device/module family
//! - OPCODE (1 byte): command or query selector
//! - DATA_LEN (1 byte): payload length (0-27)
//! - DATA (0-27 bytes): opaque payload
//! - CRC8 (1 byte): CRC-8 of every preceding byte
//!
//! The message address is a local routing hint and never goes on the wire.

use core::fmt;

use heapless::Vec;

use crate::crc::crc8;
use crate::message::Message;

/// Header size in bytes (TYPE_ID + OPCODE + DATA_LEN)
pub const HEADER_SIZE: usize = 3;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 27;

/// Smallest valid frame (header + empty payload + CRC)
pub const MIN_FRAME_SIZE: usize = HEADER_SIZE + 1;

/// Largest valid frame (header + MAX_PAYLOAD + CRC)
pub const MAX_FRAME_SIZE: usize = HEADER_SIZE + MAX_PAYLOAD_SIZE + 1;

/// Reserved opcode: payload byte 0 selects what the next reply carries
pub const CMD_SET_REPLY: u8 = 0xFE;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size (encode), or a frame declares one (decode)
    PayloadTooLarge,
    /// CRC mismatch on an otherwise well-formed frame
    InvalidChecksum,
    /// Fewer bytes than the minimum frame or the declared length
    Incomplete,
    /// Buffer too small for encoding
    BufferTooSmall,
}

impl FrameError {
    /// True for corruption evidence (CRC mismatch), false for structural errors
    pub fn is_integrity(&self) -> bool {
        matches!(self, FrameError::InvalidChecksum)
    }
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::PayloadTooLarge => f.write_str("payload too large"),
            FrameError::InvalidChecksum => f.write_str("crc mismatch"),
            FrameError::Incomplete => f.write_str("frame incomplete"),
            FrameError::BufferTooSmall => f.write_str("buffer too small"),
        }
    }
}

/// CRC outcome bookkeeping for one endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CrcStats {
    /// Frames rejected for a CRC mismatch
    pub error_count: u32,
    /// Result of the most recent CRC check
    pub last_ok: bool,
}

impl CrcStats {
    /// Fresh statistics: no errors, no check performed yet
    pub const fn new() -> Self {
        Self {
            error_count: 0,
            last_ok: false,
        }
    }

    /// Clear the error counter and mark the link healthy
    pub fn reset(&mut self) {
        self.error_count = 0;
        self.last_ok = true;
    }

    fn record(&mut self, ok: bool) {
        if !ok {
            self.error_count = self.error_count.saturating_add(1);
        }
        self.last_ok = ok;
    }
}

/// Total frame length for a payload of `data_len` bytes
pub const fn frame_len(data_len: usize) -> usize {
    HEADER_SIZE + data_len + 1
}

impl Message {
    /// Encode this message into a byte buffer
    ///
    /// Returns the number of bytes written. The message itself is not
    /// modified; nothing is written when the buffer is too small.
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let data_len = self.data.len();
        if data_len > MAX_PAYLOAD_SIZE {
            return Err(FrameError::PayloadTooLarge);
        }

        let len = frame_len(data_len);
        if buffer.len() < len {
            return Err(FrameError::BufferTooSmall);
        }

        buffer[0] = self.type_id;
        buffer[1] = self.opcode;
        buffer[2] = data_len as u8;
        buffer[HEADER_SIZE..HEADER_SIZE + data_len].copy_from_slice(&self.data);
        buffer[len - 1] = crc8(&buffer[..len - 1]);

        Ok(len)
    }

    /// Encode this message into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| FrameError::BufferTooSmall)?;
        Ok(vec)
    }

    /// Decode a message from a received buffer
    ///
    /// Checks run in order: minimum length, declared payload length against
    /// the protocol maximum, declared length against the bytes received, and
    /// finally the CRC. Bytes past the declared frame are ignored.
    ///
    /// When `stats` is given, a CRC mismatch bumps its error counter and a
    /// valid CRC marks it healthy. Structural errors leave it untouched.
    ///
    /// The returned message has `address` 0; it is not carried on the wire.
    pub fn decode(bytes: &[u8], stats: Option<&mut CrcStats>) -> Result<Self, FrameError> {
        if bytes.len() < MIN_FRAME_SIZE {
            return Err(FrameError::Incomplete);
        }

        // Validate the length field before trusting it against the buffer
        let data_len = bytes[2] as usize;
        if data_len > MAX_PAYLOAD_SIZE {
            return Err(FrameError::PayloadTooLarge);
        }

        let len = frame_len(data_len);
        if bytes.len() < len {
            return Err(FrameError::Incomplete);
        }

        let received = bytes[len - 1];
        let ok = crc8(&bytes[..len - 1]) == received;
        if let Some(stats) = stats {
            stats.record(ok);
        }
        if !ok {
            return Err(FrameError::InvalidChecksum);
        }

        let mut data = Vec::new();
        data.extend_from_slice(&bytes[HEADER_SIZE..HEADER_SIZE + data_len])
            .map_err(|_| FrameError::PayloadTooLarge)?;

        Ok(Self {
            address: 0,
            type_id: bytes[0],
            opcode: bytes[1],
            data,
            crc8: received,
        })
    }
}
