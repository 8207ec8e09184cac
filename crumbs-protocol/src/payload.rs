//! Bounds-checked payload readers
//!
//! Handlers receive the raw payload slice; these helpers pull little-endian
//! fields out of it at a byte offset without panicking on short payloads.

use crate::frame::FrameError;

/// Borrow `len` bytes starting at `offset`
pub fn read_bytes(data: &[u8], offset: usize, len: usize) -> Result<&[u8], FrameError> {
    let end = offset.checked_add(len).ok_or(FrameError::Incomplete)?;
    data.get(offset..end).ok_or(FrameError::Incomplete)
}

fn read_array<const N: usize>(data: &[u8], offset: usize) -> Result<[u8; N], FrameError> {
    let mut out = [0u8; N];
    out.copy_from_slice(read_bytes(data, offset, N)?);
    Ok(out)
}

pub fn read_u8(data: &[u8], offset: usize) -> Result<u8, FrameError> {
    data.get(offset).copied().ok_or(FrameError::Incomplete)
}

pub fn read_u16(data: &[u8], offset: usize) -> Result<u16, FrameError> {
    read_array(data, offset).map(u16::from_le_bytes)
}

pub fn read_u32(data: &[u8], offset: usize) -> Result<u32, FrameError> {
    read_array(data, offset).map(u32::from_le_bytes)
}

pub fn read_i8(data: &[u8], offset: usize) -> Result<i8, FrameError> {
    read_u8(data, offset).map(|b| b as i8)
}

pub fn read_i16(data: &[u8], offset: usize) -> Result<i16, FrameError> {
    read_array(data, offset).map(i16::from_le_bytes)
}

pub fn read_i32(data: &[u8], offset: usize) -> Result<i32, FrameError> {
    read_array(data, offset).map(i32::from_le_bytes)
}

pub fn read_f32(data: &[u8], offset: usize) -> Result<f32, FrameError> {
    read_array(data, offset).map(f32::from_le_bytes)
}
