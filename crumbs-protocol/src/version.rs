//! Library version, as reported in device-info replies

pub const VERSION_MAJOR: u16 = 0;
pub const VERSION_MINOR: u16 = 10;
pub const VERSION_PATCH: u16 = 1;

/// Human-readable version
pub const VERSION_STRING: &str = "0.10.1";

/// Numeric version: `major * 10000 + minor * 100 + patch`
///
/// Fits in the `u16` sent by the conventional opcode 0x00 info reply.
pub const VERSION: u16 = VERSION_MAJOR * 10000 + VERSION_MINOR * 100 + VERSION_PATCH;
