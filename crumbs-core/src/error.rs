//! Error types for endpoint operations

use core::fmt;

use crumbs_protocol::FrameError;

/// Errors raised by the protocol core itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Operation not valid for this context's role (programming error)
    WrongRole,
    /// Handler table is at capacity
    HandlerTableFull,
    /// Encoding or decoding failed
    Frame(FrameError),
}

impl From<FrameError> for Error {
    fn from(e: FrameError) -> Self {
        Error::Frame(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WrongRole => f.write_str("operation not valid for this role"),
            Error::HandlerTableFull => f.write_str("handler table full"),
            Error::Frame(e) => write!(f, "frame error: {}", e),
        }
    }
}

/// Errors from operations that touch the bus
///
/// Transport errors are carried unchanged; the core never interprets them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError<E> {
    /// Rejected before or after I/O by the protocol core
    Protocol(Error),
    /// Returned by the bus implementation
    Bus(E),
}

impl<E> From<Error> for BusError<E> {
    fn from(e: Error) -> Self {
        BusError::Protocol(e)
    }
}

impl<E> From<FrameError> for BusError<E> {
    fn from(e: FrameError) -> Self {
        BusError::Protocol(Error::Frame(e))
    }
}

impl<E: fmt::Debug> fmt::Display for BusError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusError::Protocol(e) => write!(f, "{}", e),
            BusError::Bus(e) => write!(f, "bus error: {:?}", e),
        }
    }
}
