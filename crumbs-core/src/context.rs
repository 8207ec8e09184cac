//! Endpoint context
//!
//! One [`Context`] per bus role. It owns the fixed endpoint fields, the
//! installed callbacks and the handler table, and is mutated only by
//! registration calls and inbound traffic.

use heapless::Vec;

use crumbs_protocol::{CrcStats, FrameError, Message};

use crate::handlers::{HandlerEntry, DEFAULT_MAX_HANDLERS};

/// Role of an endpoint on the I2C bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Role {
    /// Bus master initiating transactions
    Controller,
    /// Device answering at a 7-bit address
    Peripheral,
}

/// Fixed and protocol-managed endpoint state
///
/// Callbacks receive this view so they can see where a message arrived and
/// which reply the controller asked for last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Endpoint {
    address: u8,
    role: Role,
    crc: CrcStats,
    requested_opcode: u8,
}

impl Endpoint {
    const fn new(role: Role, address: u8) -> Self {
        Self {
            address: match role {
                Role::Peripheral => address,
                Role::Controller => 0,
            },
            role,
            crc: CrcStats::new(),
            requested_opcode: 0,
        }
    }

    /// 7-bit address for a peripheral; always 0 for a controller
    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Opcode named by the most recent SET_REPLY, 0 until one arrives
    pub fn requested_opcode(&self) -> u8 {
        self.requested_opcode
    }

    pub fn crc_stats(&self) -> CrcStats {
        self.crc
    }

    pub(crate) fn crc_mut(&mut self) -> &mut CrcStats {
        &mut self.crc
    }

    pub(crate) fn set_requested_opcode(&mut self, opcode: u8) {
        self.requested_opcode = opcode;
    }
}

/// Called for every decoded, non-SET_REPLY message (peripheral role)
///
/// Any state the callback needs is captured by the closure.
pub type MessageCallback<'a> = &'a mut (dyn FnMut(&Endpoint, &Message) + Send + 'a);

/// Called when the controller reads from us; fills in the reply
pub type RequestCallback<'a> = &'a mut (dyn FnMut(&Endpoint, &mut Message) + Send + 'a);

/// State for a single CRUMBS endpoint
///
/// `N` is the handler table capacity. The context never allocates, so it
/// can live on the stack or in a `static` (see [`crate::SharedContext`]).
pub struct Context<'a, const N: usize = DEFAULT_MAX_HANDLERS> {
    pub(crate) endpoint: Endpoint,
    pub(crate) on_message: Option<MessageCallback<'a>>,
    pub(crate) on_request: Option<RequestCallback<'a>>,
    pub(crate) handlers: Vec<HandlerEntry<'a>, N>,
}

impl<'a, const N: usize> Context<'a, N> {
    /// Create a context
    ///
    /// `address` is ignored for the controller role.
    pub const fn new(role: Role, address: u8) -> Self {
        Self {
            endpoint: Endpoint::new(role, address),
            on_message: None,
            on_request: None,
            handlers: Vec::new(),
        }
    }

    /// Create a controller context
    pub const fn controller() -> Self {
        Self::new(Role::Controller, 0)
    }

    /// Create a peripheral context answering at `address`
    pub const fn peripheral(address: u8) -> Self {
        Self::new(Role::Peripheral, address)
    }

    /// Install (or clear) the message and request callbacks
    pub fn set_callbacks(
        &mut self,
        on_message: Option<MessageCallback<'a>>,
        on_request: Option<RequestCallback<'a>>,
    ) {
        self.on_message = on_message;
        self.on_request = on_request;
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn role(&self) -> Role {
        self.endpoint.role
    }

    pub fn address(&self) -> u8 {
        self.endpoint.address
    }

    /// Opcode stored by the last SET_REPLY
    pub fn requested_opcode(&self) -> u8 {
        self.endpoint.requested_opcode
    }

    /// Number of frames rejected for a CRC mismatch
    pub fn crc_error_count(&self) -> u32 {
        self.endpoint.crc.error_count
    }

    /// Whether the most recent decode on this context had a valid CRC
    pub fn last_crc_ok(&self) -> bool {
        self.endpoint.crc.last_ok
    }

    pub fn reset_crc_stats(&mut self) {
        self.endpoint.crc.reset();
    }

    /// Decode a frame, recording the CRC outcome in this context
    ///
    /// Pure parsing: no callback or handler runs.
    pub fn decode(&mut self, bytes: &[u8]) -> Result<Message, FrameError> {
        Message::decode(bytes, Some(self.endpoint.crc_mut()))
    }

    pub(crate) fn require_role(&self, role: Role) -> Result<(), crate::Error> {
        if self.endpoint.role != role {
            warn!("wrong role for operation: {}", self.endpoint.role);
            return Err(crate::Error::WrongRole);
        }
        Ok(())
    }
}
