//! Controller side: send, read, query and bus scan
//!
//! Thin wrappers over an [`I2cBus`]. Nothing here retries; transport errors
//! are handed back exactly as the bus produced them.

use crumbs_hal::I2cBus;
use crumbs_protocol::{Message, MAX_FRAME_SIZE, MIN_FRAME_SIZE};

use crate::context::{Context, Role};
use crate::error::{BusError, Error};

/// Bus scan configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanConfig {
    /// First address probed
    pub start: u8,
    /// Last address probed (inclusive)
    pub end: u8,
    /// Only accept devices that answer a bare read
    ///
    /// When false, an address that does not answer is sent an empty probe
    /// message and read once more, for peripherals that only fill their
    /// reply buffer after being written to.
    pub strict: bool,
    /// Read timeout hint passed to the bus
    pub timeout_us: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::NON_RESERVED
    }
}

impl ScanConfig {
    /// Every non-reserved 7-bit address (0x03-0x77), non-strict
    pub const NON_RESERVED: Self = Self {
        start: 0x03,
        end: 0x77,
        strict: false,
        timeout_us: 10_000,
    };

    /// Scan `start..=end` with the default probing behavior
    pub const fn range(start: u8, end: u8) -> Self {
        Self {
            start,
            end,
            ..Self::NON_RESERVED
        }
    }

    pub const fn with_strict(self, strict: bool) -> Self {
        Self { strict, ..self }
    }

    pub const fn with_timeout_us(self, timeout_us: u32) -> Self {
        Self { timeout_us, ..self }
    }
}

impl<'a, const N: usize> Context<'a, N> {
    /// Encode `msg` and write it to the peripheral at `address`
    ///
    /// Fails with [`Error::WrongRole`] before touching the bus unless this
    /// is a controller context.
    pub fn send<B: I2cBus>(
        &self,
        bus: &mut B,
        address: u8,
        msg: &Message,
    ) -> Result<(), BusError<B::Error>> {
        self.require_role(Role::Controller)?;

        let mut frame = [0u8; MAX_FRAME_SIZE];
        let len = msg.encode(&mut frame)?;

        trace!(
            "tx {=u8:#x}: opcode {=u8:#x}, {} bytes",
            address,
            msg.opcode,
            len
        );
        bus.write(address, &frame[..len]).map_err(BusError::Bus)
    }

    /// Read one frame from the peripheral at `address` and decode it
    ///
    /// The CRC outcome is recorded on this context. The returned message's
    /// address is set to `address`.
    pub fn read_message<B: I2cBus>(
        &mut self,
        bus: &mut B,
        address: u8,
        timeout_us: u32,
    ) -> Result<Message, BusError<B::Error>> {
        self.require_role(Role::Controller)?;

        let mut buf = [0u8; MAX_FRAME_SIZE];
        let n = bus
            .read(address, &mut buf, timeout_us)
            .map_err(BusError::Bus)?
            .min(buf.len());

        let mut msg = self.decode(&buf[..n]).map_err(|e| {
            warn!("bad reply from {=u8:#x}: {}", address, e);
            e
        })?;
        msg.address = address;
        Ok(msg)
    }

    /// Ask the peripheral at `address` for `opcode` and read the reply
    ///
    /// Sends SET_REPLY(`opcode`) then performs [`Self::read_message`].
    pub fn query<B: I2cBus>(
        &mut self,
        bus: &mut B,
        address: u8,
        type_id: u8,
        opcode: u8,
        timeout_us: u32,
    ) -> Result<Message, BusError<B::Error>> {
        self.send(bus, address, &Message::set_reply(type_id, opcode))?;
        self.read_message(bus, address, timeout_us)
    }

    /// Find CRUMBS peripherals in `config.start..=config.end`
    ///
    /// An address counts as found when a read returns at least a minimum
    /// frame that decodes with a valid CRC. Addresses are written to `found`
    /// in scan order; scanning stops once `found` is full. Returns the
    /// number of addresses recorded.
    ///
    /// Bus errors mean "nothing there" and are not reported. Decoding here
    /// does not touch this context's CRC statistics.
    pub fn scan<B: I2cBus>(
        &self,
        bus: &mut B,
        config: &ScanConfig,
        found: &mut [u8],
    ) -> Result<usize, Error> {
        self.require_role(Role::Controller)?;

        let mut count = 0;
        if found.is_empty() || config.start > config.end {
            return Ok(count);
        }

        for address in config.start..=config.end {
            let mut present = probe_read(bus, address, config.timeout_us);

            if !present && !config.strict {
                let mut probe = [0u8; MIN_FRAME_SIZE];
                if let Ok(len) = Message::empty(0, 0).encode(&mut probe) {
                    let _ = bus.write(address, &probe[..len]);
                }
                present = probe_read(bus, address, config.timeout_us);
            }

            if present {
                debug!("found CRUMBS device at {=u8:#x}", address);
                found[count] = address;
                count += 1;
                if count == found.len() {
                    break;
                }
            }
        }

        Ok(count)
    }
}

/// Read once from `address` and check for a well-formed frame
fn probe_read<B: I2cBus>(bus: &mut B, address: u8, timeout_us: u32) -> bool {
    let mut buf = [0u8; MAX_FRAME_SIZE];
    match bus.read(address, &mut buf, timeout_us) {
        Ok(n) if n >= MIN_FRAME_SIZE => {
            Message::decode(&buf[..n.min(buf.len())], None).is_ok()
        }
        _ => false,
    }
}
