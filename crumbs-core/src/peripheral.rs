//! Peripheral side: inbound dispatch and reply building
//!
//! An I2C read carries no payload from controller to peripheral, so "which
//! data do you want" travels in a preceding SET_REPLY write. The opcode it
//! names is remembered on the endpoint until the next SET_REPLY and is read
//! by the request callback when the controller finally reads.

use crumbs_protocol::Message;

use crate::context::{Context, Role};
use crate::error::Error;

impl<'a, const N: usize> Context<'a, N> {
    /// Handle one frame written to us by the controller
    ///
    /// Call this from the bus receive event with exactly the bytes received.
    ///
    /// - Decode failures are returned as-is; nothing is dispatched and CRC
    ///   statistics are already updated.
    /// - SET_REPLY stores payload byte 0 as the requested opcode (an empty
    ///   payload leaves it unchanged) and is not dispatched further.
    /// - Any other message goes to `on_message` (if set) and to the handler
    ///   registered for its opcode (if any). Both may run.
    pub fn handle_receive(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.require_role(Role::Peripheral)?;

        let mut msg = match self.decode(bytes) {
            Ok(msg) => msg,
            Err(e) => {
                warn!("dropping frame ({} bytes): {}", bytes.len(), e);
                return Err(Error::Frame(e));
            }
        };
        msg.address = self.endpoint.address();

        if msg.is_set_reply() {
            if let Some(&target) = msg.data.first() {
                self.endpoint.set_requested_opcode(target);
                debug!("SET_REPLY -> {=u8:#x}", target);
            }
            return Ok(());
        }

        trace!(
            "rx type {=u8:#x} opcode {=u8:#x} len {=u8}",
            msg.type_id,
            msg.opcode,
            msg.data_len()
        );

        let Self {
            ref endpoint,
            ref mut on_message,
            ..
        } = *self;
        if let Some(callback) = on_message {
            callback(endpoint, &msg);
        }

        self.dispatch(msg.opcode, &msg.data);

        Ok(())
    }

    /// Build the frame to send when the controller reads from us
    ///
    /// Returns the number of bytes written to `out`. Zero means there is
    /// nothing to send (no request callback installed).
    pub fn build_reply(&mut self, out: &mut [u8]) -> Result<usize, Error> {
        self.require_role(Role::Peripheral)?;

        let Self {
            ref endpoint,
            ref mut on_request,
            ..
        } = *self;
        let Some(callback) = on_request else {
            return Ok(0);
        };

        let mut reply = Message::default();
        callback(endpoint, &mut reply);

        let len = reply.encode(out).map_err(|e| {
            warn!("reply for opcode {=u8:#x} not encodable: {}", reply.opcode, e);
            Error::Frame(e)
        })?;
        trace!("tx reply opcode {=u8:#x}, {} bytes", reply.opcode, len);

        Ok(len)
    }
}
