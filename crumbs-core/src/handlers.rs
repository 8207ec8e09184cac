//! Per-opcode handler table
//!
//! A small fixed-capacity list of (opcode, handler) pairs searched linearly.
//! Tables are tiny, so this beats a map on code size and needs no heap.
//! Opcodes are unique keys: registering an existing opcode replaces its
//! handler in place.

use crate::context::{Context, Endpoint};
use crate::error::Error;

/// Default handler table capacity
pub const DEFAULT_MAX_HANDLERS: usize = 16;

/// Handler bound to one opcode
///
/// Receives the endpoint, the opcode and the payload bytes. Per-handler
/// state is captured by the closure.
pub type Handler<'a> = &'a mut (dyn FnMut(&Endpoint, u8, &[u8]) + Send + 'a);

pub(crate) struct HandlerEntry<'a> {
    pub(crate) opcode: u8,
    pub(crate) handler: Handler<'a>,
}

impl<'a, const N: usize> Context<'a, N> {
    /// Register, replace or remove the handler for `opcode`
    ///
    /// - `Some` for a known opcode replaces its handler in place.
    /// - `Some` for a new opcode appends; fails with
    ///   [`Error::HandlerTableFull`] at capacity.
    /// - `None` removes the entry by moving the last one into its slot, so
    ///   the order of the remaining entries is not preserved. Removing an
    ///   absent opcode is a no-op.
    ///
    /// A handler for [`crate::CMD_SET_REPLY`] can be registered but never
    /// runs; that opcode is consumed before dispatch.
    pub fn register_handler(
        &mut self,
        opcode: u8,
        handler: Option<Handler<'a>>,
    ) -> Result<(), Error> {
        let slot = self.handlers.iter().position(|e| e.opcode == opcode);

        match (slot, handler) {
            (Some(index), Some(handler)) => {
                self.handlers[index].handler = handler;
                trace!("handler replaced for opcode {=u8:#x}", opcode);
            }
            (Some(index), None) => {
                self.handlers.swap_remove(index);
                trace!("handler removed for opcode {=u8:#x}", opcode);
            }
            (None, Some(handler)) => {
                if self.handlers.push(HandlerEntry { opcode, handler }).is_err() {
                    warn!("handler table full, opcode {=u8:#x} rejected", opcode);
                    return Err(Error::HandlerTableFull);
                }
                trace!("handler added for opcode {=u8:#x}", opcode);
            }
            (None, None) => {}
        }

        Ok(())
    }

    /// Remove the handler for `opcode`, if any
    pub fn unregister_handler(&mut self, opcode: u8) -> Result<(), Error> {
        self.register_handler(opcode, None)
    }

    /// Number of registered handlers
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Table capacity
    pub fn handler_capacity(&self) -> usize {
        N
    }

    pub fn has_handler(&self, opcode: u8) -> bool {
        self.handlers.iter().any(|e| e.opcode == opcode)
    }

    /// Run the handler for `opcode`, if one is registered
    ///
    /// Returns whether a handler ran.
    pub(crate) fn dispatch(&mut self, opcode: u8, data: &[u8]) -> bool {
        let Self {
            ref endpoint,
            ref mut handlers,
            ..
        } = *self;

        match handlers.iter_mut().find(|e| e.opcode == opcode) {
            Some(entry) => {
                (entry.handler)(endpoint, opcode, data);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

    fn counter(hits: &AtomicUsize) -> impl FnMut(&Endpoint, u8, &[u8]) + Send + '_ {
        move |_, _, _| {
            hits.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn test_register_and_dispatch() {
        let hits = AtomicUsize::new(0);
        let mut handler = counter(&hits);

        let mut ctx: Context = Context::peripheral(0x10);
        ctx.register_handler(0x42, Some(&mut handler)).unwrap();

        assert!(ctx.has_handler(0x42));
        assert_eq!(ctx.handler_count(), 1);
        assert!(ctx.dispatch(0x42, &[1, 2]));
        assert!(!ctx.dispatch(0x43, &[]));
        assert_eq!(hits.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_handler_sees_arguments() {
        let seen = AtomicU32::new(0);
        let mut handler = |ep: &Endpoint, opcode: u8, data: &[u8]| {
            let packed = (ep.address() as u32) << 24
                | (opcode as u32) << 16
                | (data.len() as u32) << 8
                | data[0] as u32;
            seen.store(packed, Ordering::Relaxed);
        };

        let mut ctx: Context = Context::peripheral(0x21);
        ctx.register_handler(0x05, Some(&mut handler)).unwrap();
        ctx.dispatch(0x05, &[0xAB, 0xCD]);

        assert_eq!(seen.load(Ordering::Relaxed), 0x2105_02AB);
    }

    #[test]
    fn test_replace_keeps_size() {
        let first = AtomicUsize::new(0);
        let second = AtomicUsize::new(0);
        let mut h1 = counter(&first);
        let mut h2 = counter(&second);

        let mut ctx: Context = Context::peripheral(0x10);
        ctx.register_handler(0x10, Some(&mut h1)).unwrap();
        ctx.register_handler(0x10, Some(&mut h2)).unwrap();
        assert_eq!(ctx.handler_count(), 1);

        ctx.dispatch(0x10, &[]);
        assert_eq!(first.load(Ordering::Relaxed), 0);
        assert_eq!(second.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_unregister() {
        let hits = AtomicUsize::new(0);
        let mut handler = counter(&hits);

        let mut ctx: Context = Context::peripheral(0x10);
        ctx.register_handler(0x55, Some(&mut handler)).unwrap();
        ctx.unregister_handler(0x55).unwrap();

        assert!(!ctx.has_handler(0x55));
        assert_eq!(ctx.handler_count(), 0);
        assert!(!ctx.dispatch(0x55, &[]));
        assert_eq!(hits.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_unregister_absent_is_noop() {
        let mut ctx: Context = Context::peripheral(0x10);
        assert_eq!(ctx.unregister_handler(0x99), Ok(()));
        assert_eq!(ctx.handler_count(), 0);
    }

    #[test]
    fn test_remove_compacts_table() {
        let hits = [
            AtomicUsize::new(0),
            AtomicUsize::new(0),
            AtomicUsize::new(0),
        ];
        let mut h0 = counter(&hits[0]);
        let mut h1 = counter(&hits[1]);
        let mut h2 = counter(&hits[2]);

        let mut ctx: Context = Context::peripheral(0x10);
        ctx.register_handler(0x01, Some(&mut h0)).unwrap();
        ctx.register_handler(0x02, Some(&mut h1)).unwrap();
        ctx.register_handler(0x03, Some(&mut h2)).unwrap();

        ctx.unregister_handler(0x01).unwrap();
        assert_eq!(ctx.handler_count(), 2);

        // The entry moved into the freed slot still dispatches correctly
        ctx.dispatch(0x03, &[]);
        ctx.dispatch(0x02, &[]);
        assert_eq!(hits[0].load(Ordering::Relaxed), 0);
        assert_eq!(hits[1].load(Ordering::Relaxed), 1);
        assert_eq!(hits[2].load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_table_full() {
        let hits = AtomicUsize::new(0);
        let mut handlers: [_; 4] = core::array::from_fn(|_| counter(&hits));
        let mut extra = counter(&hits);
        let mut replacement = counter(&hits);

        let mut ctx: Context<'_, 4> = Context::peripheral(0x10);
        for (i, h) in handlers.iter_mut().enumerate() {
            ctx.register_handler(i as u8, Some(h)).unwrap();
        }
        assert_eq!(ctx.handler_capacity(), 4);

        assert_eq!(
            ctx.register_handler(0xFF, Some(&mut extra)),
            Err(Error::HandlerTableFull)
        );
        assert_eq!(ctx.handler_count(), 4);

        // Replacing an existing opcode still works when full
        assert_eq!(ctx.register_handler(0x00, Some(&mut replacement)), Ok(()));
        ctx.dispatch(0x00, &[]);
        assert_eq!(hits.load(Ordering::Relaxed), 1);
    }
}
