//! Mutex-guarded context
//!
//! On a peripheral the receive and request events usually fire from an
//! interrupt while the main loop registers handlers. Wrapping the context
//! in a blocking mutex lets all of them reach it through a `static`:
//!
//! ```ignore
//! static CTX: SharedContext<'static, CriticalSectionRawMutex> =
//!     SharedContext::new(Context::peripheral(0x20));
//!
//! // I2C receive interrupt
//! let _ = CTX.handle_receive(&rx_bytes);
//!
//! // I2C request interrupt
//! let len = CTX.build_reply(&mut tx_buf).unwrap_or(0);
//! ```

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::context::Context;
use crate::error::Error;
use crate::handlers::DEFAULT_MAX_HANDLERS;

/// A [`Context`] behind an embassy blocking mutex
///
/// `M` picks the locking strategy, e.g. `CriticalSectionRawMutex` when
/// interrupts are involved or `NoopRawMutex` for single-context use.
pub struct SharedContext<'a, M: RawMutex, const N: usize = DEFAULT_MAX_HANDLERS> {
    inner: Mutex<M, RefCell<Context<'a, N>>>,
}

impl<'a, M: RawMutex, const N: usize> SharedContext<'a, M, N> {
    pub const fn new(ctx: Context<'a, N>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(ctx)),
        }
    }

    /// Run `f` with exclusive access to the context
    ///
    /// Panics if called again from inside `f`.
    pub fn lock<R>(&self, f: impl FnOnce(&mut Context<'a, N>) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// See [`Context::handle_receive`]
    pub fn handle_receive(&self, bytes: &[u8]) -> Result<(), Error> {
        self.lock(|ctx| ctx.handle_receive(bytes))
    }

    /// See [`Context::build_reply`]
    pub fn build_reply(&self, out: &mut [u8]) -> Result<usize, Error> {
        self.lock(|ctx| ctx.build_reply(out))
    }

    pub fn into_inner(self) -> Context<'a, N> {
        self.inner.into_inner().into_inner()
    }
}
