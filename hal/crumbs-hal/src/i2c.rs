//! I2C bus abstractions
//!
//! Provides the two transport primitives the protocol needs, plus an
//! adapter for any `embedded-hal` 1.0 I2C controller.

use embedded_hal::i2c::{I2c, SevenBitAddress};

/// Frame-level I2C transport
///
/// Implementations perform one complete bus transaction per call. Any
/// blocking, arbitration or timeout handling happens here, never in the
/// protocol core.
pub trait I2cBus {
    /// Error type for bus operations
    ///
    /// Passed through the core unchanged.
    type Error;

    /// Write a complete frame to a device
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Encoded frame bytes
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read up to `buf.len()` bytes from a device
    ///
    /// Returns the number of bytes actually read.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    /// * `timeout_us` - Hint for how long to wait; implementations may ignore it
    fn read(&mut self, address: u8, buf: &mut [u8], timeout_us: u32)
        -> Result<usize, Self::Error>;
}

impl<T: I2cBus + ?Sized> I2cBus for &mut T {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write(address, data)
    }

    fn read(
        &mut self,
        address: u8,
        buf: &mut [u8],
        timeout_us: u32,
    ) -> Result<usize, Self::Error> {
        (**self).read(address, buf, timeout_us)
    }
}

/// [`I2cBus`] over an `embedded-hal` I2C controller
///
/// `embedded-hal` reads always fill the whole buffer, so a successful read
/// reports `buf.len()` bytes. The timeout hint is ignored; configure
/// timeouts on the underlying driver.
#[derive(Debug)]
pub struct EmbeddedHalBus<I> {
    i2c: I,
}

impl<I> EmbeddedHalBus<I> {
    /// Wrap an I2C controller
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }

    /// Get access to the underlying controller
    pub fn inner(&mut self) -> &mut I {
        &mut self.i2c
    }

    /// Release the underlying controller
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c<SevenBitAddress>> I2cBus for EmbeddedHalBus<I> {
    type Error = I::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        I2c::write(&mut self.i2c, address, data)
    }

    fn read(
        &mut self,
        address: u8,
        buf: &mut [u8],
        _timeout_us: u32,
    ) -> Result<usize, Self::Error> {
        I2c::read(&mut self.i2c, address, buf)?;
        Ok(buf.len())
    }
}
