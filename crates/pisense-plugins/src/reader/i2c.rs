//! I2C transaction reader.

use super::DeviceReader;
use crate::error::{Error, Result};
use std::time::Duration;
use tracing::debug;

/// Byte-oriented access to an I2C bus.
///
/// Implemented by the host over whatever bus access it has (the daemon uses
/// `/dev/i2c-N`). When several plugins share one physical bus the host must
/// serialize access; no bus-level locking happens here.
pub trait I2cBus: Send {
    /// Writes a single byte to a 7-bit device address.
    fn write_byte(&mut self, address: u16, byte: u8) -> Result<()>;

    /// Reads `len` bytes starting at `register` from a device.
    fn read_block(&mut self, address: u16, register: u8, len: usize) -> Result<Vec<u8>>;
}

/// One-shot ADC read over I2C: start a conversion, wait for it to settle,
/// read back the result block.
///
/// The settling sleep blocks the calling thread for the full conversion
/// time; it is on the poll cycle's critical path and not cancellable.
pub struct I2cTransactionReader<B: I2cBus> {
    bus: B,
    address: u16,
    config_byte: u8,
    settle: Duration,
}

impl<B: I2cBus> I2cTransactionReader<B> {
    /// Number of bytes read back: two data bytes plus the config register.
    const READ_LEN: usize = 3;

    /// Creates a reader for one device on `bus`.
    pub fn new(bus: B, address: u16, config_byte: u8, settle: Duration) -> Self {
        Self {
            bus,
            address,
            config_byte,
            settle,
        }
    }

    /// Device address on the bus.
    pub fn address(&self) -> u16 {
        self.address
    }
}

impl<B: I2cBus> DeviceReader for I2cTransactionReader<B> {
    /// Raw conversion code, first two bytes big-endian.
    type Value = u16;

    fn describe(&self) -> String {
        format!("I2C device 0x{:02x}", self.address)
    }

    fn read(&mut self) -> Result<u16> {
        self.bus.write_byte(self.address, self.config_byte)?;
        std::thread::sleep(self.settle);
        let data = self.bus.read_block(self.address, 0x00, Self::READ_LEN)?;
        if data.len() < 2 {
            return Err(Error::Bus(format!(
                "short read from 0x{:02x}: {} bytes",
                self.address,
                data.len()
            )));
        }
        let code = u16::from_be_bytes([data[0], data[1]]);
        debug!("I2C device 0x{:02x}: raw code {}", self.address, code);
        Ok(code)
    }
}
