//! Linux I2C bus access via /dev/i2c-N.

use i2cdev::core::I2CDevice;
use i2cdev::linux::LinuxI2CDevice;
use pisense_plugins::reader::I2cBus;
use pisense_plugins::{Error, Result};

/// I2C bus handle over a Linux i2c-dev adapter.
///
/// The device node is opened per transaction, matching how short-lived
/// sensor reads use the bus. Plugins sharing one adapter must run on the
/// same poll loop or be serialized by the caller; the kernel only
/// serializes individual ioctls, not our write/wait/read sequence.
pub struct LinuxI2cBus {
    device_path: String,
}

impl LinuxI2cBus {
    /// Creates a handle for adapter `n` (`/dev/i2c-n`).
    pub fn new(adapter: u8) -> Self {
        Self {
            device_path: format!("/dev/i2c-{adapter}"),
        }
    }

    fn open(&self, address: u16) -> Result<LinuxI2CDevice> {
        LinuxI2CDevice::new(&self.device_path, address)
            .map_err(|e| Error::Bus(format!("open {}: {}", self.device_path, e)))
    }
}

impl I2cBus for LinuxI2cBus {
    fn write_byte(&mut self, address: u16, byte: u8) -> Result<()> {
        self.open(address)?
            .smbus_write_byte(byte)
            .map_err(|e| Error::Bus(format!("write to 0x{address:02x}: {e}")))
    }

    fn read_block(&mut self, address: u16, register: u8, len: usize) -> Result<Vec<u8>> {
        self.open(address)?
            .smbus_read_i2c_block_data(register, len as u8)
            .map_err(|e| Error::Bus(format!("block read from 0x{address:02x}: {e}")))
    }
}
