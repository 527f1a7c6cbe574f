#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod access;
pub mod config;
pub mod device;
pub mod interface;
pub mod registers;

// Re-export main types
pub use access::RegisterAccess;
pub use config::{Lps22hhConfig, LowPassFilter, Measurement, OutputDataRate, PollConfig, Status};
pub use device::Lps22hhDriver;
pub use interface::{I2cInterface, SpiBusError, SpiBusInterface, SpiInterface};
pub use registers::{BitField, Register};

/// LPS22HH I2C address when the SA0/SDO pin is low (0x5C)
pub const I2C_ADDRESS_SA0_LOW: u8 = 0x5C;

/// LPS22HH I2C address when the SA0/SDO pin is high (0x5D)
///
/// Most breakout boards pull SA0 high, so this is what
/// [`I2cInterface::default()`] uses.
pub const I2C_ADDRESS_SA0_HIGH: u8 = 0x5D;

/// Expected value of `WHO_AM_I` register
pub const WHO_AM_I_VALUE: u8 = 0xB3;

/// Pressure sensitivity in LSB/hPa
pub const PRESSURE_SENSITIVITY: u32 = 4096;

/// Pressure resolution in hPa/LSB (1/4096, rounded as in the datasheet)
pub const PRESSURE_RESOLUTION: f32 = 0.000_244_14;

/// Temperature sensitivity in LSB/°C
pub const TEMPERATURE_SENSITIVITY: u32 = 100;

/// Temperature resolution in °C/LSB
pub const TEMPERATURE_RESOLUTION: f32 = 0.01;

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device
    Bus(E),
    /// Invalid `WHO_AM_I` register value (contains the actual value read)
    InvalidDevice(u8),
    /// Invalid configuration parameter
    InvalidConfig,
    /// Value does not fit in the target bit-field (contains the rejected value)
    InvalidFieldValue(u8),
    /// Value does not fit in the target register (contains the rejected value)
    InvalidRegisterValue(u32),
    /// Device did not report completion before the polling deadline
    DeviceTimeout,
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}
