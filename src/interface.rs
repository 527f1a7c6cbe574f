//! Bus interface implementations for the LPS22HH
//!
//! This module provides implementations of the `device-driver`
//! [`RegisterInterface`] trait for SPI and I2C communication with the LPS22HH.
//!
//! All interfaces frame one register transaction as a command byte followed by
//! the data bytes. Over SPI the command byte is the register address with bit 7
//! set for reads and clear for writes. Multi-byte spans rely on the device's
//! address auto-increment (`CTRL_REG2.IF_ADD_INC`, enabled after reset).

use device_driver::RegisterInterface;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::{SpiBus, SpiDevice};

use crate::I2C_ADDRESS_SA0_HIGH;

/// Read flag set in the SPI command byte
const SPI_READ: u8 = 0x80;

/// I2C interface for the LPS22HH
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Create a new I2C interface with the default address (0x5D, SA0 pin HIGH)
    ///
    /// # Example
    /// ```ignore
    /// let interface = I2cInterface::default(i2c);
    /// let mut baro = Lps22hhDriver::new(interface)?;
    /// ```
    pub const fn default(i2c: I2C) -> Self {
        Self {
            i2c,
            address: I2C_ADDRESS_SA0_HIGH,
        }
    }

    /// Create a new I2C interface with the alternative address (0x5C, SA0 pin LOW)
    pub const fn alternative(i2c: I2C) -> Self {
        Self {
            i2c,
            address: crate::I2C_ADDRESS_SA0_LOW,
        }
    }

    /// Create a new I2C interface with a custom device address
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// The 7-bit device address in use
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Consume the interface and return the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> RegisterInterface for I2cInterface<I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.i2c.write_read(self.address, &[address], read_data)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        // Adjacent writes go out as one bus write: address byte, then payload
        let mut operations = [
            embedded_hal::i2c::Operation::Write(&[address]),
            embedded_hal::i2c::Operation::Write(write_data),
        ];

        self.i2c.transaction(self.address, &mut operations)
    }
}

/// SPI interface for the LPS22HH over an [`SpiDevice`]
///
/// # Note on Chip Select
///
/// The `SpiDevice` implementation owns the chip select (CS) pin and asserts it
/// around each transaction. With `embedded-hal-bus`:
/// ```ignore
/// let spi_device = embedded_hal_bus::spi::ExclusiveDevice::new(spi_bus, cs_pin, delay);
/// let interface = SpiInterface::new(spi_device);
/// ```
///
/// Use [`SpiBusInterface`] to drive the CS pin from this driver instead.
pub struct SpiInterface<SPI> {
    spi: SPI,
}

impl<SPI> SpiInterface<SPI> {
    /// Create a new SPI interface with the given SPI device
    pub const fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Consume the interface and return the SPI device
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI, E> RegisterInterface for SpiInterface<SPI>
where
    SPI: SpiDevice<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let mut operations = [
            embedded_hal::spi::Operation::Write(&[SPI_READ | address]),
            embedded_hal::spi::Operation::Read(read_data),
        ];

        self.spi.transaction(&mut operations)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let mut operations = [
            embedded_hal::spi::Operation::Write(&[address & !SPI_READ]),
            embedded_hal::spi::Operation::Write(write_data),
        ];

        self.spi.transaction(&mut operations)
    }
}

/// Errors from [`SpiBusInterface`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiBusError<SpiE, PinE> {
    /// The SPI transfer failed
    Spi(SpiE),
    /// Driving the chip select line failed
    ChipSelect(PinE),
}

/// SPI interface for the LPS22HH over a raw [`SpiBus`] and a chip select pin
///
/// Each register transaction drives CS low, clocks the command byte and the
/// data bytes, flushes the bus and drives CS high again. CS is released even
/// when the transfer fails.
///
/// The bus and the pin can be swapped at runtime with
/// [`set_spi`](Self::set_spi) and [`set_cs`](Self::set_cs); no transaction
/// state is held between calls. The CS pin should idle high.
pub struct SpiBusInterface<SPI, CS> {
    spi: SPI,
    cs: CS,
}

impl<SPI, CS> SpiBusInterface<SPI, CS> {
    /// Create a new SPI interface from a bus and a chip select pin
    pub const fn new(spi: SPI, cs: CS) -> Self {
        Self { spi, cs }
    }

    /// The SPI bus in use
    pub const fn spi(&self) -> &SPI {
        &self.spi
    }

    /// The chip select pin in use
    pub const fn cs(&self) -> &CS {
        &self.cs
    }

    /// Bind a different SPI bus, returning the previous one
    pub fn set_spi(&mut self, spi: SPI) -> SPI {
        core::mem::replace(&mut self.spi, spi)
    }

    /// Bind a different chip select pin, returning the previous one
    pub fn set_cs(&mut self, cs: CS) -> CS {
        core::mem::replace(&mut self.cs, cs)
    }

    /// Consume the interface and return the bus and the pin
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }
}

impl<SPI, CS> SpiBusInterface<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    fn framed<F>(&mut self, transfer: F) -> Result<(), SpiBusError<SPI::Error, CS::Error>>
    where
        F: FnOnce(&mut SPI) -> Result<(), SPI::Error>,
    {
        self.cs.set_low().map_err(SpiBusError::ChipSelect)?;
        let transferred = transfer(&mut self.spi).and_then(|()| self.spi.flush());
        let released = self.cs.set_high();

        transferred.map_err(SpiBusError::Spi)?;
        released.map_err(SpiBusError::ChipSelect)
    }
}

impl<SPI, CS> RegisterInterface for SpiBusInterface<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    type Error = SpiBusError<SPI::Error, CS::Error>;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.framed(|spi| {
            spi.write(&[SPI_READ | address])?;
            spi.read(read_data)
        })
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        self.framed(|spi| {
            spi.write(&[address & !SPI_READ])?;
            spi.write(write_data)
        })
    }
}
