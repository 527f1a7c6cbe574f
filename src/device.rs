//! High-level driver API for the LPS22HH
//!
//! [`Lps22hhDriver`] maps named sensor operations onto the register map in
//! [`crate::registers`]. Every method is one explicit bus operation (or a
//! bounded sequence of them); the driver keeps no register state between
//! calls, so the interface can be swapped at any time.

use device_driver::RegisterInterface;
use embedded_hal::delay::DelayNs;

use crate::access::RegisterAccess;
use crate::config::{
    Lps22hhConfig, LowPassFilter, Measurement, OutputDataRate, PollConfig, Status,
    pressure_from_raw, temperature_from_raw,
};
use crate::registers::{BitField, field, reg};
use crate::{Error, WHO_AM_I_VALUE};

/// Largest value of the 15-bit pressure threshold
const THS_P_MAX: u16 = 0x7FFF;

/// Main driver for the LPS22HH
pub struct Lps22hhDriver<I> {
    interface: I,
    poll: PollConfig,
}

impl<I> Lps22hhDriver<I> {
    /// Create a driver without checking the device identity
    ///
    /// Prefer [`new`](Self::new) unless the bus is known to be shared with a
    /// device that must not be probed.
    pub const fn new_unchecked(interface: I) -> Self {
        Self {
            interface,
            poll: PollConfig::DEFAULT,
        }
    }

    /// Replace the polling bounds used by reset, boot and one-shot reads
    #[must_use]
    pub const fn with_poll_config(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }

    /// Current polling bounds
    pub const fn poll_config(&self) -> PollConfig {
        self.poll
    }

    /// Change the polling bounds used by reset, boot and one-shot reads
    pub const fn set_poll_config(&mut self, poll: PollConfig) {
        self.poll = poll;
    }

    /// Get a reference to the underlying interface
    pub const fn interface(&self) -> &I {
        &self.interface
    }

    /// Get a mutable reference to the underlying interface
    ///
    /// Useful to rebind the bus or chip select of a
    /// [`SpiBusInterface`](crate::SpiBusInterface) in place.
    pub const fn interface_mut(&mut self) -> &mut I {
        &mut self.interface
    }

    /// Bind a different interface, returning the previous one
    ///
    /// Device-side state (data rate, filters, ...) is untouched.
    pub fn replace_interface(&mut self, interface: I) -> I {
        core::mem::replace(&mut self.interface, interface)
    }

    /// Consume the driver and return the underlying interface
    pub fn release(self) -> I {
        self.interface
    }
}

impl<I> Lps22hhDriver<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Create a new LPS22HH driver instance
    ///
    /// This will verify the `WHO_AM_I` register but will not reset or
    /// configure the device.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Communication with the device fails
    /// - The `WHO_AM_I` register contains an unexpected value
    pub fn new(interface: I) -> Result<Self, Error<I::Error>> {
        let mut driver = Self::new_unchecked(interface);

        let who_am_i = driver.get_device_id()?;
        if who_am_i != WHO_AM_I_VALUE {
            #[cfg(feature = "defmt")]
            defmt::warn!("Unexpected WHO_AM_I: {=u8:#04x}", who_am_i);

            return Err(Error::InvalidDevice(who_am_i));
        }

        Ok(driver)
    }

    /// Read the `WHO_AM_I` register
    ///
    /// Should return 0xB3 for a valid LPS22HH
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_device_id(&mut self) -> Result<u8, Error<I::Error>> {
        let id = self.interface.read_reg(reg::WHO_AM_I)?;
        Ok(id.to_le_bytes()[0])
    }

    /// Software reset
    ///
    /// Sets `SWRESET` and waits for the device to clear it. Restores the
    /// default value of the control, interrupt, FIFO and status registers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceTimeout`] if the bit is still set once the
    /// polling budget is spent, or a bus error.
    pub fn reset<D>(&mut self, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: DelayNs,
    {
        self.interface.write_flag(field::SWRESET, true)?;
        self.wait_for(delay, field::SWRESET, false)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("LPS22HH software reset complete");

        Ok(())
    }

    /// Reboot memory content
    ///
    /// Sets `BOOT` and waits for `INT_SOURCE.BOOT_ON` to clear, reloading
    /// the trimming parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceTimeout`] if the boot phase does not end within
    /// the polling budget, or a bus error.
    pub fn boot<D>(&mut self, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: DelayNs,
    {
        self.interface.write_flag(field::BOOT, true)?;
        self.wait_for(delay, field::BOOT_ON, false)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("LPS22HH boot complete");

        Ok(())
    }

    /// Poll a one-bit field until it reads `expected`
    fn wait_for<D>(
        &mut self,
        delay: &mut D,
        flag: BitField,
        expected: bool,
    ) -> Result<(), Error<I::Error>>
    where
        D: DelayNs,
    {
        for _ in 0..self.poll.max_polls() {
            if self.interface.read_flag(flag)? == expected {
                return Ok(());
            }
            delay.delay_us(self.poll.interval_us);
        }

        if self.interface.read_flag(flag)? == expected {
            return Ok(());
        }

        #[cfg(feature = "defmt")]
        defmt::warn!(
            "Timed out waiting for {=u8:#04x}[{=u8}] to become {=bool}",
            flag.address(),
            flag.start(),
            expected
        );

        Err(Error::DeviceTimeout)
    }

    /// Set the output data rate from a rate in Hz
    ///
    /// The request is rounded up to the next supported rate:
    ///
    /// | Requested (Hz) | Selected |
    /// |----------------|----------|
    /// | 0              | one-shot |
    /// | (0, 1]         | 1 Hz     |
    /// | (1, 10]        | 10 Hz    |
    /// | (10, 25]       | 25 Hz    |
    /// | (25, 50]       | 50 Hz    |
    /// | (50, 75]       | 75 Hz    |
    /// | (75, 100]      | 100 Hz   |
    /// | above 100      | 200 Hz   |
    ///
    /// Returns the rate that was written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for a negative or NaN rate, or a bus
    /// error.
    pub fn set_data_rate(&mut self, hz: f32) -> Result<OutputDataRate, Error<I::Error>> {
        let odr = OutputDataRate::from_hz(hz).ok_or(Error::InvalidConfig)?;
        self.set_output_data_rate(odr)?;
        Ok(odr)
    }

    /// Write the output data rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_output_data_rate(&mut self, odr: OutputDataRate) -> Result<(), Error<I::Error>> {
        self.interface.write_field(field::ODR, odr.bits())
    }

    /// Read the output data rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_data_rate(&mut self) -> Result<OutputDataRate, Error<I::Error>> {
        let bits = self.interface.read_field(field::ODR)?;
        Ok(OutputDataRate::from_bits(bits))
    }

    /// Whether a new pressure sample is available (`STATUS.P_DA`)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn has_new_measurement(&mut self) -> Result<bool, Error<I::Error>> {
        self.interface.read_flag(field::P_DA)
    }

    /// Whether a new temperature sample is available (`STATUS.T_DA`)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn has_new_temperature(&mut self) -> Result<bool, Error<I::Error>> {
        self.interface.read_flag(field::T_DA)
    }

    /// Read all data flags from `STATUS`
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_status(&mut self) -> Result<Status, Error<I::Error>> {
        let bits = self.interface.read_reg(reg::STATUS)?;
        Ok(Status::from_bits(bits.to_le_bytes()[0]))
    }

    /// Start a single conversion (`CTRL_REG2.ONE_SHOT`)
    ///
    /// Only meaningful in one-shot mode; harmless at any other data rate.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn trigger_measurement(&mut self) -> Result<(), Error<I::Error>> {
        self.interface.write_flag(field::ONE_SHOT, true)
    }

    /// Read the raw 24-bit pressure output
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_raw_pressure(&mut self) -> Result<u32, Error<I::Error>> {
        self.interface.read_reg(reg::PRESS_OUT)
    }

    /// Read the pressure in hPa
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_pressure(&mut self) -> Result<f32, Error<I::Error>> {
        Ok(pressure_from_raw(self.get_raw_pressure()?))
    }

    /// Read the raw 16-bit temperature output
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_raw_temperature(&mut self) -> Result<u16, Error<I::Error>> {
        let raw = self.interface.read_reg(reg::TEMP_OUT)?;
        let [low, high, ..] = raw.to_le_bytes();
        Ok(u16::from_le_bytes([low, high]))
    }

    /// Read the temperature in °C
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_temperature(&mut self) -> Result<f32, Error<I::Error>> {
        Ok(temperature_from_raw(self.get_raw_temperature()?))
    }

    /// Read the current pressure and temperature outputs
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_measurement(&mut self) -> Result<Measurement, Error<I::Error>> {
        let pressure = self.get_raw_pressure()?;
        let temperature = self.get_raw_temperature()?;
        Ok(Measurement::from_raw(pressure, temperature))
    }

    /// Trigger a conversion, wait for it and read the result
    ///
    /// Requires one-shot mode. An unread sample left in the output registers
    /// is read and discarded first, so the result always comes from the
    /// conversion started here.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the device is in a continuous data
    /// rate, [`Error::DeviceTimeout`] if no pressure sample becomes available
    /// within the polling budget, or a bus error.
    pub fn read_one_shot<D>(&mut self, delay: &mut D) -> Result<Measurement, Error<I::Error>>
    where
        D: DelayNs,
    {
        if self.get_data_rate()?.is_continuous() {
            return Err(Error::InvalidConfig);
        }

        // Clear P_DA so the poll below only sees the new conversion
        if self.has_new_measurement()? {
            let _stale = self.read_measurement()?;
        }

        self.trigger_measurement()?;
        self.wait_for(delay, field::P_DA, true)?;
        self.read_measurement()
    }

    /// Write the reference pressure (`REF_P`)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_reference_pressure(&mut self, value: u16) -> Result<(), Error<I::Error>> {
        self.interface.write_reg(reg::REF_P, u32::from(value))
    }

    /// Read the reference pressure (`REF_P`)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_reference_pressure(&mut self) -> Result<u16, Error<I::Error>> {
        self.read_u16(reg::REF_P)
    }

    /// Write the pressure offset used for one-point calibration (`RPDS`)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_pressure_offset(&mut self, value: u16) -> Result<(), Error<I::Error>> {
        self.interface.write_reg(reg::RPDS, u32::from(value))
    }

    /// Read the pressure offset (`RPDS`)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_pressure_offset(&mut self) -> Result<u16, Error<I::Error>> {
        self.read_u16(reg::RPDS)
    }

    /// Write the 15-bit pressure interrupt threshold (`THS_P`)
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `value` exceeds 15 bits, or a bus
    /// error.
    pub fn set_pressure_threshold(&mut self, value: u16) -> Result<(), Error<I::Error>> {
        if value > THS_P_MAX {
            return Err(Error::InvalidConfig);
        }
        self.interface.write_reg(reg::THS_P, u32::from(value))
    }

    /// Read the pressure interrupt threshold (`THS_P`)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_pressure_threshold(&mut self) -> Result<u16, Error<I::Error>> {
        Ok(self.read_u16(reg::THS_P)? & THS_P_MAX)
    }

    /// Write the FIFO watermark level (`FIFO_WTM`)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_fifo_wtm(&mut self, value: u8) -> Result<(), Error<I::Error>> {
        self.interface.write_reg(reg::FIFO_WTM, u32::from(value))
    }

    /// Read the FIFO watermark level (`FIFO_WTM`)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_fifo_wtm(&mut self) -> Result<u8, Error<I::Error>> {
        let value = self.interface.read_reg(reg::FIFO_WTM)?;
        Ok(value.to_le_bytes()[0])
    }

    /// Enable/disable low-noise mode (`CTRL_REG2.LOW_NOISE_EN`)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_low_noise_enable(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.interface.write_flag(field::LOW_NOISE_EN, enable)
    }

    /// Read the low-noise mode bit
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_low_noise_enable(&mut self) -> Result<bool, Error<I::Error>> {
        self.interface.read_flag(field::LOW_NOISE_EN)
    }

    /// Enable/disable the pressure low-pass filter (`CTRL_REG1.EN_LPFP`)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_low_pass_filter_enable(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.interface.write_flag(field::EN_LPFP, enable)
    }

    /// Read the low-pass filter enable bit
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_low_pass_filter_enable(&mut self) -> Result<bool, Error<I::Error>> {
        self.interface.read_flag(field::EN_LPFP)
    }

    /// Select the low-pass filter bandwidth (`CTRL_REG1.LPFP_CFG`)
    ///
    /// `false` selects ODR/9, `true` selects ODR/20.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_low_pass_filter_configuration(&mut self, odr_div_20: bool) -> Result<(), Error<I::Error>> {
        self.interface.write_flag(field::LPFP_CFG, odr_div_20)
    }

    /// Read the low-pass filter bandwidth bit
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_low_pass_filter_configuration(&mut self) -> Result<bool, Error<I::Error>> {
        self.interface.read_flag(field::LPFP_CFG)
    }

    /// Enable/disable block data update (`CTRL_REG1.BDU`)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_block_data_update(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.interface.write_flag(field::BDU, enable)
    }

    /// Read the block data update bit
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_block_data_update(&mut self) -> Result<bool, Error<I::Error>> {
        self.interface.read_flag(field::BDU)
    }

    /// Enable/disable register address auto-increment (`CTRL_REG2.IF_ADD_INC`)
    ///
    /// Multi-byte reads and writes need this bit set (the reset default).
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_auto_increment(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.interface.write_flag(field::IF_ADD_INC, enable)
    }

    /// Read the address auto-increment bit
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_auto_increment(&mut self) -> Result<bool, Error<I::Error>> {
        self.interface.read_flag(field::IF_ADD_INC)
    }

    /// Apply a measurement configuration
    ///
    /// Filter and update policy are written before the data rate so the first
    /// continuous sample already uses them.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn configure(&mut self, config: &Lps22hhConfig) -> Result<(), Error<I::Error>> {
        let (lpf_enable, lpf_div_20) = config.low_pass_filter.bits();
        self.set_low_pass_filter_enable(lpf_enable)?;
        self.set_low_pass_filter_configuration(lpf_div_20)?;
        self.set_block_data_update(config.block_data_update)?;
        self.set_low_noise_enable(config.low_noise)?;
        self.set_output_data_rate(config.data_rate)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("LPS22HH configured: {}", config);

        Ok(())
    }

    /// Read back the measurement configuration
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_configuration(&mut self) -> Result<Lps22hhConfig, Error<I::Error>> {
        let low_pass_filter = match (
            self.get_low_pass_filter_enable()?,
            self.get_low_pass_filter_configuration()?,
        ) {
            (false, _) => LowPassFilter::Disabled,
            (true, false) => LowPassFilter::OdrDiv9,
            (true, true) => LowPassFilter::OdrDiv20,
        };

        Ok(Lps22hhConfig {
            data_rate: self.get_data_rate()?,
            low_pass_filter,
            block_data_update: self.get_block_data_update()?,
            low_noise: self.get_low_noise_enable()?,
        })
    }

    fn read_u16(&mut self, register: crate::Register) -> Result<u16, Error<I::Error>> {
        let [low, high, ..] = self.interface.read_reg(register)?.to_le_bytes();
        Ok(u16::from_le_bytes([low, high]))
    }
}
