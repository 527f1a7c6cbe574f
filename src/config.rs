//! Configuration and measurement types
//!
//! # Example
//!
//! ```ignore
//! # use lps22hh::{Lps22hhDriver, Lps22hhConfig, LowPassFilter, OutputDataRate};
//! # let mut baro: Lps22hhDriver<_> = todo!();
//! let config = Lps22hhConfig {
//!     data_rate: OutputDataRate::Hz25,
//!     low_pass_filter: LowPassFilter::OdrDiv20,
//!     ..Default::default()
//! };
//! baro.configure(&config)?;
//! # Ok::<(), lps22hh::Error<()>>(())
//! ```

use crate::{PRESSURE_RESOLUTION, TEMPERATURE_RESOLUTION};

/// Output data rate (`CTRL_REG1.ODR`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputDataRate {
    /// Power-down / one-shot mode (default after reset)
    #[default]
    OneShot = 0,
    /// 1 Hz continuous
    Hz1 = 1,
    /// 10 Hz continuous
    Hz10 = 2,
    /// 25 Hz continuous
    Hz25 = 3,
    /// 50 Hz continuous
    Hz50 = 4,
    /// 75 Hz continuous
    Hz75 = 5,
    /// 100 Hz continuous
    Hz100 = 6,
    /// 200 Hz continuous
    Hz200 = 7,
}

impl OutputDataRate {
    /// Pick the slowest supported rate at or above `hz`
    ///
    /// Exactly `0` selects [`OneShot`](Self::OneShot); anything above 100 Hz
    /// selects 200 Hz. Returns `None` for negative or NaN input.
    #[must_use]
    pub fn from_hz(hz: f32) -> Option<Self> {
        if hz.is_nan() || hz < 0.0 {
            return None;
        }

        let odr = if hz == 0.0 {
            Self::OneShot
        } else if hz <= 1.0 {
            Self::Hz1
        } else if hz <= 10.0 {
            Self::Hz10
        } else if hz <= 25.0 {
            Self::Hz25
        } else if hz <= 50.0 {
            Self::Hz50
        } else if hz <= 75.0 {
            Self::Hz75
        } else if hz <= 100.0 {
            Self::Hz100
        } else {
            Self::Hz200
        };
        Some(odr)
    }

    /// Decode the 3-bit `ODR` field
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0 => Self::OneShot,
            1 => Self::Hz1,
            2 => Self::Hz10,
            3 => Self::Hz25,
            4 => Self::Hz50,
            5 => Self::Hz75,
            6 => Self::Hz100,
            _ => Self::Hz200,
        }
    }

    /// Register value for the `ODR` field
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Nominal sampling rate in Hz (0 for one-shot)
    #[must_use]
    pub const fn hz(self) -> u16 {
        match self {
            Self::OneShot => 0,
            Self::Hz1 => 1,
            Self::Hz10 => 10,
            Self::Hz25 => 25,
            Self::Hz50 => 50,
            Self::Hz75 => 75,
            Self::Hz100 => 100,
            Self::Hz200 => 200,
        }
    }

    /// Whether the device converts continuously at this rate
    #[must_use]
    pub const fn is_continuous(self) -> bool {
        !matches!(self, Self::OneShot)
    }
}

/// Pressure low-pass filter setting (`CTRL_REG1.EN_LPFP` / `LPFP_CFG`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LowPassFilter {
    /// Filter off, bandwidth ODR/2
    #[default]
    Disabled,
    /// Bandwidth ODR/9
    OdrDiv9,
    /// Bandwidth ODR/20
    OdrDiv20,
}

impl LowPassFilter {
    /// `(EN_LPFP, LPFP_CFG)` bit pair
    #[must_use]
    pub const fn bits(self) -> (bool, bool) {
        match self {
            Self::Disabled => (false, false),
            Self::OdrDiv9 => (true, false),
            Self::OdrDiv20 => (true, true),
        }
    }
}

/// Measurement configuration applied by [`Lps22hhDriver::configure`](crate::Lps22hhDriver::configure)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Lps22hhConfig {
    /// Output data rate
    pub data_rate: OutputDataRate,
    /// Pressure low-pass filter
    pub low_pass_filter: LowPassFilter,
    /// Freeze output registers until both bytes have been read
    pub block_data_update: bool,
    /// Low-noise mode (ignored by the device at 100 Hz and above)
    pub low_noise: bool,
}

/// Bounds for polling a status bit
///
/// Used by reset, boot and one-shot reads. The driver sleeps `interval_us`
/// between polls and gives up once `timeout_us` has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollConfig {
    /// Delay between two polls in microseconds
    pub interval_us: u32,
    /// Total polling budget in microseconds
    pub timeout_us: u32,
}

impl PollConfig {
    /// 100 µs interval, 50 ms budget (boot takes a few ms, one-shot at most ~40 ms)
    pub const DEFAULT: Self = Self {
        interval_us: 100,
        timeout_us: 50_000,
    };

    /// Number of polls the budget allows (at least one)
    #[must_use]
    pub const fn max_polls(&self) -> u32 {
        if self.interval_us == 0 {
            return 1;
        }
        let polls = self.timeout_us / self.interval_us;
        if polls == 0 { 1 } else { polls }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Data flags from the `STATUS` register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    /// New pressure sample available
    pub pressure_available: bool,
    /// New temperature sample available
    pub temperature_available: bool,
    /// A pressure sample was overwritten before being read
    pub pressure_overrun: bool,
    /// A temperature sample was overwritten before being read
    pub temperature_overrun: bool,
}

impl Status {
    /// Decode a raw `STATUS` byte
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self {
            pressure_available: bits & 0x01 != 0,
            temperature_available: bits & 0x02 != 0,
            pressure_overrun: bits & 0x10 != 0,
            temperature_overrun: bits & 0x20 != 0,
        }
    }
}

/// A pressure and temperature sample
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    /// Pressure in hPa
    pub pressure_hpa: f32,
    /// Temperature in °C
    pub temperature_c: f32,
}

impl Measurement {
    /// Scale raw output register values
    #[must_use]
    pub fn from_raw(pressure: u32, temperature: u16) -> Self {
        Self {
            pressure_hpa: pressure_from_raw(pressure),
            temperature_c: temperature_from_raw(temperature),
        }
    }
}

/// Convert a raw 24-bit pressure reading to hPa
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn pressure_from_raw(raw: u32) -> f32 {
    raw as f32 * PRESSURE_RESOLUTION
}

/// Convert a raw 16-bit temperature reading to °C
#[must_use]
pub fn temperature_from_raw(raw: u16) -> f32 {
    f32::from(raw) * TEMPERATURE_RESOLUTION
}
