//! Register map for the LPS22HH
//!
//! Every register and bit-field the driver touches is declared here as a
//! compile-time constant. A [`Register`] describes a little-endian span of
//! 1 to 3 bytes; a [`BitField`] describes a bit range inside a single-byte
//! register. Both are plain descriptors: the bus transactions live in
//! [`crate::access`].
//!
//! Addresses and bit positions follow the LPS22HH datasheet (DocID 030890),
//! section 9 "Register description".

/// A contiguous span of 1-3 registers read or written as one little-endian integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Register {
    address: u8,
    len: u8,
}

impl Register {
    /// Largest span supported by a single register transaction
    pub const MAX_LEN: u8 = 3;

    /// Describe the register span starting at `address` and `len` bytes long
    ///
    /// # Panics
    ///
    /// Panics if `len` is not in `1..=3`. For `const` items this is a
    /// compile-time error.
    #[must_use]
    pub const fn new(address: u8, len: u8) -> Self {
        assert!(len >= 1 && len <= Self::MAX_LEN, "register length must be 1..=3 bytes");
        Self { address, len }
    }

    /// Address of the least significant byte
    #[must_use]
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Number of bytes in the span
    #[must_use]
    pub const fn byte_len(&self) -> u8 {
        self.len
    }

    /// Width of the span in bits
    #[must_use]
    pub const fn size_bits(&self) -> u32 {
        self.len as u32 * 8
    }

    /// Largest value the span can hold
    #[must_use]
    pub const fn max_value(&self) -> u32 {
        (1u32 << self.size_bits()) - 1
    }
}

/// A bit range `[start, start + len)` inside one single-byte register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitField {
    address: u8,
    start: u8,
    len: u8,
}

impl BitField {
    /// Describe the field of `len` bits at bit `start` of the register at `address`
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero or the field crosses the byte boundary
    /// (`start + len > 8`). For `const` items this is a compile-time error.
    #[must_use]
    pub const fn new(address: u8, start: u8, len: u8) -> Self {
        assert!(len >= 1, "bit-field must be at least one bit wide");
        assert!(start < 8 && len <= 8 - start, "bit-field must fit in one byte");
        Self { address, start, len }
    }

    /// Address of the owning register
    #[must_use]
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Position of the least significant bit of the field
    #[must_use]
    pub const fn start(&self) -> u8 {
        self.start
    }

    /// Width of the field in bits
    #[must_use]
    pub const fn bit_len(&self) -> u8 {
        self.len
    }

    /// Largest value the field can hold
    #[must_use]
    pub const fn max_value(&self) -> u8 {
        (((1u16 << self.len) - 1) & 0xFF) as u8
    }

    /// Mask of the field's bits within the register byte
    #[must_use]
    pub const fn mask(&self) -> u8 {
        self.max_value() << self.start
    }

    /// The owning register as a one-byte span
    #[must_use]
    pub const fn register(&self) -> Register {
        Register::new(self.address, 1)
    }
}

// ==================== ADDRESSES ====================

/// `INTERRUPT_CFG` - Interrupt mode for pressure acquisition
pub const INTERRUPT_CFG: u8 = 0x0B;
/// `THS_P_L` - Pressure threshold, low byte
pub const THS_P_L: u8 = 0x0C;
/// `THS_P_H` - Pressure threshold, high byte
pub const THS_P_H: u8 = 0x0D;
/// `IF_CTRL` - Interface control
pub const IF_CTRL: u8 = 0x0E;
/// `WHO_AM_I` - Device identification
pub const WHO_AM_I: u8 = 0x0F;
/// `CTRL_REG1` - Data rate and filter control
pub const CTRL_REG1: u8 = 0x10;
/// `CTRL_REG2` - Boot, reset and one-shot control
pub const CTRL_REG2: u8 = 0x11;
/// `CTRL_REG3` - Interrupt routing
pub const CTRL_REG3: u8 = 0x12;
/// `FIFO_CTRL` - FIFO configuration
pub const FIFO_CTRL: u8 = 0x13;
/// `FIFO_WTM` - FIFO watermark level
pub const FIFO_WTM: u8 = 0x14;
/// `REF_P_L` - Reference pressure, low byte
pub const REF_P_L: u8 = 0x15;
/// `REF_P_H` - Reference pressure, high byte
pub const REF_P_H: u8 = 0x16;
/// `RPDS_L` - Pressure offset, low byte
pub const RPDS_L: u8 = 0x18;
/// `RPDS_H` - Pressure offset, high byte
pub const RPDS_H: u8 = 0x19;
/// `INT_SOURCE` - Interrupt source
pub const INT_SOURCE: u8 = 0x24;
/// `FIFO_STATUS1` - FIFO stored data level
pub const FIFO_STATUS1: u8 = 0x25;
/// `FIFO_STATUS2` - FIFO flags
pub const FIFO_STATUS2: u8 = 0x26;
/// `STATUS` - Data available and overrun flags
pub const STATUS: u8 = 0x27;
/// `PRESS_OUT_XL` - Pressure output, low part
pub const PRESS_OUT_XL: u8 = 0x28;
/// `PRESS_OUT_L` - Pressure output, middle part
pub const PRESS_OUT_L: u8 = 0x29;
/// `PRESS_OUT_H` - Pressure output, high part
pub const PRESS_OUT_H: u8 = 0x2A;
/// `TEMP_OUT_L` - Temperature output, low part
pub const TEMP_OUT_L: u8 = 0x2B;
/// `TEMP_OUT_H` - Temperature output, high part
pub const TEMP_OUT_H: u8 = 0x2C;
/// `FIFO_DATA_OUT_PRESS_XL` - FIFO pressure output, low part
pub const FIFO_DATA_OUT_PRESS_XL: u8 = 0x78;
/// `FIFO_DATA_OUT_PRESS_L` - FIFO pressure output, middle part
pub const FIFO_DATA_OUT_PRESS_L: u8 = 0x79;
/// `FIFO_DATA_OUT_PRESS_H` - FIFO pressure output, high part
pub const FIFO_DATA_OUT_PRESS_H: u8 = 0x7A;
/// `FIFO_DATA_OUT_TEMP_L` - FIFO temperature output, low part
pub const FIFO_DATA_OUT_TEMP_L: u8 = 0x7B;
/// `FIFO_DATA_OUT_TEMP_H` - FIFO temperature output, high part
pub const FIFO_DATA_OUT_TEMP_H: u8 = 0x7C;

// ==================== REGISTER SPANS ====================

/// Whole-register spans
pub mod reg {
    use super::Register;

    /// Interrupt configuration (1 byte)
    pub const INTERRUPT_CFG: Register = Register::new(super::INTERRUPT_CFG, 1);
    /// Pressure threshold (2 bytes, 15 significant bits)
    pub const THS_P: Register = Register::new(super::THS_P_L, 2);
    /// Interface control (1 byte)
    pub const IF_CTRL: Register = Register::new(super::IF_CTRL, 1);
    /// Device identification (1 byte)
    pub const WHO_AM_I: Register = Register::new(super::WHO_AM_I, 1);
    /// Control register 1 (1 byte)
    pub const CTRL_REG1: Register = Register::new(super::CTRL_REG1, 1);
    /// Control register 2 (1 byte)
    pub const CTRL_REG2: Register = Register::new(super::CTRL_REG2, 1);
    /// Control register 3 (1 byte)
    pub const CTRL_REG3: Register = Register::new(super::CTRL_REG3, 1);
    /// FIFO control (1 byte)
    pub const FIFO_CTRL: Register = Register::new(super::FIFO_CTRL, 1);
    /// FIFO watermark (1 byte)
    pub const FIFO_WTM: Register = Register::new(super::FIFO_WTM, 1);
    /// Reference pressure (2 bytes)
    pub const REF_P: Register = Register::new(super::REF_P_L, 2);
    /// Pressure offset (2 bytes)
    pub const RPDS: Register = Register::new(super::RPDS_L, 2);
    /// Interrupt source (1 byte)
    pub const INT_SOURCE: Register = Register::new(super::INT_SOURCE, 1);
    /// FIFO level (1 byte)
    pub const FIFO_STATUS1: Register = Register::new(super::FIFO_STATUS1, 1);
    /// FIFO flags (1 byte)
    pub const FIFO_STATUS2: Register = Register::new(super::FIFO_STATUS2, 1);
    /// Status (1 byte)
    pub const STATUS: Register = Register::new(super::STATUS, 1);
    /// Pressure output (3 bytes)
    pub const PRESS_OUT: Register = Register::new(super::PRESS_OUT_XL, 3);
    /// Temperature output (2 bytes)
    pub const TEMP_OUT: Register = Register::new(super::TEMP_OUT_L, 2);
    /// FIFO pressure output (3 bytes)
    pub const FIFO_DATA_OUT_PRESS: Register = Register::new(super::FIFO_DATA_OUT_PRESS_XL, 3);
    /// FIFO temperature output (2 bytes)
    pub const FIFO_DATA_OUT_TEMP: Register = Register::new(super::FIFO_DATA_OUT_TEMP_L, 2);
}

// ==================== BIT-FIELDS ====================

/// Bit-fields within single-byte registers
pub mod field {
    use super::BitField;
    use super::{
        CTRL_REG1, CTRL_REG2, CTRL_REG3, FIFO_CTRL, FIFO_STATUS2, IF_CTRL, INT_SOURCE,
        INTERRUPT_CFG, STATUS,
    };

    // INTERRUPT_CFG
    /// Enable AUTOREFP function
    pub const AUTOREFP: BitField = BitField::new(INTERRUPT_CFG, 7, 1);
    /// Reset AUTOREFP function
    pub const RESET_ARP: BitField = BitField::new(INTERRUPT_CFG, 6, 1);
    /// Enable AUTOZERO function
    pub const AUTOZERO: BitField = BitField::new(INTERRUPT_CFG, 5, 1);
    /// Reset AUTOZERO function
    pub const RESET_AZ: BitField = BitField::new(INTERRUPT_CFG, 4, 1);
    /// Enable interrupt generation
    pub const DIFF_EN: BitField = BitField::new(INTERRUPT_CFG, 3, 1);
    /// Latch interrupt request to `INT_SOURCE`
    pub const LIR: BitField = BitField::new(INTERRUPT_CFG, 2, 1);
    /// Interrupt on differential pressure low event
    pub const PLE: BitField = BitField::new(INTERRUPT_CFG, 1, 1);
    /// Interrupt on differential pressure high event
    pub const PHE: BitField = BitField::new(INTERRUPT_CFG, 0, 1);

    // IF_CTRL
    /// Enable INT pin with MIPI I3C
    pub const INT_EN_I3C: BitField = BitField::new(IF_CTRL, 7, 1);
    /// SDA pull-up enable
    pub const SDA_PU_EN: BitField = BitField::new(IF_CTRL, 4, 1);
    /// SDO pull-up enable
    pub const SDO_PU_EN: BitField = BitField::new(IF_CTRL, 3, 1);
    /// Disable pull-down on INT1
    pub const PD_DIS_INT1: BitField = BitField::new(IF_CTRL, 2, 1);
    /// Disable MIPI I3C interface
    pub const I3C_DISABLE: BitField = BitField::new(IF_CTRL, 1, 1);
    /// Disable I2C interface
    pub const I2C_DISABLE: BitField = BitField::new(IF_CTRL, 0, 1);

    // CTRL_REG1
    /// Output data rate selection
    pub const ODR: BitField = BitField::new(CTRL_REG1, 4, 3);
    /// Enable low-pass filter on pressure data
    pub const EN_LPFP: BitField = BitField::new(CTRL_REG1, 3, 1);
    /// Low-pass filter bandwidth (0 = ODR/9, 1 = ODR/20)
    pub const LPFP_CFG: BitField = BitField::new(CTRL_REG1, 2, 1);
    /// Block data update
    pub const BDU: BitField = BitField::new(CTRL_REG1, 1, 1);
    /// SPI serial interface mode (0 = 4-wire, 1 = 3-wire)
    pub const SIM: BitField = BitField::new(CTRL_REG1, 0, 1);

    // CTRL_REG2
    /// Reboot memory content
    pub const BOOT: BitField = BitField::new(CTRL_REG2, 7, 1);
    /// Interrupt active low
    pub const INT_H_L: BitField = BitField::new(CTRL_REG2, 6, 1);
    /// Interrupt pin open-drain
    pub const PP_OD: BitField = BitField::new(CTRL_REG2, 5, 1);
    /// Register address auto-increment on multi-byte access
    pub const IF_ADD_INC: BitField = BitField::new(CTRL_REG2, 4, 1);
    /// Software reset
    pub const SWRESET: BitField = BitField::new(CTRL_REG2, 2, 1);
    /// Low-noise mode (valid below 100 Hz)
    pub const LOW_NOISE_EN: BitField = BitField::new(CTRL_REG2, 1, 1);
    /// One-shot measurement trigger
    pub const ONE_SHOT: BitField = BitField::new(CTRL_REG2, 0, 1);

    // CTRL_REG3
    /// FIFO full flag on INT_DRDY pin
    pub const INT_F_FULL: BitField = BitField::new(CTRL_REG3, 5, 1);
    /// FIFO watermark flag on INT_DRDY pin
    pub const INT_F_WTM: BitField = BitField::new(CTRL_REG3, 4, 1);
    /// FIFO overrun flag on INT_DRDY pin
    pub const INT_F_OVR: BitField = BitField::new(CTRL_REG3, 3, 1);
    /// Data-ready signal on INT_DRDY pin
    pub const DRDY: BitField = BitField::new(CTRL_REG3, 2, 1);
    /// Data signal on INT_DRDY pin control bits
    pub const INT_S: BitField = BitField::new(CTRL_REG3, 0, 2);

    // FIFO_CTRL
    /// Stop on FIFO watermark
    pub const STOP_ON_WTM: BitField = BitField::new(FIFO_CTRL, 3, 1);
    /// Enable triggered FIFO modes
    pub const TRIG_MODES: BitField = BitField::new(FIFO_CTRL, 2, 1);
    /// FIFO mode selection
    pub const F_MODE: BitField = BitField::new(FIFO_CTRL, 0, 2);

    // INT_SOURCE
    /// Boot phase in progress
    pub const BOOT_ON: BitField = BitField::new(INT_SOURCE, 7, 1);
    /// Interrupt active
    pub const IA: BitField = BitField::new(INT_SOURCE, 2, 1);
    /// Differential pressure low
    pub const PL: BitField = BitField::new(INT_SOURCE, 1, 1);
    /// Differential pressure high
    pub const PH: BitField = BitField::new(INT_SOURCE, 0, 1);

    // FIFO_STATUS2
    /// FIFO watermark reached
    pub const FIFO_WTM_IA: BitField = BitField::new(FIFO_STATUS2, 7, 1);
    /// FIFO overrun
    pub const FIFO_OVR_IA: BitField = BitField::new(FIFO_STATUS2, 6, 1);
    /// FIFO full
    pub const FIFO_FULL_IA: BitField = BitField::new(FIFO_STATUS2, 5, 1);

    // STATUS
    /// Temperature data overrun
    pub const T_OR: BitField = BitField::new(STATUS, 5, 1);
    /// Pressure data overrun
    pub const P_OR: BitField = BitField::new(STATUS, 4, 1);
    /// Temperature data available
    pub const T_DA: BitField = BitField::new(STATUS, 1, 1);
    /// Pressure data available
    pub const P_DA: BitField = BitField::new(STATUS, 0, 1);
}
