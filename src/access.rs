//! Register and bit-field transactions
//!
//! [`RegisterAccess`] layers typed register access on top of any
//! [`RegisterInterface`] with 8-bit addresses:
//!
//! - [`read_reg`](RegisterAccess::read_reg) / [`write_reg`](RegisterAccess::write_reg)
//!   move a whole [`Register`] span in one bus transaction, converting to and
//!   from a little-endian integer.
//! - [`read_field`](RegisterAccess::read_field) / [`write_field`](RegisterAccess::write_field)
//!   operate on a [`BitField`]. Writes are read-modify-write: two transactions
//!   against the owning register, leaving every bit outside the field as read.
//!
//! Values wider than their destination are rejected before any bus traffic,
//! so a bad value can never bleed into a neighbouring field.
//!
//! The read-modify-write is not atomic. If several owners share one device,
//! serialize access to the same register address outside the driver.

use device_driver::RegisterInterface;

use crate::Error;
use crate::registers::{BitField, Register};

/// Typed register and bit-field access for any 8-bit addressed register interface
pub trait RegisterAccess: RegisterInterface<AddressType = u8> {
    /// Read a register span and decode it as an unsigned little-endian integer
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the transaction fails.
    fn read_reg(&mut self, register: Register) -> Result<u32, Error<Self::Error>> {
        let mut buffer = [0u8; 4];
        let len = usize::from(register.byte_len());
        self.read_register(register.address(), register.size_bits(), &mut buffer[..len])?;
        let value = u32::from_le_bytes(buffer);

        #[cfg(feature = "defmt")]
        defmt::trace!("read {=u8:#04x} ({=u8} B): {=u32:#x}", register.address(), register.byte_len(), value);

        Ok(value)
    }

    /// Encode `value` little-endian and write it to a register span
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRegisterValue`] if `value` does not fit in the
    /// span (nothing is sent), or [`Error::Bus`] if the transaction fails.
    fn write_reg(&mut self, register: Register, value: u32) -> Result<(), Error<Self::Error>> {
        if value > register.max_value() {
            return Err(Error::InvalidRegisterValue(value));
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("write {=u8:#04x} ({=u8} B): {=u32:#x}", register.address(), register.byte_len(), value);

        let bytes = value.to_le_bytes();
        let len = usize::from(register.byte_len());
        self.write_register(register.address(), register.size_bits(), &bytes[..len])?;
        Ok(())
    }

    /// Read a bit-field, returned right-aligned in `0..=field.max_value()`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the transaction fails.
    fn read_field(&mut self, field: BitField) -> Result<u8, Error<Self::Error>> {
        let byte = read_byte(self, field.address())?;
        Ok((byte & field.mask()) >> field.start())
    }

    /// Replace the bits of `field` with `value`, preserving the rest of the byte
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFieldValue`] if `value` is wider than the field
    /// (nothing is sent), or [`Error::Bus`] if either transaction fails.
    fn write_field(&mut self, field: BitField, value: u8) -> Result<(), Error<Self::Error>> {
        if value > field.max_value() {
            return Err(Error::InvalidFieldValue(value));
        }

        let current = read_byte(self, field.address())?;
        let updated = (current & !field.mask()) | (value << field.start());

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "modify {=u8:#04x}: {=u8:#010b} -> {=u8:#010b}",
            field.address(),
            current,
            updated
        );

        self.write_register(field.address(), 8, &[updated])?;
        Ok(())
    }

    /// Read a one-bit field as a flag
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the transaction fails.
    fn read_flag(&mut self, field: BitField) -> Result<bool, Error<Self::Error>> {
        Ok(self.read_field(field)? != 0)
    }

    /// Set or clear a one-bit field
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if either transaction fails.
    fn write_flag(&mut self, field: BitField, set: bool) -> Result<(), Error<Self::Error>> {
        self.write_field(field, u8::from(set))
    }
}

impl<I> RegisterAccess for I where I: RegisterInterface<AddressType = u8> + ?Sized {}

fn read_byte<I>(interface: &mut I, address: u8) -> Result<u8, Error<I::Error>>
where
    I: RegisterInterface<AddressType = u8> + ?Sized,
{
    let mut byte = [0u8; 1];
    interface.read_register(address, 8, &mut byte)?;
    Ok(byte[0])
}
