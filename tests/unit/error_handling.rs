//! Unit tests for error handling and recovery

use crate::common::mock_interface::{CTRL_REG1, CTRL_REG2, MockError, THS_P_L};
use crate::common::test_utils::{FAST_POLL, MockDelay};
use crate::common::{Operation, create_mock_driver};
use lps22hh::registers::field;
use lps22hh::{Error, PollConfig, RegisterAccess};

#[test]
fn test_read_failure_basic() {
    let (mut driver, interface) = create_mock_driver();

    // Inject a read failure
    interface.fail_next_read();

    let result = driver.get_pressure();
    assert_eq!(result, Err(Error::Bus(MockError::Communication)));
}

#[test]
fn test_read_failure_recovery() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_output(4096, 0);

    // Inject a read failure
    interface.fail_next_read();
    assert!(driver.get_pressure().is_err(), "First read should fail");

    // Subsequent read should succeed (error was only for one operation)
    assert_eq!(driver.get_pressure().unwrap(), 4096.0 * 0.000_244_14);
}

#[test]
fn test_write_failure_basic() {
    let (mut driver, interface) = create_mock_driver();

    // Inject a write failure
    interface.fail_next_write();

    let result = driver.set_fifo_wtm(0x10);
    assert_eq!(result, Err(Error::Bus(MockError::Communication)));
    assert_eq!(interface.get_register(0x14), 0x00);
}

#[test]
fn test_field_write_read_failure_skips_write() {
    let (mut driver, interface) = create_mock_driver();
    interface.clear_operations();

    // The read half of the read-modify-write fails
    interface.fail_next_read();

    assert!(driver.set_block_data_update(true).is_err());
    assert_eq!(interface.write_count(), 0);
    assert_eq!(interface.get_register(CTRL_REG1), 0x00);
}

#[test]
fn test_field_write_write_failure() {
    let (mut driver, interface) = create_mock_driver();

    // The read succeeds, the write back fails
    interface.fail_next_write();

    assert!(driver.set_low_noise_enable(true).is_err());
    assert_eq!(interface.get_register(CTRL_REG2), 0x10);

    driver.set_low_noise_enable(true).unwrap();
    assert_eq!(interface.get_register(CTRL_REG2), 0x12);
}

#[test]
fn test_field_overflow_no_traffic() {
    let (mut driver, interface) = create_mock_driver();
    interface.clear_operations();

    let result = driver.interface_mut().write_field(field::INT_S, 0b100);
    assert_eq!(result, Err(Error::InvalidFieldValue(0b100)));
    assert!(interface.operations().is_empty());
}

#[test]
fn test_pressure_threshold_range() {
    let (mut driver, interface) = create_mock_driver();
    interface.clear_operations();

    assert_eq!(driver.set_pressure_threshold(0x8000), Err(Error::InvalidConfig));
    assert_eq!(interface.transaction_count(), 0);

    driver.set_pressure_threshold(0x7FFF).unwrap();
    assert_eq!(driver.get_pressure_threshold().unwrap(), 0x7FFF);

    // Reserved top bit is masked on read
    interface.set_register(THS_P_L + 1, 0xFF);
    assert_eq!(driver.get_pressure_threshold().unwrap(), 0x7FFF);
}

#[test]
fn test_reset_completes() {
    let (mut driver, interface) = create_mock_driver();
    let mut delay = MockDelay::new();

    driver.set_fifo_wtm(0x20).unwrap();
    driver.reset(&mut delay).unwrap();

    // SWRESET stayed set for one poll
    assert_eq!(delay.calls, 1);
    assert_eq!(interface.get_register(CTRL_REG2), 0x10);
    assert_eq!(driver.get_fifo_wtm().unwrap(), 0x00);
}

#[test]
fn test_reset_timeout() {
    let (mut driver, interface) = create_mock_driver();
    driver.set_poll_config(FAST_POLL);
    let mut delay = MockDelay::new();

    interface.stick_reset();

    assert_eq!(driver.reset(&mut delay), Err(Error::DeviceTimeout));
    assert_eq!(delay.calls, FAST_POLL.max_polls());
    assert_eq!(delay.total_us(), u64::from(FAST_POLL.timeout_us));
}

#[test]
fn test_boot_completes() {
    let (mut driver, interface) = create_mock_driver();
    let mut delay = MockDelay::new();
    interface.set_boot_polls(3);

    driver.boot(&mut delay).unwrap();

    assert_eq!(delay.calls, 3);
    // BOOT itself is self-clearing
    assert_eq!(interface.get_register(CTRL_REG2), 0x10);
}

#[test]
fn test_boot_timeout() {
    let (mut driver, interface) = create_mock_driver();
    driver.set_poll_config(FAST_POLL);
    interface.stick_boot();

    assert_eq!(driver.boot(&mut MockDelay::new()), Err(Error::DeviceTimeout));
}

#[test]
fn test_one_shot_timeout() {
    let (mut driver, interface) = create_mock_driver();
    driver.set_poll_config(PollConfig {
        interval_us: 1_000,
        timeout_us: 5_000,
    });
    interface.set_conversion_polls(100);
    let mut delay = MockDelay::new();

    assert_eq!(driver.read_one_shot(&mut delay), Err(Error::DeviceTimeout));
    assert_eq!(delay.calls, 5);
}

#[test]
fn test_timeout_reads_are_bounded() {
    let (mut driver, interface) = create_mock_driver();
    driver.set_poll_config(FAST_POLL);
    interface.stick_reset();
    interface.clear_operations();

    let _ = driver.reset(&mut MockDelay::new());

    // One read and one write for the request, then max_polls + 1 status reads
    let polls = interface
        .operations()
        .iter()
        .filter(|op| matches!(op, Operation::ReadRegister { address, .. } if *address == CTRL_REG2))
        .count();
    assert_eq!(polls, 1 + FAST_POLL.max_polls() as usize + 1);
}
