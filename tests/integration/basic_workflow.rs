//! Integration tests for basic driver workflows

use crate::common::mock_bus::spi_bus_fixture;
use crate::common::mock_interface::{CTRL_REG1, CTRL_REG2, FIFO_WTM, MockInterface};
use crate::common::test_utils::assert_float_eq;
use crate::common::{MockDelay, create_mock_driver};
use lps22hh::{
    Error, Lps22hhConfig, Lps22hhDriver, LowPassFilter, OutputDataRate, SpiBusInterface,
};

#[test]
fn test_reset_restores_fifo_watermark() {
    let (mut driver, interface) = create_mock_driver();
    let mut delay = MockDelay::new();

    driver.set_fifo_wtm(0xAB).unwrap();
    assert_eq!(driver.get_fifo_wtm().unwrap(), 0xAB);
    assert_eq!(interface.get_register(FIFO_WTM), 0xAB);

    driver.reset(&mut delay).unwrap();

    assert_eq!(driver.get_fifo_wtm().unwrap(), 0x00);
}

#[test]
fn test_one_shot_trigger_and_poll() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_conversion_polls(1);
    interface.set_next_sample(4096 * 1000, 2_000);

    assert!(!driver.has_new_measurement().unwrap());

    driver.trigger_measurement().unwrap();
    assert!(!driver.has_new_measurement().unwrap());
    assert!(driver.has_new_measurement().unwrap());

    assert_float_eq(driver.get_pressure().unwrap(), 1000.0, 0.5);
    assert_float_eq(driver.get_temperature().unwrap(), 20.0, 0.001);

    // ONE_SHOT cleared itself once the conversion finished
    assert_eq!(interface.get_register(CTRL_REG2) & 0x01, 0);
    assert!(!driver.has_new_measurement().unwrap());
}

#[test]
fn test_read_one_shot() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_conversion_polls(4);
    interface.set_next_sample(4_150_272, 2_345);
    let mut delay = MockDelay::new();

    let measurement = driver.read_one_shot(&mut delay).unwrap();

    assert_float_eq(measurement.pressure_hpa, 1013.25, 0.01);
    assert_float_eq(measurement.temperature_c, 23.45, 0.001);
    assert_eq!(delay.calls, 4);
}

#[test]
fn test_continuous_mode_workflow() {
    let (mut driver, interface) = create_mock_driver();
    let mut delay = MockDelay::new();

    driver.reset(&mut delay).unwrap();
    driver.set_block_data_update(true).unwrap();
    assert_eq!(driver.set_data_rate(25.0).unwrap(), OutputDataRate::Hz25);
    assert_eq!(interface.get_register(CTRL_REG1), 0b0011_0010);

    // The device produces a sample on its own
    interface.set_output(4096 * 990, 1_850);

    assert!(driver.has_new_measurement().unwrap());
    let measurement = driver.read_measurement().unwrap();
    assert_float_eq(measurement.pressure_hpa, 990.0, 0.5);
    assert_float_eq(measurement.temperature_c, 18.5, 0.001);
}

#[test]
fn test_configure_round_trip() {
    let (mut driver, interface) = create_mock_driver();

    let config = Lps22hhConfig {
        data_rate: OutputDataRate::Hz50,
        low_pass_filter: LowPassFilter::OdrDiv20,
        block_data_update: true,
        low_noise: true,
    };
    driver.configure(&config).unwrap();

    assert_eq!(driver.get_configuration().unwrap(), config);
    // ODR=100 | EN_LPFP | LPFP_CFG | BDU
    assert_eq!(interface.get_register(CTRL_REG1), 0b0100_1110);
    // IF_ADD_INC | LOW_NOISE_EN
    assert_eq!(interface.get_register(CTRL_REG2), 0b0001_0010);

    driver.configure(&Lps22hhConfig::default()).unwrap();
    assert_eq!(driver.get_configuration().unwrap(), Lps22hhConfig::default());
    assert_eq!(interface.get_register(CTRL_REG1), 0);
}

#[test]
fn test_low_pass_filter_accessors() {
    let (mut driver, _interface) = create_mock_driver();

    driver.set_low_pass_filter_enable(true).unwrap();
    driver.set_low_pass_filter_configuration(false).unwrap();
    assert!(driver.get_low_pass_filter_enable().unwrap());
    assert!(!driver.get_low_pass_filter_configuration().unwrap());
    assert_eq!(
        driver.get_configuration().unwrap().low_pass_filter,
        LowPassFilter::OdrDiv9
    );
}

#[test]
fn test_calibration_registers() {
    let (mut driver, _interface) = create_mock_driver();

    driver.set_reference_pressure(0xABCD).unwrap();
    driver.set_pressure_offset(0xFFEE).unwrap();

    assert_eq!(driver.get_reference_pressure().unwrap(), 0xABCD);
    assert_eq!(driver.get_pressure_offset().unwrap(), 0xFFEE);
}

#[test]
fn test_auto_increment_accessor() {
    let (mut driver, _interface) = create_mock_driver();

    assert!(driver.get_auto_increment().unwrap());
    driver.set_auto_increment(false).unwrap();
    assert!(!driver.get_auto_increment().unwrap());
    driver.set_auto_increment(true).unwrap();
    assert!(driver.get_auto_increment().unwrap());
}

#[test]
fn test_replace_interface_keeps_device_state() {
    let (mut driver, first) = create_mock_driver();
    driver.set_fifo_wtm(0x11).unwrap();

    let second = MockInterface::new();
    let previous = driver.replace_interface(second.clone());
    assert_eq!(previous.get_register(FIFO_WTM), 0x11);

    driver.set_fifo_wtm(0x22).unwrap();

    assert_eq!(first.get_register(FIFO_WTM), 0x11);
    assert_eq!(second.get_register(FIFO_WTM), 0x22);
}

#[test]
fn test_rebinding_through_driver() {
    let (bus, cs, probe) = spi_bus_fixture();
    let mut driver = Lps22hhDriver::new(SpiBusInterface::new(bus, cs)).unwrap();
    driver.set_fifo_wtm(0x01).unwrap();

    let (other_bus, other_cs, other_probe) = spi_bus_fixture();
    let old_bus = driver.interface_mut().set_spi(other_bus);
    let old_cs = driver.interface_mut().set_cs(other_cs);

    driver.set_fifo_wtm(0x02).unwrap();
    assert_eq!(probe.register(FIFO_WTM), 0x01);
    assert_eq!(other_probe.register(FIFO_WTM), 0x02);

    driver.interface_mut().set_spi(old_bus);
    driver.interface_mut().set_cs(old_cs);
    assert_eq!(driver.get_fifo_wtm().unwrap(), 0x01);
}

#[test]
fn test_read_one_shot_discards_unread_sample() {
    let (mut driver, interface) = create_mock_driver();
    let mut delay = MockDelay::new();

    // A sample nobody read is still latched in the outputs
    interface.set_output(4096 * 900, 1_000);
    interface.set_next_sample(4096 * 1000, 2_000);
    interface.set_conversion_polls(2);

    let measurement = driver.read_one_shot(&mut delay).unwrap();

    assert_float_eq(measurement.pressure_hpa, 1000.0, 0.5);
    assert_float_eq(measurement.temperature_c, 20.0, 0.001);
    assert_eq!(delay.calls, 2);
}

#[test]
fn test_read_one_shot_requires_one_shot_mode() {
    let (mut driver, interface) = create_mock_driver();
    let mut delay = MockDelay::new();

    driver.set_data_rate(25.0).unwrap();
    interface.clear_operations();

    assert_eq!(driver.read_one_shot(&mut delay), Err(Error::InvalidConfig));
    // Only CTRL_REG1 was read, no conversion was triggered
    assert_eq!(interface.write_count(), 0);
    assert_eq!(delay.calls, 0);
}
