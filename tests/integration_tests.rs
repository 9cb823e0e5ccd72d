//! Integration tests for the ADS131M04 driver using mocked SPI.

mod common;

use ads131m04::{Ads131m04, Channel, Error, Register};
use common::{NoDelay, command_frame, response_frame};
use embedded_hal_mock::eh1::{
    digital::{Mock as PinMock, State as PinState, Transaction as PinTransaction},
    spi::{Mock as SpiMock, Transaction as SpiTransaction},
};

/// One frame: chip select asserted, 18 bytes exchanged, chip select released
fn frame(tx: Vec<u8>, rx: Vec<u8>) -> [SpiTransaction<u8>; 3] {
    [
        SpiTransaction::transaction_start(),
        SpiTransaction::transfer(tx, rx),
        SpiTransaction::transaction_end(),
    ]
}

fn idle() -> Vec<u8> {
    response_frame(0x0000, [0; 4])
}

#[test]
fn reads_id_register() {
    let mut expectations = Vec::new();
    // Frame 1: RREG for ID (0x00), response ignored
    expectations.extend(frame(command_frame(0xA000, None), idle()));
    // Frame 2: NULL, register contents in the response word
    expectations.extend(frame(
        command_frame(0x0000, None),
        response_frame(0x2403, [0; 4]),
    ));

    let spi = SpiMock::new(&expectations);
    let mut adc = Ads131m04::new(spi);

    assert_eq!(adc.read_id().unwrap(), 0x2403);

    adc.release().done();
}

#[test]
fn rejects_unknown_device_id() {
    let mut expectations = Vec::new();
    expectations.extend(frame(command_frame(0xA000, None), idle()));
    expectations.extend(frame(command_frame(0x0000, None), idle()));

    let spi = SpiMock::new(&expectations);
    let mut adc = Ads131m04::new(spi);

    assert_eq!(adc.init(), Err(Error::InvalidDevice(0x0000)));

    adc.release().done();
}

#[test]
fn writes_register_and_checks_acknowledgement() {
    let mut expectations = Vec::new();
    // Frame 1: WREG for GAIN (0x04) with the data word in slot 1
    expectations.extend(frame(command_frame(0x6200, Some(0x8421)), idle()));
    // Frame 2: NULL, acknowledgement 0x4000 | 0x04 << 7
    expectations.extend(frame(
        command_frame(0x0000, None),
        response_frame(0x4200, [0; 4]),
    ));

    let spi = SpiMock::new(&expectations);
    let mut adc = Ads131m04::new(spi);

    adc.write_register(Register::Gain, 0x8421).unwrap();

    adc.release().done();
}

#[test]
fn reports_unacknowledged_write() {
    let mut expectations = Vec::new();
    expectations.extend(frame(command_frame(0x6100, Some(0x0512)), idle()));
    expectations.extend(frame(
        command_frame(0x0000, None),
        response_frame(0x0500, [0; 4]),
    ));

    let spi = SpiMock::new(&expectations);
    let mut adc = Ads131m04::new(spi);

    assert_eq!(
        adc.write_register(Register::Mode, 0x0512),
        Err(Error::WriteNotAcknowledged {
            expected: 0x4100,
            received: 0x0500,
        })
    );

    adc.release().done();
}

#[test]
fn masked_write_preserves_other_bits() {
    let mut expectations = Vec::new();
    // Read CLOCK (0x03): 0x0F0E
    expectations.extend(frame(command_frame(0xA180, None), idle()));
    expectations.extend(frame(
        command_frame(0x0000, None),
        response_frame(0x0F0E, [0; 4]),
    ));
    // Write back with the OSR field replaced by 0b101
    expectations.extend(frame(command_frame(0x6180, Some(0x0F16)), idle()));
    expectations.extend(frame(
        command_frame(0x0000, None),
        response_frame(0x4180, [0; 4]),
    ));

    let spi = SpiMock::new(&expectations);
    let mut adc = Ads131m04::new(spi);

    adc.write_register_masked(Register::Clock, 0b101 << 2, 0x001C)
        .unwrap();

    adc.release().done();
}

#[test]
fn decodes_channel_samples() {
    let expectations = frame(
        command_frame(0x0000, None),
        response_frame(0x050F, [0x80_0000, 0x7F_FFFF, 0xFF_FFFF, 0x00_0000]),
    );

    let spi = SpiMock::new(&expectations);
    let mut adc = Ads131m04::new(spi);

    assert_eq!(adc.read_all().unwrap(), [-8_388_608, 8_388_607, -1, 0]);

    adc.release().done();
}

#[test]
fn returns_channels_in_requested_order() {
    let expectations = frame(
        command_frame(0x0000, None),
        response_frame(0x050F, [0x00_0010, 0x00_0020, 0xFF_FFF0, 0x00_0040]),
    );

    let spi = SpiMock::new(&expectations);
    let mut adc = Ads131m04::new(spi);

    let values = adc
        .read_channels([Channel::Ch3, Channel::Ch0, Channel::Ch2])
        .unwrap();
    assert_eq!(values, [0x40, 0x10, -16]);

    adc.release().done();
}

#[test]
fn reads_status_data_ready_bits() {
    let mut expectations = Vec::new();
    expectations.extend(frame(command_frame(0xA080, None), idle()));
    expectations.extend(frame(
        command_frame(0x0000, None),
        response_frame(0x0502, [0; 4]),
    ));

    let spi = SpiMock::new(&expectations);
    let mut adc = Ads131m04::new(spi);

    let status = adc.status().unwrap();
    assert!(status.data_ready(Channel::Ch1));
    assert!(!status.data_ready(Channel::Ch0));
    assert_eq!(status.word_length(), 0b01);

    adc.release().done();
}

#[test]
fn samples_data_ready_line() {
    let spi = SpiMock::<u8>::new(&[]);
    let pin = PinMock::new(&[
        PinTransaction::get(PinState::High),
        PinTransaction::get(PinState::Low),
    ]);
    let mut adc = Ads131m04::with_data_ready(spi, pin);

    assert!(!adc.data_ready_line().unwrap());
    assert!(adc.data_ready_line().unwrap());

    let (mut spi, mut pin) = adc.release_all();
    spi.done();
    pin.done();
}

#[test]
fn lock_checks_echoed_command() {
    let mut expectations = Vec::new();
    expectations.extend(frame(command_frame(0x0555, None), idle()));
    expectations.extend(frame(
        command_frame(0x0000, None),
        response_frame(0x0555, [0; 4]),
    ));
    expectations.extend(frame(command_frame(0x0655, None), idle()));
    expectations.extend(frame(
        command_frame(0x0000, None),
        response_frame(0x8500, [0; 4]),
    ));

    let spi = SpiMock::new(&expectations);
    let mut adc = Ads131m04::new(spi);

    adc.lock().unwrap();
    assert_eq!(adc.unlock(), Err(Error::UnexpectedResponse(0x8500)));

    adc.release().done();
}

#[test]
fn reset_accepts_acknowledgement() {
    let mut expectations = Vec::new();
    expectations.extend(frame(command_frame(0x0011, None), idle()));
    expectations.extend(frame(
        command_frame(0x0000, None),
        response_frame(0xFF24, [0; 4]),
    ));

    let spi = SpiMock::new(&expectations);
    let mut adc = Ads131m04::new(spi);

    adc.reset(&mut NoDelay).unwrap();

    adc.release().done();
}

#[test]
fn reset_reports_unexpected_response() {
    let mut expectations = Vec::new();
    expectations.extend(frame(command_frame(0x0011, None), idle()));
    // Device still answering from before the reset
    expectations.extend(frame(
        command_frame(0x0000, None),
        response_frame(0x0500, [0; 4]),
    ));

    let spi = SpiMock::new(&expectations);
    let mut adc = Ads131m04::new(spi);

    assert_eq!(
        adc.reset(&mut NoDelay),
        Err(Error::UnexpectedResponse(0x0500))
    );

    adc.release().done();
}
