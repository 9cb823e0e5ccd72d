//! Test helpers shared by the integration tests

#![allow(dead_code, unused_imports)]

pub mod simulated_device;

use embedded_hal::delay::DelayNs;

pub use simulated_device::SimulatedAdc;

/// Bytes in one six-word frame
pub const FRAME_BYTES: usize = 18;

/// Delay provider that returns immediately
pub struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// Transmit bytes of a frame carrying `command` and an optional data word
pub fn command_frame(command: u16, data: Option<u16>) -> Vec<u8> {
    let mut frame = vec![0u8; FRAME_BYTES];
    frame[..2].copy_from_slice(&command.to_be_bytes());
    if let Some(data) = data {
        frame[3..5].copy_from_slice(&data.to_be_bytes());
    }
    frame
}

/// Receive bytes of a frame with a response word and four raw 24-bit samples
pub fn response_frame(response: u16, samples: [u32; 4]) -> Vec<u8> {
    let mut frame = vec![0u8; FRAME_BYTES];
    frame[..2].copy_from_slice(&response.to_be_bytes());
    for (channel, sample) in samples.iter().enumerate() {
        let offset = 3 * (channel + 1);
        frame[offset..offset + 3].copy_from_slice(&sample.to_be_bytes()[1..]);
    }
    frame
}
