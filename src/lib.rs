#![no_std]
#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

mod config;
pub mod conversion;
mod driver;
mod error;
mod frame;
mod register;
mod status;
mod utils;

pub use config::{
    Channel, DataReadyFormat, DataReadySource, Gain, InputMux, OversamplingRatio, PowerMode,
};
pub use driver::{Ads131m04, NoDataReady, SPI_FREQUENCY_HZ, SPI_MODE};
pub use error::Error;
pub use frame::{Command, FRAME_BYTES, Frame, RESET_RESPONSE};
pub use register::{
    ChannelConfigRegister, ClockRegister, ConfigRegister, GainRegister, ModeRegister, Register,
};
pub use status::Status;
