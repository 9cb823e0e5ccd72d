//! Blocking driver for the ADS131M04 four-channel delta-sigma ADC

use embedded_hal::{
    delay::DelayNs,
    digital::InputPin,
    spi::{MODE_1, Mode, SpiDevice},
};

use crate::{
    config::{
        Channel, DataReadyFormat, DataReadySource, Gain, InputMux, OversamplingRatio, PowerMode,
    },
    conversion,
    error::Error,
    frame::{self, Command, FRAME_BYTES, Frame},
    register::{
        CAL_LSB_MASK, CFG_GC_DLY_MASK, CFG_GC_DLY_SHIFT, CFG_GC_EN, CH_CFG_MUX_MASK,
        CLOCK_CH0_EN, CLOCK_OSR_MASK, CLOCK_OSR_SHIFT, CLOCK_PWR_MASK, ChannelConfigRegister,
        ClockRegister, ConfigRegister, GAIN_FIELD_BITS, GAIN_FIELD_MASK, GainRegister, ID_DEVICE,
        MODE_DRDY_FMT_MASK, MODE_DRDY_SEL_MASK, MODE_DRDY_SEL_SHIFT, ModeRegister, Register,
    },
    status::Status,
};

/// SPI mode required by the device (CPOL = 0, CPHA = 1)
pub const SPI_MODE: Mode = MODE_1;

/// Highest SPI clock frequency the device supports
pub const SPI_FREQUENCY_HZ: u32 = 25_000_000;

/// Time the device needs after a RESET command before it answers frames
const RESET_SETTLE_US: u32 = 10;

/// Largest code accepted by a GAIN register field
const GAIN_CODE_MAX: u8 = 0x0F;

/// Valid `log2` range of the global chop delay
const CHOP_LOG2_DELAY_MIN: u8 = 1;
const CHOP_LOG2_DELAY_MAX: u8 = 16;

/// Range of the 24-bit signed offset calibration
const OFFSET_CAL_MIN: i32 = -0x80_0000;
const OFFSET_CAL_MAX: i32 = 0x7F_FFFF;

/// Largest 24-bit unsigned gain calibration
const GAIN_CAL_MAX: u32 = 0xFF_FFFF;

/// Marker for a driver built without a data-ready pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NoDataReady;

/// ADS131M04 driver instance (blocking)
///
/// Every operation runs whole frames through the [`SpiDevice`], which keeps
/// chip select asserted and the bus owned for the duration of each frame.
/// Configuration lives in the device; the driver keeps no copy of it.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ads131m04<SPI, DRDY = NoDataReady> {
    spi: SPI,
    drdy: DRDY,
}

impl<SPI, E> Ads131m04<SPI>
where
    SPI: SpiDevice<u8, Error = E>,
{
    /// Create a new ADS131M04 driver instance without a data-ready pin
    ///
    /// Data availability is then read from the STATUS register.
    pub fn new(spi: SPI) -> Self {
        Self {
            spi,
            drdy: NoDataReady,
        }
    }
}

impl<SPI, DRDY, E> Ads131m04<SPI, DRDY>
where
    SPI: SpiDevice<u8, Error = E>,
    DRDY: InputPin,
{
    /// Create a new ADS131M04 driver instance with the DRDY pin attached
    pub fn with_data_ready(spi: SPI, drdy: DRDY) -> Self {
        Self { spi, drdy }
    }

    /// Sample the DRDY line
    ///
    /// The line is active low: `true` means a new conversion is available.
    /// This is a single read; it never waits for the line to change.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataReadyPin`] if the pin cannot be read
    pub fn data_ready_line(&mut self) -> Result<bool, Error<E>> {
        self.drdy.is_low().map_err(|_| Error::DataReadyPin)
    }
}

impl<SPI, DRDY, E> Ads131m04<SPI, DRDY>
where
    SPI: SpiDevice<u8, Error = E>,
{
    /// Release the SPI bus, consuming the driver
    pub fn release(self) -> SPI {
        self.spi
    }

    /// Release the SPI bus and the data-ready pin, consuming the driver
    pub fn release_all(self) -> (SPI, DRDY) {
        (self.spi, self.drdy)
    }

    fn transfer_frame(&mut self, command: u16, data: Option<u16>) -> Result<Frame, Error<E>> {
        let tx = frame::encode(command, data);
        let mut rx = [0u8; FRAME_BYTES];

        #[cfg(feature = "defmt")]
        defmt::trace!("Frame command: 0x{:04X}", command);

        self.spi
            .transfer(&mut rx, &tx)
            .map_err(Error::Communication)?;

        let frame = Frame::from_bytes(&rx);

        #[cfg(feature = "defmt")]
        defmt::trace!("Frame response: 0x{:04X}", frame.response());

        Ok(frame)
    }

    /// Exchange one six-word frame carrying `command`
    ///
    /// The returned frame holds the device's response to the *previous*
    /// command, the four channel words and the CRC word.
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails
    pub fn exchange_frame(&mut self, command: Command) -> Result<Frame, Error<E>> {
        self.transfer_frame(command.word(), None)
    }

    /// Read a register from the ADS131M04
    ///
    /// This follows the command-response protocol:
    /// - Frame 1: Send RREG command, ignore response
    /// - Frame 2: Send NULL, receive register contents in the response word
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails
    pub fn read_register(&mut self, register: Register) -> Result<u16, Error<E>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("Reading register 0x{:02X}", u8::from(register));

        self.exchange_frame(Command::Read(register))?;
        let value = self.exchange_frame(Command::Null)?.response();

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "Register 0x{:02X} value: 0x{:04X}",
            u8::from(register),
            value
        );

        Ok(value)
    }

    /// Write a register to the ADS131M04
    ///
    /// This follows the write protocol:
    /// - Frame 1: Send WREG command with the data word
    /// - Frame 2: Send NULL, receive the write acknowledgement
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - SPI communication fails
    /// - The acknowledgement does not match the write; the value is then not applied
    pub fn write_register(&mut self, register: Register, value: u16) -> Result<(), Error<E>> {
        let command = Command::Write(register);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "Writing 0x{:04X} to register 0x{:02X}",
            value,
            u8::from(register)
        );

        self.transfer_frame(command.word(), Some(value))?;
        self.verify_response(command)
    }

    /// Read-modify-write the bits of `register` selected by `mask`
    ///
    /// `data` is expected already shifted into the mask's position; bits of
    /// `data` outside `mask` are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails or the write is not acknowledged
    pub fn write_register_masked(
        &mut self,
        register: Register,
        data: u16,
        mask: u16,
    ) -> Result<(), Error<E>> {
        let current = self.read_register(register)?;
        let value = (current & !mask) | (data & mask);
        self.write_register(register, value)
    }

    /// Exchange a NULL frame and check that the device answered `command`
    fn verify_response(&mut self, command: Command) -> Result<(), Error<E>> {
        let received = self.exchange_frame(Command::Null)?.response();
        let Some(expected) = command.acknowledgement() else {
            return Ok(());
        };

        if received == expected {
            return Ok(());
        }

        #[cfg(feature = "defmt")]
        defmt::warn!(
            "Unexpected response 0x{:04X}, expected 0x{:04X}",
            received,
            expected
        );

        match command {
            Command::Write(_) => Err(Error::WriteNotAcknowledged { expected, received }),
            _ => Err(Error::UnexpectedResponse(received)),
        }
    }

    /// Read the ID register and check it identifies an ADS131M04
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDevice`] if the upper byte is not `0x24`, or an
    /// error if SPI communication fails
    pub fn read_id(&mut self) -> Result<u16, Error<E>> {
        let id = self.read_register(Register::Id)?;
        if id.to_be_bytes()[0] != ID_DEVICE {
            #[cfg(feature = "defmt")]
            defmt::warn!("Unexpected device ID: 0x{:04X}", id);
            return Err(Error::InvalidDevice(id));
        }
        Ok(id)
    }

    /// Verify the device is present and answering
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDevice`] on an ID mismatch, or an error if SPI
    /// communication fails
    pub fn init(&mut self) -> Result<(), Error<E>> {
        let _id = self.read_id()?;

        #[cfg(feature = "defmt")]
        defmt::debug!("ADS131M04 detected, ID 0x{:04X}", _id);

        Ok(())
    }

    /// Reset the device and wait for it to come back
    ///
    /// All registers return to their power-on defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedResponse`] if the device does not answer with
    /// the reset acknowledgement, or an error if SPI communication fails
    pub fn reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<E>> {
        self.exchange_frame(Command::Reset)?;
        delay.delay_us(RESET_SETTLE_US);
        self.verify_response(Command::Reset)
    }

    /// Put the device into standby mode
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails or the command is not echoed
    pub fn standby(&mut self) -> Result<(), Error<E>> {
        self.command(Command::Standby)
    }

    /// Wake the device from standby mode
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails or the command is not echoed
    pub fn wakeup(&mut self) -> Result<(), Error<E>> {
        self.command(Command::Wakeup)
    }

    /// Lock the interface; only NULL, RREG and UNLOCK are accepted afterwards
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails or the command is not echoed
    pub fn lock(&mut self) -> Result<(), Error<E>> {
        self.command(Command::Lock)
    }

    /// Unlock the interface
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails or the command is not echoed
    pub fn unlock(&mut self) -> Result<(), Error<E>> {
        self.command(Command::Unlock)
    }

    fn command(&mut self, command: Command) -> Result<(), Error<E>> {
        self.exchange_frame(command)?;
        self.verify_response(command)
    }

    /// Get the STATUS register
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails
    pub fn status(&mut self) -> Result<Status, Error<E>> {
        self.read_register(Register::Status).map(Status::new)
    }

    /// Check the STATUS register for a new conversion result on `channel`
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails
    pub fn is_data_ready(&mut self, channel: Channel) -> Result<bool, Error<E>> {
        self.status().map(|status| status.data_ready(channel))
    }

    /// Get the MODE register
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails
    pub fn mode(&mut self) -> Result<ModeRegister, Error<E>> {
        self.read_register(Register::Mode).map(ModeRegister)
    }

    /// Get the CLOCK register
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails
    pub fn clock(&mut self) -> Result<ClockRegister, Error<E>> {
        self.read_register(Register::Clock).map(ClockRegister)
    }

    /// Get the GAIN register
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails
    pub fn gain(&mut self) -> Result<GainRegister, Error<E>> {
        self.read_register(Register::Gain).map(GainRegister)
    }

    /// Get the CFG register
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails
    pub fn config(&mut self) -> Result<ConfigRegister, Error<E>> {
        self.read_register(Register::Cfg).map(ConfigRegister)
    }

    /// Get the configuration register of `channel`
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails
    pub fn channel_config(&mut self, channel: Channel) -> Result<ChannelConfigRegister, Error<E>> {
        self.read_register(Register::channel_config(channel))
            .map(ChannelConfigRegister)
    }

    /// Write the raw gain codes of all four channels
    ///
    /// `codes[0]` lands in the low nibble of the GAIN register. The codes are
    /// written verbatim, use [`Gain`] values for the PGA settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if a code does not fit a 4-bit field
    /// (nothing is sent), or an error if the write fails
    pub fn set_gain(&mut self, codes: [u8; 4]) -> Result<(), Error<E>> {
        if codes.iter().any(|&code| code > GAIN_CODE_MAX) {
            return Err(Error::InvalidParameter);
        }

        let mut gain = GainRegister(0);
        gain.set_pgagain0(codes[0]);
        gain.set_pgagain1(codes[1]);
        gain.set_pgagain2(codes[2]);
        gain.set_pgagain3(codes[3]);

        self.write_register(Register::Gain, gain.0)
    }

    /// Set the PGA gain of a single channel
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails or the write is not acknowledged
    pub fn set_channel_gain(&mut self, channel: Channel, gain: Gain) -> Result<(), Error<E>> {
        let shift = GAIN_FIELD_BITS * channel as u16;
        self.write_register_masked(
            Register::Gain,
            u16::from(gain as u8) << shift,
            GAIN_FIELD_MASK << shift,
        )
    }

    /// Configure global chop
    ///
    /// `log2_delay` selects a delay of `2^log2_delay` modulator clock periods
    /// after each chop transition, from 2 to 65536.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `log2_delay` is outside `1..=16`
    /// (nothing is sent), or an error if the write fails
    pub fn global_chop(&mut self, enabled: bool, log2_delay: u8) -> Result<(), Error<E>> {
        if !(CHOP_LOG2_DELAY_MIN..=CHOP_LOG2_DELAY_MAX).contains(&log2_delay) {
            return Err(Error::InvalidParameter);
        }

        let delay = u16::from(log2_delay - 1) << CFG_GC_DLY_SHIFT;
        let enable = if enabled { CFG_GC_EN } else { 0 };

        self.write_register_masked(Register::Cfg, delay | enable, CFG_GC_DLY_MASK | CFG_GC_EN)
    }

    /// Set the oversampling ratio of all channels
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails or the write is not acknowledged
    pub fn set_oversampling_ratio(&mut self, osr: OversamplingRatio) -> Result<(), Error<E>> {
        self.write_register_masked(
            Register::Clock,
            u16::from(osr as u8) << CLOCK_OSR_SHIFT,
            CLOCK_OSR_MASK,
        )
    }

    /// Set the power mode
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails or the write is not acknowledged
    pub fn set_power_mode(&mut self, mode: PowerMode) -> Result<(), Error<E>> {
        self.write_register_masked(Register::Clock, u16::from(mode as u8), CLOCK_PWR_MASK)
    }

    /// Enable or disable the ADC of `channel`
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails or the write is not acknowledged
    pub fn set_channel_enabled(&mut self, channel: Channel, enabled: bool) -> Result<(), Error<E>> {
        let bit = CLOCK_CH0_EN << channel as u16;
        self.write_register_masked(Register::Clock, if enabled { bit } else { 0 }, bit)
    }

    /// Select the input of `channel`
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails or the write is not acknowledged
    pub fn set_input_mux(&mut self, channel: Channel, mux: InputMux) -> Result<(), Error<E>> {
        self.write_register_masked(
            Register::channel_config(channel),
            u16::from(mux as u8),
            CH_CFG_MUX_MASK,
        )
    }

    /// Select the shape of the data-ready signal
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails or the write is not acknowledged
    pub fn set_data_ready_format(&mut self, format: DataReadyFormat) -> Result<(), Error<E>> {
        self.write_register_masked(Register::Mode, u16::from(format as u8), MODE_DRDY_FMT_MASK)
    }

    /// Select which channel conversion drives the data-ready signal
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails or the write is not acknowledged
    pub fn set_data_ready_source(&mut self, source: DataReadySource) -> Result<(), Error<E>> {
        self.write_register_masked(
            Register::Mode,
            u16::from(source as u8) << MODE_DRDY_SEL_SHIFT,
            MODE_DRDY_SEL_MASK,
        )
    }

    /// Write the 24-bit signed offset calibration of `channel`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `offset` does not fit 24 bits
    /// (nothing is sent), or an error if a write fails
    #[allow(clippy::cast_sign_loss)]
    pub fn set_offset_calibration(
        &mut self,
        channel: Channel,
        offset: i32,
    ) -> Result<(), Error<E>> {
        if !(OFFSET_CAL_MIN..=OFFSET_CAL_MAX).contains(&offset) {
            return Err(Error::InvalidParameter);
        }

        let (msb, lsb) = Register::offset_calibration(channel);
        self.write_calibration(msb, lsb, offset as u32)
    }

    /// Write the 24-bit unsigned gain calibration of `channel`
    ///
    /// `0x80_0000` is a gain of exactly 1.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `gain` does not fit 24 bits
    /// (nothing is sent), or an error if a write fails
    pub fn set_gain_calibration(&mut self, channel: Channel, gain: u32) -> Result<(), Error<E>> {
        if gain > GAIN_CAL_MAX {
            return Err(Error::InvalidParameter);
        }

        let (msb, lsb) = Register::gain_calibration(channel);
        self.write_calibration(msb, lsb, gain)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn write_calibration(
        &mut self,
        msb: Register,
        lsb: Register,
        value: u32,
    ) -> Result<(), Error<E>> {
        self.write_register(msb, (value >> 8) as u16)?;
        self.write_register_masked(lsb, ((value & 0xFF) << 8) as u16, CAL_LSB_MASK)
    }

    /// Read one frame of conversion data
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails
    pub fn read_frame(&mut self) -> Result<Frame, Error<E>> {
        self.exchange_frame(Command::Null)
    }

    /// Read the conversion results of all four channels
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails
    pub fn read_all(&mut self) -> Result<[i32; 4], Error<E>> {
        self.read_frame().map(|frame| frame.samples())
    }

    /// Read the conversion results of `channels`, in the order given
    ///
    /// All values come from the same frame, so they are sampled simultaneously.
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails
    pub fn read_channels<const N: usize>(
        &mut self,
        channels: [Channel; N],
    ) -> Result<[i32; N], Error<E>> {
        let frame = self.read_frame()?;
        Ok(channels.map(|channel| frame.sample(channel)))
    }

    /// Read the conversion result of a single channel
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails
    pub fn read_single_channel(&mut self, channel: Channel) -> Result<i32, Error<E>> {
        self.read_frame().map(|frame| frame.sample(channel))
    }

    /// Read the input voltage of `channel` in volts
    ///
    /// The channel's PGA gain is read from the device first, so the
    /// full-scale range always matches the current configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails
    pub fn read_voltage(&mut self, channel: Channel) -> Result<f32, Error<E>> {
        let gain = Gain::from_code(self.gain()?.channel(channel));
        let code = self.read_single_channel(channel)?;
        Ok(conversion::code_to_voltage(code, gain))
    }
}
