//! Register map and register layouts for the ADS131M04.

use crate::config::Channel;

/// Register addresses for ADS131M04
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
#[repr(u8)]
pub enum Register {
    /// Device identification (read-only)
    Id = 0x00,
    /// Device status (read-only)
    Status = 0x01,
    /// Interface and data-ready mode
    Mode = 0x02,
    /// Channel enables, oversampling ratio and power mode
    Clock = 0x03,
    /// PGA gain of all four channels
    Gain = 0x04,
    /// Global chop and current-detect configuration
    Cfg = 0x06,
    /// Current-detect threshold MSB
    ThresholdMsb = 0x07,
    /// Current-detect threshold LSB and DC block filter
    ThresholdLsb = 0x08,

    /// Channel 0 configuration
    Ch0Cfg = 0x09,
    /// Channel 0 offset calibration MSB
    Ch0OcalMsb = 0x0A,
    /// Channel 0 offset calibration LSB
    Ch0OcalLsb = 0x0B,
    /// Channel 0 gain calibration MSB
    Ch0GcalMsb = 0x0C,
    /// Channel 0 gain calibration LSB
    Ch0GcalLsb = 0x0D,

    /// Channel 1 configuration
    Ch1Cfg = 0x0E,
    /// Channel 1 offset calibration MSB
    Ch1OcalMsb = 0x0F,
    /// Channel 1 offset calibration LSB
    Ch1OcalLsb = 0x10,
    /// Channel 1 gain calibration MSB
    Ch1GcalMsb = 0x11,
    /// Channel 1 gain calibration LSB
    Ch1GcalLsb = 0x12,

    /// Channel 2 configuration
    Ch2Cfg = 0x13,
    /// Channel 2 offset calibration MSB
    Ch2OcalMsb = 0x14,
    /// Channel 2 offset calibration LSB
    Ch2OcalLsb = 0x15,
    /// Channel 2 gain calibration MSB
    Ch2GcalMsb = 0x16,
    /// Channel 2 gain calibration LSB
    Ch2GcalLsb = 0x17,

    /// Channel 3 configuration
    Ch3Cfg = 0x18,
    /// Channel 3 offset calibration MSB
    Ch3OcalMsb = 0x19,
    /// Channel 3 offset calibration LSB
    Ch3OcalLsb = 0x1A,
    /// Channel 3 gain calibration MSB
    Ch3GcalMsb = 0x1B,
    /// Channel 3 gain calibration LSB
    Ch3GcalLsb = 0x1C,

    /// Register map CRC (read-only)
    RegmapCrc = 0x3E,
}

impl From<Register> for u8 {
    fn from(reg: Register) -> u8 {
        reg as u8
    }
}

impl Register {
    /// Configuration register of `channel`
    #[must_use]
    pub const fn channel_config(channel: Channel) -> Self {
        match channel {
            Channel::Ch0 => Self::Ch0Cfg,
            Channel::Ch1 => Self::Ch1Cfg,
            Channel::Ch2 => Self::Ch2Cfg,
            Channel::Ch3 => Self::Ch3Cfg,
        }
    }

    /// Offset calibration register pair (MSB, LSB) of `channel`
    #[must_use]
    pub const fn offset_calibration(channel: Channel) -> (Self, Self) {
        match channel {
            Channel::Ch0 => (Self::Ch0OcalMsb, Self::Ch0OcalLsb),
            Channel::Ch1 => (Self::Ch1OcalMsb, Self::Ch1OcalLsb),
            Channel::Ch2 => (Self::Ch2OcalMsb, Self::Ch2OcalLsb),
            Channel::Ch3 => (Self::Ch3OcalMsb, Self::Ch3OcalLsb),
        }
    }

    /// Gain calibration register pair (MSB, LSB) of `channel`
    #[must_use]
    pub const fn gain_calibration(channel: Channel) -> (Self, Self) {
        match channel {
            Channel::Ch0 => (Self::Ch0GcalMsb, Self::Ch0GcalLsb),
            Channel::Ch1 => (Self::Ch1GcalMsb, Self::Ch1GcalLsb),
            Channel::Ch2 => (Self::Ch2GcalMsb, Self::Ch2GcalLsb),
            Channel::Ch3 => (Self::Ch3GcalMsb, Self::Ch3GcalLsb),
        }
    }
}

/// Expected upper byte of the ID register
pub const ID_DEVICE: u8 = 0x24;

/// MODE: data-ready format bit
pub const MODE_DRDY_FMT_MASK: u16 = 0x0001;
/// MODE: data-ready source selection
pub const MODE_DRDY_SEL_MASK: u16 = 0x000C;
pub const MODE_DRDY_SEL_SHIFT: u16 = 2;

/// CLOCK: power mode field
pub const CLOCK_PWR_MASK: u16 = 0x0003;
/// CLOCK: oversampling ratio field
pub const CLOCK_OSR_MASK: u16 = 0x001C;
pub const CLOCK_OSR_SHIFT: u16 = 2;
/// CLOCK: channel 0 enable, channels 1..=3 follow in the next bits
pub const CLOCK_CH0_EN: u16 = 0x0100;

/// GAIN: width of one channel's gain field
pub const GAIN_FIELD_BITS: u16 = 4;
pub const GAIN_FIELD_MASK: u16 = 0x000F;

/// CFG: global chop enable
pub const CFG_GC_EN: u16 = 0x0100;
/// CFG: global chop delay field (bits 13..=15 are reserved)
pub const CFG_GC_DLY_MASK: u16 = 0x1E00;
pub const CFG_GC_DLY_SHIFT: u16 = 9;

/// CHn_CFG: input multiplexer field
pub const CH_CFG_MUX_MASK: u16 = 0x0003;

/// OCAL/GCAL LSB register: the low calibration byte lives in bits 15..=8
pub const CAL_LSB_MASK: u16 = 0xFF00;

bitfield::bitfield! {
    /// MODE
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct ModeRegister(u16);
    impl Debug;
    u8;
    /// Register map CRC enable
    pub reg_crc_en, _: 13;
    /// Input CRC enable
    pub rx_crc_en, _: 12;
    /// CRC type: `0` = CCITT, `1` = ANSI
    pub crc_type, _: 11;
    /// Reset has occurred; cleared by writing 0
    pub reset, _: 10;
    /// Data word length
    ///
    /// - `00` = 16 bit
    /// - `01` = 24 bit
    /// - `10` = 32 bit, LSB zero padding
    /// - `11` = 32 bit, MSB sign extension
    pub wlength, _: 9, 8;
    /// SPI timeout enable
    pub timeout, _: 4;
    /// Data-ready source selection
    pub drdy_sel, _: 3, 2;
    /// DRDY pin state when conversion data is not available
    pub drdy_hiz, _: 1;
    /// Data-ready format: `0` = logic low level, `1` = low pulse
    pub drdy_fmt, _: 0;
}

bitfield::bitfield! {
    /// CLOCK
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct ClockRegister(u16);
    impl Debug;
    u8;
    /// Channel 3 ADC enable
    pub ch3_en, _: 11;
    /// Channel 2 ADC enable
    pub ch2_en, _: 10;
    /// Channel 1 ADC enable
    pub ch1_en, _: 9;
    /// Channel 0 ADC enable
    pub ch0_en, _: 8;
    /// Oversampling ratio code
    pub osr, _: 4, 2;
    /// Power mode code
    pub pwr, _: 1, 0;
}

bitfield::bitfield! {
    /// GAIN
    ///
    /// One 4-bit field per channel, channel 0 in the low nibble. The device
    /// uses the low three bits of each field as the PGA gain code.
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct GainRegister(u16);
    impl Debug;
    u8;
    /// Channel 3 gain field
    pub pgagain3, set_pgagain3: 15, 12;
    /// Channel 2 gain field
    pub pgagain2, set_pgagain2: 11, 8;
    /// Channel 1 gain field
    pub pgagain1, set_pgagain1: 7, 4;
    /// Channel 0 gain field
    pub pgagain0, set_pgagain0: 3, 0;
}

impl GainRegister {
    /// Gain field of `channel`
    #[must_use]
    pub fn channel(&self, channel: Channel) -> u8 {
        match channel {
            Channel::Ch0 => self.pgagain0(),
            Channel::Ch1 => self.pgagain1(),
            Channel::Ch2 => self.pgagain2(),
            Channel::Ch3 => self.pgagain3(),
        }
    }
}

bitfield::bitfield! {
    /// CFG
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct ConfigRegister(u16);
    impl Debug;
    u8;
    /// Global chop delay: `2^(gc_dly + 1)` modulator clock periods
    pub gc_dly, _: 12, 9;
    /// Global chop enable
    pub gc_en, _: 8;
    /// Current-detect channels: `0` = any channel, `1` = all channels
    pub cd_allch, _: 7;
    /// Number of current-detect exceeded thresholds to trigger detection
    pub cd_num, _: 6, 4;
    /// Current-detect measurement length
    pub cd_len, _: 3, 1;
    /// Current-detect mode enable
    pub cd_en, _: 0;
}

bitfield::bitfield! {
    /// CHn_CFG
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct ChannelConfigRegister(u16);
    impl Debug;
    u16;
    /// Phase delay in modulator clock cycles (10-bit two's complement)
    pub phase, _: 15, 6;
    /// DC block filter disable
    pub dcblk_dis, _: 2;
    /// Input multiplexer selection
    pub mux, _: 1, 0;
}

macro_rules! impl_raw_conversions {
    ($($name:ident),* $(,)?) => {
        $(
            impl From<u16> for $name {
                fn from(raw: u16) -> Self {
                    Self(raw)
                }
            }

            impl From<$name> for u16 {
                fn from(reg: $name) -> u16 {
                    reg.0
                }
            }
        )*
    };
}

impl_raw_conversions!(
    ModeRegister,
    ClockRegister,
    GainRegister,
    ConfigRegister,
    ChannelConfigRegister,
);
