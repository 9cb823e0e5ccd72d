//! Typed device settings
//!
//! Discriminants are the codes the device expects in the corresponding
//! register fields.

/// ADC input channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Channel {
    /// Channel 0
    Ch0 = 0,
    /// Channel 1
    Ch1 = 1,
    /// Channel 2
    Ch2 = 2,
    /// Channel 3
    Ch3 = 3,
}

impl Channel {
    /// All channels in physical order
    pub const ALL: [Channel; 4] = [Channel::Ch0, Channel::Ch1, Channel::Ch2, Channel::Ch3];

    /// Zero-based channel index
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for Channel {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Channel::Ch0),
            1 => Ok(Channel::Ch1),
            2 => Ok(Channel::Ch2),
            3 => Ok(Channel::Ch3),
            other => Err(other),
        }
    }
}

/// Programmable gain amplifier setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Gain {
    /// Gain of 1
    #[default]
    X1 = 0b000,
    /// Gain of 2
    X2 = 0b001,
    /// Gain of 4
    X4 = 0b010,
    /// Gain of 8
    X8 = 0b011,
    /// Gain of 16
    X16 = 0b100,
    /// Gain of 32
    X32 = 0b101,
    /// Gain of 64
    X64 = 0b110,
    /// Gain of 128
    X128 = 0b111,
}

impl Gain {
    /// Decode the PGA code found in a GAIN register field
    ///
    /// Only the low three bits select the gain; the fourth bit of the
    /// field is reserved.
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code & 0b111 {
            0b000 => Gain::X1,
            0b001 => Gain::X2,
            0b010 => Gain::X4,
            0b011 => Gain::X8,
            0b100 => Gain::X16,
            0b101 => Gain::X32,
            0b110 => Gain::X64,
            _ => Gain::X128,
        }
    }

    /// Amplification factor
    #[must_use]
    pub fn factor(self) -> f32 {
        f32::from(1u8 << (self as u8))
    }
}

/// Oversampling ratio (CLOCK.OSR)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum OversamplingRatio {
    /// OSR = 128
    Osr128 = 0b000,
    /// OSR = 256
    Osr256 = 0b001,
    /// OSR = 512
    Osr512 = 0b010,
    /// OSR = 1024 (power-on default)
    #[default]
    Osr1024 = 0b011,
    /// OSR = 2048
    Osr2048 = 0b100,
    /// OSR = 4096
    Osr4096 = 0b101,
    /// OSR = 8192
    Osr8192 = 0b110,
    /// OSR = 16256
    Osr16256 = 0b111,
}

impl OversamplingRatio {
    /// Look up the setting for a numeric ratio
    ///
    /// Returns `None` for ratios the device does not support.
    #[must_use]
    pub const fn from_ratio(ratio: u16) -> Option<Self> {
        match ratio {
            128 => Some(Self::Osr128),
            256 => Some(Self::Osr256),
            512 => Some(Self::Osr512),
            1024 => Some(Self::Osr1024),
            2048 => Some(Self::Osr2048),
            4096 => Some(Self::Osr4096),
            8192 => Some(Self::Osr8192),
            16256 => Some(Self::Osr16256),
            _ => None,
        }
    }
}

/// Power mode (CLOCK.PWR)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PowerMode {
    /// Very-low-power
    VeryLowPower = 0b00,
    /// Low-power
    LowPower = 0b01,
    /// High-resolution (power-on default)
    #[default]
    HighResolution = 0b10,
}

/// Channel input multiplexer (CHn_CFG.MUX)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum InputMux {
    /// AINxP and AINxN (power-on default)
    #[default]
    Normal = 0b00,
    /// Inputs shorted together
    Shorted = 0b01,
    /// Positive DC test signal
    PositiveTest = 0b10,
    /// Negative DC test signal
    NegativeTest = 0b11,
}

/// Shape of the data-ready signal (MODE.DRDY_FMT)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DataReadyFormat {
    /// Logic low while data is available (power-on default)
    #[default]
    Level = 0,
    /// Fixed-width low pulse
    Pulse = 1,
}

/// Conversion that drives the data-ready signal (MODE.DRDY_SEL)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DataReadySource {
    /// Most lagging enabled channel (power-on default)
    #[default]
    MostLagging = 0b00,
    /// Logic OR of all enabled channels
    AnyChannel = 0b01,
    /// Most leading enabled channel
    MostLeading = 0b10,
}
