//! STATUS register of the ADS131M04

use crate::config::Channel;

/// Flags from the STATUS register (0x01)
///
/// The device also returns this word in response to every NULL command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    raw: u16,
}

impl Status {
    /// Create status from raw register value
    #[must_use]
    pub const fn new(raw: u16) -> Self {
        Self { raw }
    }

    /// Get the raw register value
    #[must_use]
    pub const fn raw(&self) -> u16 {
        self.raw
    }

    /// LOCK: the interface is locked
    #[must_use]
    pub const fn locked(&self) -> bool {
        self.raw & 0x8000 != 0
    }

    /// `F_RESYNC`: the ADC channels were resynchronized
    #[must_use]
    pub const fn resync(&self) -> bool {
        self.raw & 0x4000 != 0
    }

    /// `REG_MAP`: the register map CRC changed since the last NULL read
    #[must_use]
    pub const fn register_map_changed(&self) -> bool {
        self.raw & 0x2000 != 0
    }

    /// `CRC_ERR`: the CRC of the last received frame did not match
    #[must_use]
    pub const fn crc_error(&self) -> bool {
        self.raw & 0x1000 != 0
    }

    /// RESET: the device was reset and the flag has not been cleared yet
    #[must_use]
    pub const fn reset(&self) -> bool {
        self.raw & 0x0400 != 0
    }

    /// WLENGTH: configured data word length code
    ///
    /// `0b01` selects the 24-bit words this driver frames.
    #[must_use]
    pub const fn word_length(&self) -> u8 {
        ((self.raw >> 8) & 0b11) as u8
    }

    /// DRDYn: a new conversion result is available on `channel`
    #[must_use]
    pub const fn data_ready(&self, channel: Channel) -> bool {
        self.raw & (1 << channel as u16) != 0
    }

    /// True when every channel has a new conversion result
    #[must_use]
    pub const fn all_data_ready(&self) -> bool {
        self.raw & 0x000F == 0x000F
    }
}

impl From<u16> for Status {
    fn from(raw: u16) -> Self {
        Self::new(raw)
    }
}
