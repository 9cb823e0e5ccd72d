/// Error type for ADS131M04 operations
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error on the SPI bus
    Communication(E),
    /// The data-ready input pin could not be read
    DataReadyPin,
    /// The ID register does not identify an ADS131M04 (contains the value read)
    InvalidDevice(u16),
    /// The device did not acknowledge a register write; the new value is not applied
    WriteNotAcknowledged {
        /// Acknowledgement word the write should have produced
        expected: u16,
        /// Response word the device actually returned
        received: u16,
    },
    /// The device answered a command with an unexpected response word
    UnexpectedResponse(u16),
    /// A setting or channel argument is outside its valid range
    InvalidParameter,
}
