//! Command words and the six-word SPI frame

use crate::{config::Channel, register::Register, utils};

/// Bytes per frame word (24-bit word length)
pub const WORD_BYTES: usize = 3;
/// Words per frame: response, four channels, CRC
pub const FRAME_WORDS: usize = 6;
/// Bytes clocked per frame
pub const FRAME_BYTES: usize = WORD_BYTES * FRAME_WORDS;

const OPCODE_NULL: u16 = 0x0000;
const OPCODE_RESET: u16 = 0x0011;
const OPCODE_STANDBY: u16 = 0x0022;
const OPCODE_WAKEUP: u16 = 0x0033;
const OPCODE_LOCK: u16 = 0x0555;
const OPCODE_UNLOCK: u16 = 0x0655;
const OPCODE_READ: u16 = 0xA000;
const OPCODE_WRITE: u16 = 0x6000;
const OPCODE_WRITE_ACK: u16 = 0x4000;

const ADDRESS_SHIFT: u16 = 7;

/// Response word following a RESET command on a four-channel device
pub const RESET_RESPONSE: u16 = 0xFF24;

/// Command sent in the first word of a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// No operation; the next response carries STATUS
    Null,
    /// Reset the device
    Reset,
    /// Enter standby mode
    Standby,
    /// Leave standby mode
    Wakeup,
    /// Lock the interface against all commands except NULL, RREG and UNLOCK
    Lock,
    /// Unlock the interface
    Unlock,
    /// Read one register
    Read(Register),
    /// Write one register
    Write(Register),
}

impl Command {
    /// Encoded 16-bit command word
    #[must_use]
    pub fn word(self) -> u16 {
        match self {
            Command::Null => OPCODE_NULL,
            Command::Reset => OPCODE_RESET,
            Command::Standby => OPCODE_STANDBY,
            Command::Wakeup => OPCODE_WAKEUP,
            Command::Lock => OPCODE_LOCK,
            Command::Unlock => OPCODE_UNLOCK,
            Command::Read(register) => OPCODE_READ | address_bits(register),
            Command::Write(register) => OPCODE_WRITE | address_bits(register),
        }
    }

    /// Response word the device returns in the frame after this command
    ///
    /// `None` when the response carries data (NULL returns STATUS, a read
    /// returns the register contents).
    #[must_use]
    pub fn acknowledgement(self) -> Option<u16> {
        match self {
            Command::Null | Command::Read(_) => None,
            Command::Reset => Some(RESET_RESPONSE),
            Command::Standby | Command::Wakeup | Command::Lock | Command::Unlock => {
                Some(self.word())
            }
            Command::Write(register) => Some(OPCODE_WRITE_ACK | address_bits(register)),
        }
    }
}

fn address_bits(register: Register) -> u16 {
    u16::from(u8::from(register)) << ADDRESS_SHIFT
}

/// Build the transmit bytes of a frame
///
/// The command fills the high 16 bits of the first word; an optional data
/// word does the same in the second word. Every other slot is zero.
#[must_use]
pub fn encode(command: u16, data: Option<u16>) -> [u8; FRAME_BYTES] {
    let mut tx = [0u8; FRAME_BYTES];
    tx[..2].copy_from_slice(&command.to_be_bytes());
    if let Some(data) = data {
        tx[WORD_BYTES..WORD_BYTES + 2].copy_from_slice(&data.to_be_bytes());
    }
    tx
}

/// One received frame
///
/// Each word holds its 24 received bits in bits 8..=31.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    words: [u32; FRAME_WORDS],
}

impl Frame {
    /// Unpack the bytes received during one frame
    #[must_use]
    pub fn from_bytes(rx: &[u8; FRAME_BYTES]) -> Self {
        let mut words = [0u32; FRAME_WORDS];
        for (word, chunk) in words.iter_mut().zip(rx.chunks_exact(WORD_BYTES)) {
            *word = utils::pack_word([chunk[0], chunk[1], chunk[2]]);
        }
        Self { words }
    }

    /// Packed word at `index`, or `None` past the end of the frame
    #[must_use]
    pub fn word(&self, index: usize) -> Option<u32> {
        self.words.get(index).copied()
    }

    /// Response to the command of the previous frame
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn response(&self) -> u16 {
        (self.words[0] >> 16) as u16
    }

    /// Raw packed sample word of `channel`
    #[must_use]
    pub fn raw_sample(&self, channel: Channel) -> u32 {
        self.words[channel.index() + 1]
    }

    /// Signed conversion result of `channel`
    #[must_use]
    pub fn sample(&self, channel: Channel) -> i32 {
        utils::sign_extend(self.raw_sample(channel))
    }

    /// Conversion results of all channels in physical order
    #[must_use]
    pub fn samples(&self) -> [i32; 4] {
        Channel::ALL.map(|channel| self.sample(channel))
    }

    /// CRC word, passed through unverified
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn crc(&self) -> u16 {
        (self.words[FRAME_WORDS - 1] >> 16) as u16
    }
}
