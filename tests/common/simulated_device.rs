//! Simulated ADS131M04 speaking the frame protocol over `SpiDevice`

use core::convert::Infallible;

use embedded_hal::spi::{ErrorType, Operation, SpiDevice};

const FRAME_BYTES: usize = 18;
const REGISTER_COUNT: usize = 64;

const REG_ID: usize = 0x00;
const REG_STATUS: usize = 0x01;

/// Power-on register contents
fn default_registers() -> [u16; REGISTER_COUNT] {
    let mut registers = [0u16; REGISTER_COUNT];
    registers[REG_ID] = 0x2403;
    registers[REG_STATUS] = 0x0500;
    registers[0x02] = 0x0510; // MODE
    registers[0x03] = 0x0F0E; // CLOCK
    registers[0x06] = 0x0600; // CFG
    for channel in 0..4 {
        registers[0x0C + channel * 5] = 0x8000; // CHn_GCAL_MSB
    }
    registers
}

/// Register-level model of the converter
///
/// Every frame returns the response to the previous frame's command in the
/// first word, followed by the four channel samples and a fixed CRC word.
#[derive(Debug)]
pub struct SimulatedAdc {
    registers: [u16; REGISTER_COUNT],
    samples: [i32; 4],
    response: u16,
    acknowledgement_override: Option<u16>,
    frames: usize,
    writes: Vec<(u8, u16)>,
}

impl SimulatedAdc {
    pub fn new() -> Self {
        Self {
            registers: default_registers(),
            samples: [0; 4],
            response: 0,
            acknowledgement_override: None,
            frames: 0,
            writes: Vec::new(),
        }
    }

    /// Current contents of a register
    pub fn register(&self, address: u8) -> u16 {
        self.registers[usize::from(address)]
    }

    /// Overwrite a register behind the driver's back
    pub fn set_register(&mut self, address: u8, value: u16) {
        self.registers[usize::from(address)] = value;
    }

    /// Conversion results returned in every following frame
    pub fn set_samples(&mut self, samples: [i32; 4]) {
        self.samples = samples;
    }

    /// Answer every following write with `word` instead of the real acknowledgement
    pub fn corrupt_acknowledgement(&mut self, word: u16) {
        self.acknowledgement_override = Some(word);
    }

    /// Number of frames clocked so far
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Register writes received so far, in order
    pub fn writes(&self) -> &[(u8, u16)] {
        &self.writes
    }

    fn exchange(&mut self, read: &mut [u8], write: &[u8]) {
        assert_eq!(read.len(), FRAME_BYTES, "frame must be six 24-bit words");
        assert_eq!(write.len(), FRAME_BYTES, "frame must be six 24-bit words");
        self.frames += 1;

        read.fill(0);
        read[..2].copy_from_slice(&self.response.to_be_bytes());
        for (channel, sample) in self.samples.iter().enumerate() {
            let bytes = sample.to_be_bytes();
            let offset = 3 * (channel + 1);
            read[offset..offset + 3].copy_from_slice(&bytes[1..]);
        }
        read[15..17].copy_from_slice(&0xC3C3u16.to_be_bytes());

        let command = u16::from_be_bytes([write[0], write[1]]);
        let data = u16::from_be_bytes([write[3], write[4]]);
        let address = ((command >> 7) & 0x3F) as u8;
        let index = usize::from(address);

        self.response = match command {
            0x0000 => self.registers[REG_STATUS],
            0x0011 => {
                self.registers = default_registers();
                0xFF24
            }
            0x0022 | 0x0033 | 0x0555 | 0x0655 => command,
            _ if command & 0xE000 == 0xA000 => self.registers[index],
            _ if command & 0xE000 == 0x6000 => {
                if index != REG_ID && index != REG_STATUS {
                    self.registers[index] = data;
                }
                self.writes.push((address, data));
                self.acknowledgement_override
                    .unwrap_or(0x4000 | (command & 0x1F80))
            }
            other => panic!("unsupported command 0x{other:04X}"),
        };
    }
}

impl ErrorType for SimulatedAdc {
    type Error = Infallible;
}

impl SpiDevice<u8> for SimulatedAdc {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Infallible> {
        for operation in operations {
            match operation {
                Operation::Transfer(read, write) => self.exchange(read, write),
                _ => panic!("driver must clock whole frames with full-duplex transfers"),
            }
        }
        Ok(())
    }
}
