/// Pack three received bytes (MSB first) into a frame word
///
/// The 24 received bits land in bits 8..=31 and bits 0..=7 stay zero, so the
/// sample's sign bit sits in bit 31.
pub fn pack_word(bytes: [u8; 3]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], 0])
}

/// Sign-extend a packed 24-bit two's-complement sample into an `i32`
#[allow(clippy::cast_possible_wrap)]
pub fn sign_extend(word: u32) -> i32 {
    (word as i32) >> 8
}
