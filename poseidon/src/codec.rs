//! Hex text to and from wire bytes.

use crate::{Error, Limb, Result, LIMB_SIZE};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
/// Byte order of a 32-byte word on the wire, relative to its hex text.
pub enum ByteOrder {
    /// first pair of digits is the first byte
    Forward,
    /// first pair of digits is the last byte
    Reversed,
}

impl ByteOrder {
    #[inline]
    pub fn apply(self, limb: &mut Limb) {
        if self == ByteOrder::Reversed {
            limb.reverse();
        }
    }
}

fn from_hex_error(error: hex::FromHexError) -> Error {
    match error {
        hex::FromHexError::InvalidHexCharacter { c, index } => {
            Error::InvalidHexDigit { digit: c, index }
        }
        hex::FromHexError::OddLength => {
            Error::MalformedInput("odd number of hex digits".to_string())
        }
        _ => Error::MalformedInput(format!(
            "a limb takes exactly {} hex digits",
            2 * LIMB_SIZE
        )),
    }
}

/// Decodes hex text, two digits per byte, left to right. Digits are case-insensitive.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    hex::decode(text).map_err(from_hex_error)
}

/// Lower-case hex text of `bytes`, left to right.
pub fn encode(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decodes exactly one limb from 64 hex digits.
pub fn decode_limb(text: &str, order: ByteOrder) -> Result<Limb> {
    let mut limb = [0u8; LIMB_SIZE];
    hex::decode_to_slice(text, &mut limb).map_err(from_hex_error)?;
    order.apply(&mut limb);
    Ok(limb)
}

/// Hex text of one limb, inverse of [`decode_limb`] for the same order.
pub fn encode_limb(limb: &Limb, order: ByteOrder) -> String {
    let mut limb = *limb;
    order.apply(&mut limb);
    hex::encode(limb)
}
