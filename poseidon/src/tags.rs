//! Domain tags, one per supported arity.
//!
//! Tags are published as 64-digit hex strings, most significant byte first.
//! The engine expects limbs least significant byte first, so the strings are
//! decoded pair by pair from the end.

use core::fmt;

use crate::{codec::ByteOrder, Error, Limb, Result, LIMB_SIZE};

const DOMAIN_TAG_U2: &str = "486e140d064f104ecca4efcfc634efe0098e27ee0009d80600000005fffffffa";
const DOMAIN_TAG_U8: &str = "0c59041b7aa57a3757c9e652d111ec48d5f04d67039bae3300000232fffffdcd";
const DOMAIN_TAG_U11: &str = "23edaba93b53fd378ab1b215ee71e1f173a82b081cf7b1a8000011a7ffffee58";

const TAG_U2: Limb = decode_tag(DOMAIN_TAG_U2);
const TAG_U8: Limb = decode_tag(DOMAIN_TAG_U8);
const TAG_U11: Limb = decode_tag(DOMAIN_TAG_U11);

const fn nibble(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => panic!("domain tags are hex"),
    }
}

/// Decodes a published tag, last pair of digits first.
const fn decode_tag(hex: &str) -> Limb {
    let hex = hex.as_bytes();
    assert!(hex.len() == 2 * LIMB_SIZE);
    let mut tag = [0u8; LIMB_SIZE];
    let mut j = 0;
    while j < LIMB_SIZE {
        let i = hex.len() - 2 * j;
        tag[j] = (nibble(hex[i - 2]) << 4) | nibble(hex[i - 1]);
        j += 1;
    }
    tag
}

/// Domain tag for the FFI entry point's arities.
pub fn tag_for(arity: usize) -> Result<Limb> {
    Variant::Lotus.tag_for(arity)
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
/// The two host entry points framing records for the same engine.
pub enum Variant {
    /// FFI entry point: raw limbs as given, domain tag injected per record.
    Lotus,
    /// Standalone tester: hex limbs byte-reversed per word, input files
    /// carry the domain tag as the first limb of each record.
    Tester,
}

impl Variant {
    pub const fn arities(self) -> &'static [usize] {
        match self {
            Variant::Lotus => &[2, 8, 11],
            Variant::Tester => &[3, 9, 12],
        }
    }

    pub fn check(self, arity: usize) -> Result<()> {
        if self.arities().contains(&arity) {
            Ok(())
        } else {
            Err(Error::UnsupportedArity {
                arity,
                variant: self,
            })
        }
    }

    /// Domain tag bound to `arity`. Tester arities count the tag limb itself.
    pub fn tag_for(self, arity: usize) -> Result<Limb> {
        self.check(arity)?;
        let hash_arity = match self {
            Variant::Lotus => arity,
            Variant::Tester => arity - 1,
        };
        Ok(match hash_arity {
            2 => TAG_U2,
            8 => TAG_U8,
            11 => TAG_U11,
            _ => unreachable!("registered arities have tags"),
        })
    }

    /// Whether the framer prepends the tag, or finds it in the input.
    pub const fn injects_tag(self) -> bool {
        matches!(self, Variant::Lotus)
    }

    /// Limbs per hardware record, including the domain tag.
    pub const fn real_arity(self, arity: usize) -> usize {
        match self {
            Variant::Lotus => arity + 1,
            Variant::Tester => arity,
        }
    }

    /// Byte order hex limbs are decoded with.
    pub const fn byte_order(self) -> ByteOrder {
        match self {
            Variant::Lotus => ByteOrder::Forward,
            Variant::Tester => ByteOrder::Reversed,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Variant::Lotus => "lotus",
            Variant::Tester => "tester",
        })
    }
}
