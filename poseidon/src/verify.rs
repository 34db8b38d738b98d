//! Comparing returned hashes against golden values.
//!
//! The card returns each hash least significant byte first; golden files
//! print them most significant digit first.

use crate::{
    codec::{encode_limb, ByteOrder},
    Error, Limb, LIMB_SIZE,
};

/// One returned hash next to its golden value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Comparison {
    pub index: usize,
    pub got: String,
    pub expected: String,
}

impl Comparison {
    pub fn matches(&self) -> bool {
        self.got.eq_ignore_ascii_case(&self.expected)
    }

    /// The mismatch as a reportable error, if any.
    pub fn mismatch(&self) -> Option<Error> {
        if self.matches() {
            None
        } else {
            Some(Error::HashMismatch {
                index: self.index,
                got: self.got.clone(),
                expected: self.expected.clone(),
            })
        }
    }
}

/// Hex text of every complete 32-byte hash in `raw`, in golden-file order.
///
/// A trailing partial hash from a short read is ignored.
pub fn hashes(raw: &[u8]) -> Vec<String> {
    raw.chunks_exact(LIMB_SIZE)
        .map(|window| {
            let mut limb: Limb = [0u8; LIMB_SIZE];
            limb.copy_from_slice(window);
            encode_limb(&limb, ByteOrder::Reversed)
        })
        .collect()
}

/// Compares every returned hash against `golden[index % golden.len()]`.
///
/// Never stops at a mismatch; an empty golden list compares nothing.
pub fn verify(raw: &[u8], golden: &[String]) -> Vec<Comparison> {
    if golden.is_empty() {
        return Vec::new();
    }
    hashes(raw)
        .into_iter()
        .enumerate()
        .map(|(index, got)| Comparison {
            index,
            got,
            expected: golden[index % golden.len()].clone(),
        })
        .collect()
}

/// All mismatches among `comparisons`.
pub fn mismatches(comparisons: &[Comparison]) -> Vec<Error> {
    comparisons.iter().filter_map(Comparison::mismatch).collect()
}
