//! Load and store test vectors.
//!
//! Vector files hold one 64-digit hex word per whitespace-separated token,
//! most significant digit first.

use std::path::Path;

use crate::{
    codec::{decode_limb, encode_limb, ByteOrder},
    Error, Limb, Result,
};

fn load_error(path: &Path) -> impl FnOnce(std::io::Error) -> Error + '_ {
    move |source| Error::Load {
        path: path.to_owned(),
        source,
    }
}

/// Every token of the file, lower-cased.
pub fn load_words(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path).map_err(load_error(path))?;
    Ok(text
        .split_whitespace()
        .map(|word| word.to_ascii_lowercase())
        .collect())
}

/// Preimage limbs in wire order.
pub fn load_preimages(path: &Path, order: ByteOrder) -> Result<Vec<Limb>> {
    load_words(path)?
        .iter()
        .map(|word| decode_limb(word, order))
        .collect()
}

/// Golden hashes, as text.
pub fn load_golden(path: &Path) -> Result<Vec<String>> {
    load_words(path)
}

/// One word per line, inverse of [`load_preimages`].
pub fn store_limbs(path: &Path, limbs: &[Limb], order: ByteOrder) -> Result<()> {
    let mut text = String::with_capacity(limbs.len() * 65);
    for limb in limbs {
        text.push_str(&encode_limb(limb, order));
        text.push('\n');
    }
    std::fs::write(path, text).map_err(load_error(path))
}
