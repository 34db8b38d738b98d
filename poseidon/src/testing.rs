//! Generate test instances.

use rand::rngs::StdRng;
use rand_core::{RngCore, SeedableRng};

use crate::{Limb, Result, Variant, LIMB_SIZE};

/// Random limb, wire order, with the top two bits clear so it stays below
/// the field modulus and never collides with the end-of-record bit.
pub fn random_limb(rng: &mut impl RngCore) -> Limb {
    let mut limb = [0u8; LIMB_SIZE];
    rng.fill_bytes(&mut limb);
    limb[LIMB_SIZE - 1] &= 0x3f;
    limb
}

pub fn random_preimages(count: usize, seed: u64) -> Vec<Limb> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| random_limb(&mut rng)).collect()
}

pub fn zero_preimages(count: usize) -> Vec<Limb> {
    vec![[0u8; LIMB_SIZE]; count]
}

/// Input for `variant` and `arity`, `records` records long.
///
/// Tester inputs carry the domain tag as the first limb of every record,
/// FFI inputs only hold the preimages.
pub fn harness_preimages(
    variant: Variant,
    arity: usize,
    records: usize,
    seed: u64,
) -> Result<Vec<Limb>> {
    let tag = variant.tag_for(arity)?;
    let mut rng = StdRng::seed_from_u64(seed);

    let mut preimages = Vec::with_capacity(arity * records);
    for _ in 0..records {
        let mut limbs = 0;
        if !variant.injects_tag() {
            preimages.push(tag);
            limbs += 1;
        }
        while limbs < arity {
            preimages.push(random_limb(&mut rng));
            limbs += 1;
        }
    }
    Ok(preimages)
}
