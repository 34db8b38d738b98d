//! Framing preimages into hardware records.
//!
//! A record is `[domain tag][arity limbs]`, 32 bytes each. The top bit of the
//! last byte of every record tells the engine the record is complete, so that
//! byte must leave it free.

use fpga::PageBuffer;

use crate::{Error, Limb, Result, Variant, LIMB_SIZE};

/// Marks the last byte of a record.
pub const END_OF_RECORD: u8 = 0x80;

/// Frames batches for one variant and arity.
#[derive(Clone, Debug)]
pub struct Framer {
    variant: Variant,
    arity: usize,
    tag: Limb,
}

impl Framer {
    /// Fails with `UnsupportedArity` before anything touches the device.
    pub fn new(variant: Variant, arity: usize) -> Result<Self> {
        let tag = variant.tag_for(arity)?;
        Ok(Self {
            variant,
            arity,
            tag,
        })
    }

    pub fn tag(&self) -> &Limb {
        &self.tag
    }

    /// Bytes per record on the wire.
    pub fn record_size(&self) -> usize {
        LIMB_SIZE * self.variant.real_arity(self.arity)
    }

    /// Number of records `preimages` limbs make up.
    pub fn batch_size(&self, preimages: usize) -> Result<usize> {
        if preimages == 0 {
            return Err(Error::MalformedInput("no preimages to hash".to_string()));
        }
        if preimages % self.arity != 0 {
            return Err(Error::BatchSizeMismatch {
                preimages,
                arity: self.arity,
            });
        }
        Ok(preimages / self.arity)
    }

    /// Frames `batch_size` records out of `preimages`, which must hold exactly
    /// `arity * batch_size` limbs.
    pub fn frame(&self, preimages: &[Limb], batch_size: usize) -> Result<PageBuffer> {
        if preimages.len() != self.arity * batch_size {
            return Err(Error::BatchSizeMismatch {
                preimages: preimages.len(),
                arity: self.arity,
            });
        }

        let record_size = self.record_size();
        let mut buffer = PageBuffer::new(record_size * batch_size)?;

        for (record, limbs) in buffer
            .chunks_exact_mut(record_size)
            .zip(preimages.chunks_exact(self.arity))
        {
            let mut words = record.chunks_exact_mut(LIMB_SIZE);
            if self.variant.injects_tag() {
                if let Some(word) = words.next() {
                    word.copy_from_slice(&self.tag);
                }
            }
            for (word, limb) in words.zip(limbs) {
                word.copy_from_slice(limb);
            }
        }

        mark_records(&mut buffer, record_size)?;
        Ok(buffer)
    }
}

/// Sets the end-of-record bit on the last byte of every record.
///
/// Every boundary byte is checked before any is modified.
pub fn mark_records(buffer: &mut [u8], record_size: usize) -> Result<()> {
    let boundaries = (record_size - 1..buffer.len()).step_by(record_size);

    for (record, offset) in boundaries.clone().enumerate() {
        let byte = buffer[offset];
        if byte & END_OF_RECORD != 0 {
            return Err(Error::RecordOverflow {
                record,
                offset,
                byte,
            });
        }
    }

    for offset in boundaries {
        buffer[offset] |= END_OF_RECORD;
    }
    Ok(())
}

/// Splits raw bytes into limbs without reordering.
pub fn split_limbs(bytes: &[u8]) -> Result<Vec<Limb>> {
    if bytes.len() % LIMB_SIZE != 0 {
        return Err(Error::MalformedInput(format!(
            "{} bytes are not a whole number of {}-byte limbs",
            bytes.len(),
            LIMB_SIZE
        )));
    }
    Ok(bytes
        .chunks_exact(LIMB_SIZE)
        .map(|chunk| {
            let mut limb = [0u8; LIMB_SIZE];
            limb.copy_from_slice(chunk);
            limb
        })
        .collect())
}
