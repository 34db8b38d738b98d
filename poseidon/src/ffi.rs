//! C entry point for callers that hand over raw preimage bytes.

use std::{os::raw::c_int, slice, sync::OnceLock};

use fpga::Device;
use tracing::error;

use crate::{frame::split_limbs, App, Error, Logger, Result, Variant, LIMB_SIZE};

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Frames `batch_size` records of `arity` raw limbs, hashes them on the card
/// and copies one 32-byte result per record into `results`.
///
/// Limbs are taken as given, least significant byte first. Nothing is verified.
pub fn hash_batch<D: Device>(
    app: &mut App<D>,
    preimages: &[u8],
    results: &mut [u8],
    batch_size: usize,
    arity: usize,
) -> Result<()> {
    let framer = app.framer(arity)?;

    if preimages.len() != LIMB_SIZE * arity * batch_size {
        return Err(Error::MalformedInput(format!(
            "{} preimage bytes for {} records of arity {}",
            preimages.len(),
            batch_size,
            arity
        )));
    }
    let size = LIMB_SIZE * batch_size;
    if results.len() < size {
        return Err(Error::MalformedInput(format!(
            "{} result bytes for {} hashes",
            results.len(),
            batch_size
        )));
    }

    let limbs = split_limbs(preimages)?;
    let framed = framer.frame(&limbs, batch_size)?;
    let exchange = app.exchange(&framed, batch_size)?;

    results[..size].copy_from_slice(&exchange.results[..size]);
    Ok(())
}

fn checked_sizes(batch_size: c_int, arity: c_int) -> Result<(usize, usize)> {
    let batch_size = usize::try_from(batch_size)
        .map_err(|_| Error::MalformedInput(format!("batch size {}", batch_size)))?;
    let arity = usize::try_from(arity).map_err(|_| Error::MalformedInput(format!("arity {}", arity)))?;
    Variant::Lotus.check(arity)?;
    if batch_size == 0 {
        return Err(Error::MalformedInput("empty batch".to_string()));
    }
    Ok((batch_size, arity))
}

/// Hashes one batch on the FPGA. Returns 1 on success, 0 on any error.
///
/// # Safety
///
/// `preimages` must point to `32 * arity * batch_size` readable bytes and
/// `results` to `32 * batch_size` writable bytes, neither overlapping.
#[no_mangle]
pub unsafe extern "C" fn hash_on_fpga(
    preimages: *const u8,
    results: *mut u8,
    batch_size: c_int,
    arity: c_int,
) -> c_int {
    let logger = LOGGER.get_or_init(Logger::stdout);

    let run = || -> Result<()> {
        let (batch_size, arity) = checked_sizes(batch_size, arity)?;
        if preimages.is_null() || results.is_null() {
            return Err(Error::MalformedInput("null buffer".to_string()));
        }
        let (preimages, results) = unsafe {
            (
                slice::from_raw_parts(preimages, LIMB_SIZE * arity * batch_size),
                slice::from_raw_parts_mut(results, LIMB_SIZE * batch_size),
            )
        };
        let mut app = App::new(crate::fpga(), Variant::Lotus, logger.clone())?;
        hash_batch(&mut app, preimages, results, batch_size, arity)
    };

    match run() {
        Ok(()) => 1,
        Err(error) => {
            logger.scope(|| error!("hash_on_fpga failed: {}", error));
            0
        }
    }
}
