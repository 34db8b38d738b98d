//! Host-side application to hash on the FPGA-side Poseidon engine.
//!
//! The hash itself is computed entirely in hardware. The host frames batches of
//! preimages into hardware records, streams them over XDMA and collects one
//! 32-byte hash per record.
//!
//! Steps:
//! - look up the domain tag for the arity, decode preimages
//! - frame records: tag, limbs, end-of-record bit on the last byte
//! - start the card-to-host reader, then stream the records host-to-card
//! - reassemble and (optionally) verify the returned hashes
//!
//! The card starts streaming results as soon as the first record is complete,
//! so the reader must be listening before the first byte is written.

use std::path::PathBuf;

use thiserror::Error;

pub mod app;
pub use app::{App, Fpga};

pub mod codec;
pub use codec::ByteOrder;

pub mod ffi;
pub use ffi::hash_batch;

pub mod frame;
pub use frame::Framer;

pub mod io;

pub mod log;
pub use log::Logger;

pub mod tags;
pub use tags::{tag_for, Variant};

pub mod tester;

pub mod testing;

pub mod timing;

pub mod transfer;
pub use transfer::Exchange;

pub mod verify;
pub use verify::{verify, Comparison};

/// Bytes per field element, preimage limb or hash.
pub const LIMB_SIZE: usize = 32;

/// One 256-bit field element, in the byte order it travels over the wire.
pub type Limb = [u8; LIMB_SIZE];

#[derive(Debug, Error)]
pub enum Error {
    #[error("arity {arity} is not supported by the {variant} entry point")]
    UnsupportedArity { arity: usize, variant: Variant },

    #[error("invalid hex digit {digit:?} at position {index}")]
    InvalidHexDigit { digit: char, index: usize },

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("{preimages} preimages do not form whole records of arity {arity}")]
    BatchSizeMismatch { preimages: usize, arity: usize },

    #[error("record {record} ends in byte {byte:#04x} at offset {offset}, the end-of-record bit is taken")]
    RecordOverflow {
        record: usize,
        offset: usize,
        byte: u8,
    },

    #[error("hash {index} does not match: got {got}, expected {expected}")]
    HashMismatch {
        index: usize,
        got: String,
        expected: String,
    },

    #[error(transparent)]
    Fpga(#[from] fpga::Error),

    #[error("failed to start transfer threads: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("cannot read {path}: {source}")]
    Load {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = core::result::Result<T, Error>;

/// FPGA constructor, independent of "hw" feature.
#[cfg(feature = "hw")]
pub fn fpga() -> Fpga {
    Fpga::default()
}
#[cfg(not(feature = "hw"))]
pub fn fpga() -> Fpga {
    Fpga::new()
}
