//! # fpga
//!
//! Rust traits to move byte streams between host and FPGA over DMA.
//!
//! Implemented for Xilinx XDMA character devices, which expose one
//! host-to-card (h2c) and one card-to-host (c2h) endpoint per channel.

use std::path::PathBuf;
use thiserror::Error;

pub mod align;
pub use align::{Page, PAGE_SIZE};

pub mod buffer;
pub use buffer::PageBuffer;

#[cfg(feature = "xdma")]
pub mod xdma;
#[cfg(feature = "xdma")]
pub use xdma::Xdma;

pub mod null;
pub use null::Null;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unable to open device {path}: {source}")]
    DeviceOpenFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to allocate {size} bytes of page-aligned memory")]
    AllocationFailed { size: usize },

    #[error("transfer on {path} failed: {source}")]
    Transfer {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = core::result::Result<T, Error>;

/// Blocking, single-shot host-to-card transfers.
pub trait Write {
    /// write the whole buffer at `offset`, returning the number of bytes actually moved
    fn write(&mut self, buffer: &PageBuffer, offset: u64) -> Result<usize>;
}

/// Blocking, single-shot card-to-host transfers.
pub trait Read {
    /// fill the whole buffer from `offset`, returning the number of bytes actually moved
    fn read(&mut self, buffer: &mut PageBuffer, offset: u64) -> Result<usize>;
}

/// An FPGA reachable through a pair of DMA endpoints.
///
/// Every call opens a fresh endpoint; it is closed when dropped.
/// Endpoints are never reused across transfer sessions.
pub trait Device: Sync {
    type H2c: Write + Send;
    type C2h: Read + Send;

    /// open the host-to-card endpoint
    fn h2c(&self) -> Result<Self::H2c>;

    /// open the card-to-host endpoint
    fn c2h(&self) -> Result<Self::C2h>;
}
