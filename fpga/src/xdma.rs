use std::{
    fs::{File, OpenOptions},
    os::unix::fs::FileExt as _,
    path::{Path, PathBuf},
};

use crate::{Device, Error, PageBuffer, Read, Result, Write};

/// Host-to-card endpoint of the first XDMA channel.
pub const H2C_DEVICE: &str = "/dev/xdma0_h2c_0";
/// Card-to-host endpoint of the first XDMA channel.
pub const C2H_DEVICE: &str = "/dev/xdma0_c2h_0";

/// Largest transfer the XDMA driver accepts in one system call.
const RW_MAX_SIZE: usize = 0x7fff_f000;

#[derive(Clone, Debug)]
/// FPGA behind a Xilinx XDMA PCIe bridge.
pub struct Xdma {
    h2c: PathBuf,
    c2h: PathBuf,
}

impl Xdma {
    pub fn new(h2c: impl Into<PathBuf>, c2h: impl Into<PathBuf>) -> Self {
        Self {
            h2c: h2c.into(),
            c2h: c2h.into(),
        }
    }
}

impl Default for Xdma {
    fn default() -> Self {
        Self::new(H2C_DEVICE, C2H_DEVICE)
    }
}

impl Device for Xdma {
    type H2c = Channel;
    type C2h = Channel;

    fn h2c(&self) -> Result<Channel> {
        Channel::open(&self.h2c)
    }

    fn c2h(&self) -> Result<Channel> {
        Channel::open(&self.c2h)
    }
}

#[derive(Debug)]
/// One opened XDMA character device, closed on drop.
pub struct Channel {
    path: PathBuf,
    file: File,
}

impl Channel {
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|source| Error::DeviceOpenFailed {
                path: path.to_owned(),
                source,
            })?;
        Ok(Self {
            path: path.to_owned(),
            file,
        })
    }

    fn transfer_error(&self, source: std::io::Error) -> Error {
        Error::Transfer {
            path: self.path.clone(),
            source,
        }
    }
}

impl Write for Channel {
    fn write(&mut self, buffer: &PageBuffer, offset: u64) -> Result<usize> {
        let mut count = 0;
        for chunk in buffer.chunks(RW_MAX_SIZE) {
            let written = self
                .file
                .write_at(chunk, offset + count as u64)
                .map_err(|error| self.transfer_error(error))?;
            count += written;
            // underflow, the caller sees the short count
            if written != chunk.len() {
                break;
            }
        }
        Ok(count)
    }
}

impl Read for Channel {
    fn read(&mut self, buffer: &mut PageBuffer, offset: u64) -> Result<usize> {
        let mut count = 0;
        for chunk in buffer.chunks_mut(RW_MAX_SIZE) {
            let read = self
                .file
                .read_at(chunk, offset + count as u64)
                .map_err(|error| self.transfer_error(error))?;
            count += read;
            if read != chunk.len() {
                break;
            }
        }
        Ok(count)
    }
}
