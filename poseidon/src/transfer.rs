//! Duplex host/card exchange.
//!
//! The engine streams hashes back as soon as records arrive and drops them
//! if nobody is reading, so every session runs the card-to-host reader on
//! its own thread and only writes once that reader has its endpoint open and
//! its buffer in place.

use std::sync::mpsc::{self, SyncSender};

use fpga::{Device, PageBuffer, Read as _, Write as _};
use tracing::{debug, error, info, warn};

use crate::{
    timing::{rate, timed},
    Error, Logger, Result, LIMB_SIZE,
};

/// Outcome of one session. Short transfers are reported, not rejected.
#[derive(Debug)]
pub struct Exchange {
    pub results: PageBuffer,
    /// bytes received from the card
    pub read: usize,
    /// bytes sent to the card, over all writes
    pub written: usize,
}

impl Exchange {
    /// The part of the result buffer the card actually filled.
    pub fn bytes(&self) -> &[u8] {
        &self.results[..self.read.min(self.results.len())]
    }
}

/// Drives one reader and one writer per session against a device.
pub struct Coordinator<D> {
    device: D,
    // one thread for the reader, one for the writer
    pool: rayon::ThreadPool,
    logger: Logger,
}

fn logged(error: fpga::Error) -> fpga::Error {
    error!("{}", error);
    error
}

impl<D: Device> Coordinator<D> {
    pub fn new(device: D, logger: Logger) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(2)
            .thread_name(|i| format!("xdma-{}", i))
            .build()?;
        Ok(Self {
            device,
            pool,
            logger,
        })
    }

    /// One write of `framed`, one read of `expected` hashes.
    pub fn exchange(&mut self, framed: &PageBuffer, expected: usize) -> Result<Exchange> {
        self.exchange_repeated(framed, 1, expected)
    }

    /// Writes `framed` `transfers` times, each through a freshly opened
    /// endpoint, while one read collects `expected` hashes.
    pub fn exchange_repeated(
        &mut self,
        framed: &PageBuffer,
        transfers: usize,
        expected: usize,
    ) -> Result<Exchange> {
        let size = LIMB_SIZE.checked_mul(expected).ok_or_else(|| {
            Error::MalformedInput(format!("{} hashes do not fit in memory", expected))
        })?;
        let this = &*self;
        let (started, listening) = mpsc::sync_channel(1);

        let mut received = None;
        let mut sent = Ok(0);
        {
            let (received, sent) = (&mut received, &mut sent);
            this.pool.scope(move |s| {
                s.spawn(move |_| *received = Some(this.receive(size, started)));
                // a reader that fails to start drops `started` without signalling
                if listening.recv().is_ok() {
                    *sent = this.send(framed, transfers);
                }
            });
        }

        let (results, read) = received.unwrap_or_else(|| unreachable!())?;
        let written = sent?;
        Ok(Exchange {
            results,
            read,
            written,
        })
    }

    fn receive(&self, size: usize, started: SyncSender<()>) -> Result<(PageBuffer, usize)> {
        self.logger.scope(|| {
            let mut c2h = self.device.c2h().map_err(logged)?;
            let mut buffer = PageBuffer::new(size).map_err(logged)?;
            debug!("allocated {} bytes of read memory", size);

            // the writer is blocked on `listening` until this arrives
            let _ = started.send(());

            let (read, elapsed) = timed(|| c2h.read(&mut buffer, 0));
            let read = read.map_err(logged)?;
            drop(c2h);

            info!(
                "read {} bytes from FPGA in {:?} ({:.2} MB/s)",
                read,
                elapsed,
                rate(read, elapsed)
            );
            if read < size {
                warn!("short read: {} of {} bytes", read, size);
            }
            Ok((buffer, read))
        })
    }

    fn send(&self, framed: &PageBuffer, transfers: usize) -> Result<usize> {
        self.logger.scope(|| {
            let mut total = 0;
            for _ in 0..transfers {
                let mut h2c = self.device.h2c().map_err(logged)?;
                let (written, elapsed) = timed(|| h2c.write(framed, 0));
                let written = written.map_err(logged)?;
                drop(h2c);

                info!(
                    "wrote {} bytes to FPGA in {:?} ({:.2} MB/s)",
                    written,
                    elapsed,
                    rate(written, elapsed)
                );
                if written < framed.len() {
                    warn!("short write: {} of {} bytes", written, framed.len());
                }
                total += written;
            }
            Ok(total)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fpga::Null;

    #[test]
    fn null_device_echoes_zeros() {
        let mut coordinator = Coordinator::new(Null::new(), Logger::disabled()).unwrap();
        let framed = PageBuffer::from_slice(&[1u8; 96]).unwrap();
        let exchange = coordinator.exchange(&framed, 1).unwrap();

        assert_eq!(exchange.written, 96);
        assert_eq!(exchange.read, 32);
        assert_eq!(exchange.bytes(), &[0u8; 32][..]);
        assert_eq!(exchange.results.as_ptr() as usize % fpga::PAGE_SIZE, 0);
    }

    #[test]
    fn repeated_writes_add_up() {
        let mut coordinator = Coordinator::new(Null::new(), Logger::disabled()).unwrap();
        let framed = PageBuffer::from_slice(&[1u8; 192]).unwrap();
        let exchange = coordinator.exchange_repeated(&framed, 3, 6).unwrap();

        assert_eq!(exchange.written, 3 * 192);
        assert_eq!(exchange.read, 6 * 32);
    }

    #[test]
    fn oversized_read_is_rejected_before_opening() {
        let mut coordinator = Coordinator::new(Null::new(), Logger::disabled()).unwrap();
        let framed = PageBuffer::from_slice(&[1u8; 96]).unwrap();
        assert!(matches!(
            coordinator.exchange(&framed, usize::MAX),
            Err(Error::MalformedInput(_))
        ));
    }

    #[test]
    fn coordinator_is_reusable_across_sessions() {
        let mut coordinator = Coordinator::new(Null::new(), Logger::disabled()).unwrap();
        let framed = PageBuffer::from_slice(&[1u8; 96]).unwrap();
        for _ in 0..10 {
            assert_eq!(coordinator.exchange(&framed, 1).unwrap().read, 32);
        }
    }
}
