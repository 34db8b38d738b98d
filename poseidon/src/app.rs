//! Host-side app to interact with the FPGA Poseidon engine.

use fpga::{Device, PageBuffer};
use tracing::info;

#[cfg(not(feature = "hw"))]
pub use fpga::Null as Fpga;
#[cfg(feature = "hw")]
pub use fpga::Xdma as Fpga;

use crate::{
    transfer::{Coordinator, Exchange},
    Framer, Limb, Logger, Result, Variant,
};

/// Host-side Poseidon application, one variant per instance.
pub struct App<D = Fpga> {
    variant: Variant,
    coordinator: Coordinator<D>,
    logger: Logger,
}

impl<D: Device> App<D> {
    pub fn new(device: D, variant: Variant, logger: Logger) -> Result<Self> {
        Ok(App {
            variant,
            coordinator: Coordinator::new(device, logger.clone())?,
            logger,
        })
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn framer(&self, arity: usize) -> Result<Framer> {
        Framer::new(self.variant, arity)
    }

    /// Frames all of `preimages` as whole records of `arity` limbs.
    pub fn frame(&self, preimages: &[Limb], arity: usize) -> Result<PageBuffer> {
        let framer = self.framer(arity)?;
        let batch_size = framer.batch_size(preimages.len())?;
        self.logger.scope(|| {
            info!(
                "# of inputs: {}, arity = {}, records = {}",
                preimages.len(),
                arity,
                batch_size
            )
        });
        framer.frame(preimages, batch_size)
    }

    pub fn exchange(&mut self, framed: &PageBuffer, expected: usize) -> Result<Exchange> {
        self.coordinator.exchange(framed, expected)
    }

    pub fn exchange_repeated(
        &mut self,
        framed: &PageBuffer,
        transfers: usize,
        expected: usize,
    ) -> Result<Exchange> {
        self.coordinator
            .exchange_repeated(framed, transfers, expected)
    }

    /// Hashes `preimages` in one session, one 32-byte result per record.
    ///
    /// Input errors are raised before any endpoint is opened.
    pub fn hash(&mut self, preimages: &[Limb], arity: usize) -> Result<Exchange> {
        let framed = self.frame(preimages, arity)?;
        self.exchange(&framed, preimages.len() / arity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{tag_for, Error, LIMB_SIZE};
    use fpga::Null;

    #[test]
    fn hash_returns_one_result_per_record() {
        let mut app = App::new(Null::new(), Variant::Lotus, Logger::disabled()).unwrap();
        let preimages = vec![[0u8; LIMB_SIZE]; 8 * 4];
        let exchange = app.hash(&preimages, 8).unwrap();

        assert_eq!(exchange.written, 4 * 9 * LIMB_SIZE);
        assert_eq!(exchange.bytes().len(), 4 * LIMB_SIZE);
    }

    #[test]
    fn frame_uses_the_variant() {
        let app = App::new(Null::new(), Variant::Lotus, Logger::disabled()).unwrap();
        let framed = app.frame(&[[0u8; LIMB_SIZE]; 2], 2).unwrap();
        assert_eq!(&framed[..LIMB_SIZE], &tag_for(2).unwrap()[..]);

        let app = App::new(Null::new(), Variant::Tester, Logger::disabled()).unwrap();
        assert!(matches!(
            app.frame(&[[0u8; LIMB_SIZE]; 2], 2),
            Err(Error::UnsupportedArity { .. })
        ));
    }
}
