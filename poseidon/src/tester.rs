//! Standalone hardware test: stream a vector file to the card, optionally
//! compare the hashes that come back against a golden file.

use std::path::PathBuf;

use fpga::Device;
use tracing::{error, info, warn};

use crate::{
    io::{load_golden, load_preimages},
    verify::{mismatches, verify},
    App, Error, Result,
};

/// One tester invocation.
#[derive(Clone, Debug)]
pub struct Run {
    /// how many times the whole input file is written
    pub transfers: usize,
    /// limbs per record, domain tag included
    pub arity: usize,
    pub input: PathBuf,
    pub output: Option<PathBuf>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Summary {
    pub hashes: usize,
    pub written: usize,
    pub read: usize,
    /// `None` when there was nothing to compare against
    pub compared: Option<usize>,
    pub mismatches: usize,
}

impl Summary {
    pub fn passed(&self) -> bool {
        self.mismatches == 0
    }
}

pub fn run<D: Device>(app: &mut App<D>, invocation: &Run) -> Result<Summary> {
    let framer = app.framer(invocation.arity)?;
    if invocation.transfers == 0 {
        return Err(Error::MalformedInput("transfer count must be positive".to_string()));
    }
    let logger = app.logger().clone();

    let golden = match &invocation.output {
        Some(path) => match load_golden(path) {
            Ok(golden) if golden.is_empty() => {
                logger.scope(|| {
                    warn!("{} holds no hashes, skipping comparison", path.display())
                });
                None
            }
            Ok(golden) => Some(golden),
            Err(error) => {
                logger.scope(|| warn!("{}, skipping comparison", error));
                None
            }
        },
        None => {
            logger.scope(|| info!("no output file given, skipping comparison"));
            None
        }
    };

    let preimages = load_preimages(&invocation.input, app.variant().byte_order())?;
    let records = framer.batch_size(preimages.len())?;
    let framed = app.frame(&preimages, invocation.arity)?;

    let hashes = invocation
        .transfers
        .checked_mul(records)
        .ok_or_else(|| Error::MalformedInput("transfer count too large".to_string()))?;
    let exchange = app.exchange_repeated(&framed, invocation.transfers, hashes)?;

    let mut summary = Summary {
        hashes,
        written: exchange.written,
        read: exchange.read,
        ..Summary::default()
    };

    if let Some(golden) = golden {
        let comparisons = verify(exchange.bytes(), &golden);
        let failed = mismatches(&comparisons);
        logger.scope(|| {
            for mismatch in &failed {
                error!("{}", mismatch);
            }
        });
        summary.compared = Some(comparisons.len());
        summary.mismatches = failed.len();
    }

    logger.scope(|| info!("num of Poseidon hashes: {}", hashes));
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{io::store_limbs, testing::harness_preimages, ByteOrder, Logger, Variant};
    use fpga::Null;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("trident-tester-{}-{}", std::process::id(), name))
    }

    #[test]
    fn zero_hashes_against_zero_golden() {
        let input = scratch("input");
        let output = scratch("output");
        let preimages = harness_preimages(Variant::Tester, 3, 4, 1).unwrap();
        store_limbs(&input, &preimages, ByteOrder::Reversed).unwrap();
        std::fs::write(&output, "0".repeat(64)).unwrap();

        let mut app = App::new(Null::new(), Variant::Tester, Logger::disabled()).unwrap();
        let summary = run(
            &mut app,
            &Run {
                transfers: 2,
                arity: 3,
                input: input.clone(),
                output: Some(output.clone()),
            },
        )
        .unwrap();

        assert_eq!(summary.hashes, 8);
        assert_eq!(summary.written, 2 * 4 * 96);
        assert_eq!(summary.compared, Some(8));
        assert!(summary.passed());

        std::fs::remove_file(&input).unwrap();
        std::fs::remove_file(&output).unwrap();
    }

    #[test]
    fn missing_golden_file_skips_comparison() {
        let input = scratch("input-nogolden");
        store_limbs(
            &input,
            &harness_preimages(Variant::Tester, 9, 1, 2).unwrap(),
            ByteOrder::Reversed,
        )
        .unwrap();

        let mut app = App::new(Null::new(), Variant::Tester, Logger::disabled()).unwrap();
        let summary = run(
            &mut app,
            &Run {
                transfers: 1,
                arity: 9,
                input: input.clone(),
                output: Some(scratch("does-not-exist")),
            },
        )
        .unwrap();

        assert_eq!(summary.compared, None);
        assert_eq!(summary.read, 32);
        std::fs::remove_file(&input).unwrap();
    }

    #[test]
    fn empty_golden_file_skips_comparison() {
        let input = scratch("input-emptygolden");
        let output = scratch("output-empty");
        store_limbs(
            &input,
            &harness_preimages(Variant::Tester, 3, 2, 3).unwrap(),
            ByteOrder::Reversed,
        )
        .unwrap();
        std::fs::write(&output, b"").unwrap();

        let mut app = App::new(Null::new(), Variant::Tester, Logger::disabled()).unwrap();
        let summary = run(
            &mut app,
            &Run {
                transfers: 1,
                arity: 3,
                input: input.clone(),
                output: Some(output.clone()),
            },
        )
        .unwrap();

        assert_eq!(summary.compared, None);
        assert_eq!(summary.mismatches, 0);
        assert_eq!(summary.read, 2 * 32);

        std::fs::remove_file(&input).unwrap();
        std::fs::remove_file(&output).unwrap();
    }

    #[test]
    fn huge_transfer_count_is_malformed() {
        let input = scratch("input-huge");
        store_limbs(
            &input,
            &harness_preimages(Variant::Tester, 3, 2, 4).unwrap(),
            ByteOrder::Reversed,
        )
        .unwrap();

        let mut app = App::new(Null::new(), Variant::Tester, Logger::disabled()).unwrap();
        let result = run(
            &mut app,
            &Run {
                transfers: usize::MAX,
                arity: 3,
                input: input.clone(),
                output: None,
            },
        );

        assert!(matches!(result, Err(Error::MalformedInput(_))));
        std::fs::remove_file(&input).unwrap();
    }

    #[test]
    fn unsupported_arity_fails_before_loading() {
        let mut app = App::new(Null::new(), Variant::Tester, Logger::disabled()).unwrap();
        let result = run(
            &mut app,
            &Run {
                transfers: 1,
                arity: 2,
                input: scratch("never-read"),
                output: None,
            },
        );
        assert!(matches!(result, Err(Error::UnsupportedArity { arity: 2, .. })));
    }
}
