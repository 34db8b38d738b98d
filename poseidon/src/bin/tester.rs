use std::path::PathBuf;

use argh::FromArgs;
use tracing::error;

use trident_poseidon::{
    fpga,
    tester::{self, Run},
    App, Error, Logger, Variant,
};

#[derive(FromArgs)]
/// Stream Poseidon preimages to the FPGA, optionally compare the hashes it returns.
struct Args {
    /// number of times the input file is written
    #[argh(positional)]
    transfer_count: usize,

    /// limbs per record, domain tag included (3, 9 or 12)
    #[argh(positional)]
    arity: usize,

    /// preimages, one 64-digit hex word each
    #[argh(positional)]
    input_file: PathBuf,

    /// golden hashes, one 64-digit hex word each
    #[argh(positional)]
    output_file: Option<PathBuf>,
}

fn main() {
    let args: Args = argh::from_env();
    let logger = Logger::stdout();

    let run = Run {
        transfers: args.transfer_count,
        arity: args.arity,
        input: args.input_file,
        output: args.output_file,
    };

    let summary = App::new(fpga(), Variant::Tester, logger.clone())
        .and_then(|mut app| tester::run(&mut app, &run));

    match summary {
        Ok(summary) => {
            if summary.compared.is_some() {
                if summary.passed() {
                    println!("\n==> SUCCESS <==");
                } else {
                    println!("\n==> FAILURE <==");
                    std::process::exit(1);
                }
            }
        }
        Err(err) => {
            logger.scope(|| error!("{}", err));
            if matches!(err, Error::UnsupportedArity { .. } | Error::MalformedInput(_)) {
                eprintln!("Usage: trident-tester transfer_count arity input_file [output_file]");
            }
            std::process::exit(1);
        }
    }
}
