//! vmmsim entry point
//!
//! Command-line driver: parse arguments, open the address trace and
//! the backing store, push every address through the MMU and print the
//! per-translation lines followed by the final report.

use std::env;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use vmmsim::config::SimConfig;
use vmmsim::{utils, AddressTrace, BackingStore, Error, Mmu, VERSION};

fn main() -> ExitCode {
    utils::log::init();

    let config = match SimConfig::from_args(env::args()) {
        Ok(config) => config,
        Err(Error::Usage) => {
            let program = env::args().next().unwrap_or_else(|| "vmmsim".into());
            eprintln!("Usage: {} <address file>", program);
            return ExitCode::FAILURE;
        }
        Err(err) => {
            eprintln!("vmmsim: {}", err);
            return ExitCode::FAILURE;
        }
    };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("vmmsim: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &SimConfig) -> vmmsim::Result<()> {
    config.validate()?;
    log::info!("vmmsim v{}", VERSION);

    let trace = AddressTrace::open(&config.trace_path)?;
    let store = BackingStore::open(&config.store_path)?;
    let mut mmu = Mmu::new(store);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for logical in trace {
        let t = mmu.translate(logical)?;
        writeln!(
            out,
            "Logical address: {} Physical address: {} Value: {}",
            t.logical, t.physical, t.value
        )?;
    }

    write!(out, "{}", mmu.stats().report())?;
    out.flush()?;
    Ok(())
}
