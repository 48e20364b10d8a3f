mod cli;
mod detector;
mod error;
mod trigger;

use std::process::ExitCode;

use bloomwall_core::WindowCounter;
use clap::Parser;
use log::info;

use cli::{Args, DetectorConfig};
use detector::Detector;
use error::CliError;
use trigger::Trigger;

fn main() -> ExitCode {
    env_logger::init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    // cmd_template is tokenized once up front: a malformed template is
    // a configuration error, caught before any counters are allocated.
    let trigger = Trigger::parse(&args.cmd_template)?;

    let config = DetectorConfig::from_args(&args)?;
    let counter = WindowCounter::new(
        config.capacity,
        config.error_rate,
        config.window_specs,
        0,
    )?;

    info!(
        "bloomwall starting: capacity={} error_rate={} k={} m={} thresholds=[{}, {}, {}]",
        config.capacity,
        config.error_rate,
        counter.k(),
        counter.m(),
        args.t1,
        args.t2,
        args.t3,
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .enable_io()
        .build()
        .map_err(CliError::runtime_init)?;

    runtime.block_on(async move {
        let detector = Detector::new(counter, trigger);
        detector.run(tokio::io::stdin()).await
    })
}
