//! CLI entry point for the SpeedBinB image descrambler

use clap::Parser;
use unbinb::io::cli::{Cli, JobRunner};

fn main() -> unbinb::Result<()> {
    let cli = Cli::parse();
    let mut runner = JobRunner::new(cli);
    runner.run()
}
