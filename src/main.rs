//! CLI entry point for the synthetic patch generator

use clap::Parser;
use patchsynth::io::cli::{BatchWriter, Cli};

fn main() -> patchsynth::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut writer = BatchWriter::new(cli);
    writer.process().map(|_| ())
}
