use anyhow::{anyhow, Result};
use is_terminal::IsTerminal;
use lnid::args::{self, Invocation, USAGE};
use lnid::calculate;
use lnid::error::LnidError;
use lnid::help;
use lnid::operands::open_all;
use lnid::style::ColorChoice;
use std::io;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env("LNID_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let config = match args::parsed() {
        Ok(Invocation::Help) => return help::print(ColorChoice::Auto),
        Ok(Invocation::Index(config)) => config,
        Err(LnidError::Syntax(complaint)) => return Err(anyhow!("{complaint}\n{USAGE}")),
        Err(e) => return Err(e.into()),
    };

    let operands = open_all(&config.files)?;
    if io::stdout().is_terminal() {
        calculate(&config, operands, io::stdout().lock())?;
    } else {
        calculate(&config, operands, io::BufWriter::new(io::stdout().lock()))?;
    }
    Ok(())
}
