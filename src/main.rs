mod cli;
mod error;
mod output;

use crate::cli::Args;
use crate::error::{ErrorKind, Result};
use clap::Parser;
use embedpack_codegen::{GenerateOptions, Generator};
use embedpack_config::Config;
use embedpack_pack::Pipeline;
use exn::ResultExt;
use std::process::ExitCode;
use time::OffsetDateTime;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.log_level());
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        },
    }
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(false).init();
}

fn run(args: &Args) -> Result<()> {
    let config = Config::load(args.config.as_deref(), &args.overrides()).or_raise(|| ErrorKind::Config)?;
    let timestamp = match config.timestamp {
        Some(timestamp) => timestamp,
        None => u64::try_from(OffsetDateTime::now_utc().unix_timestamp()).or_raise(|| ErrorKind::Clock)?,
    };

    let manifest = Pipeline::new()
        .follow_symlinks(config.follow_symlinks)
        .process(&config.source)
        .or_raise(|| ErrorKind::Pack)?;

    let options = GenerateOptions::new(config.generated_by, timestamp).with_cfg(config.cfg);
    let source = Generator::new()
        .and_then(|generator| generator.render(&manifest, &options))
        .or_raise(|| ErrorKind::Generate)?;

    output::write_atomic(&config.output, source.as_bytes())?;
    tracing::info!(
        output = %config.output.display(),
        assets = manifest.len(),
        bytes = source.len(),
        "Wrote embedded asset module"
    );
    Ok(())
}
