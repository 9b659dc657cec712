//! tonegen - play the built-in melody on the default output device
//!
//! Run with: cargo run
//! Log level comes from RUST_LOG (default: info).

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use tonegen::{
    assemble,
    io::{self, CpalSink, PlaybackConfig},
    sequencing,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let melody = sequencing::demo().wrap_err("failed to build melody")?;
    let signal = assemble(&melody).wrap_err("failed to generate melody")?;
    info!("generated melody");

    let config = PlaybackConfig::default();
    let sink = CpalSink::open(&config).wrap_err("failed to open audio output")?;
    io::play(sink, &signal, config.frames_per_buffer).wrap_err("failed to play melody")?;

    Ok(())
}
