use clap::Parser as _;
use tracing_subscriber::EnvFilter;

use self::command::CommandArgs;

mod command;
mod data;
mod render;
mod tui;
mod util;

fn main() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_tracing(args.verbose);
    command::run(args)
}

/// Logs go to stderr so that stdout stays clean for command output.
///
/// `-v` raises the level to `debug`, `-vv` to `trace`. Without it, `RUST_LOG`
/// is honored and the default is `info`.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
