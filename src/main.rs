use clap::Parser;
use std::process::ExitCode;
use techdash::cli::{guarded, install_panic_hook, run, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    install_panic_hook();
    guarded(|| run(cli))
}
