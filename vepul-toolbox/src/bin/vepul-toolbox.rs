mod cli;

use color_eyre::Report;
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Report> {
    color_eyre::install()?;
    let cli = cli::Cli::from_args();
    init_tracing(cli.verbose);
    cli.exec()
}
