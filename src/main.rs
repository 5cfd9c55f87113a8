use bench_plot::{cli::Cli, Error};

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Usage and pattern errors are printed as a plain line.
fn exit_usage(err: Error) -> ! {
    println!("{err}");
    std::process::exit(1);
}

/// Print a clap error (or the --help/--version text it carries). Usage
/// errors exit 1 rather than clap's 2.
fn exit_parse_error(err: clap::Error) -> ! {
    let code = if err.use_stderr() { 1 } else { 0 };
    if let Err(write_err) = err.print() {
        eprintln!("bench-plot: failed to print usage: {write_err}");
        std::process::exit(1);
    }
    std::process::exit(code);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = match Cli::try_parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(err) => exit_parse_error(err),
    };
    init_logging(cli.verbose);

    let config = cli.into_config().unwrap_or_else(|err| exit_usage(err));
    log::debug!("{config:?}");

    match bench_plot::run(&config) {
        Ok(spec) => {
            log::debug!(
                "plotted {} packages, {} benchmarks on {}x{}",
                spec.packages.len(),
                spec.names.len(),
                spec.grid.rows,
                spec.grid.columns
            );
            Ok(())
        }
        Err(err) if err.is_usage() => exit_usage(err),
        Err(err) => Err(err.into()),
    }
}
