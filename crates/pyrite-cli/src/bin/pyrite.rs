//! Batch checker entry point: parse arguments, run the driver, map its
//! result onto the process exit code.

use clap::Parser;
use pyrite_cli::args::CliArgs;
use pyrite_cli::driver;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "pyrite=warn".to_string()))
        .init();

    let args = CliArgs::parse();
    let exit_code = match driver::run(args) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{error:#}");
            driver::EXIT_CONFIGURATION_OR_IO_ERROR
        }
    };
    std::process::exit(exit_code);
}
