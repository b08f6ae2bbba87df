use std::process::ExitCode;

use crate::args::Parsed;
use crate::client::HttpClient;

mod args;
pub mod client;
mod runner;
mod statistics;

fn main() -> ExitCode {
    init_tracing();
    let argv: Vec<String> = std::env::args().collect();
    let program = program_name(&argv);
    let config = match args::parse(&argv) {
        Ok(Parsed::Help) => {
            print!("{}", args::usage(&program));
            return ExitCode::SUCCESS;
        }
        Ok(Parsed::Run(config)) => config,
        Err(err) => {
            tracing::debug!(%err, "rejected arguments");
            print!("{}", args::usage(&program));
            return ExitCode::from(1);
        }
    };
    tracing::debug!(?config, "parsed configuration");
    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(err) => {
            eprintln!("{program}: failed to build runtime: {err}");
            return ExitCode::from(1);
        }
    };
    let _guard = rt.enter();
    match rt.block_on(runner::run(config.into(), HttpClient::new())) {
        Ok(average) => {
            println!("TOTAL AVERAGE ELAPSED TIME: {average:.2}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{program}: {err:#}");
            ExitCode::from(1)
        }
    }
}

/// Diagnostics go to stderr so the stdout report stays machine-readable.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}

fn program_name(argv: &[String]) -> String {
    argv.first()
        .map(String::as_str)
        .and_then(|p| std::path::Path::new(p).file_name())
        .and_then(|f| f.to_str())
        .unwrap_or(env!("CARGO_PKG_NAME"))
        .to_string()
}
