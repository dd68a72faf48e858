use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error};

use oddity_cli::{Args, error_adapter::to_reportable};

/// Logging at the requested level, `warn` when the level is not recognised.
fn init_logging(level: &str) {
    let filter = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Unknown log level `{level}`, logging warnings only");
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(filter)
        .init();
}

/// Renders the error as a miette report.
fn render_report(err: &oddity::OddityError) -> String {
    let mut report = String::new();
    miette::GraphicalReportHandler::new()
        .render_report(&mut report, &to_reportable(err))
        .expect("Writing to String buffer is infallible");
    report
}

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();
    init_logging(&args.log_level);
    debug!(args:?; "Parsed arguments");

    if let Err(err) = oddity_cli::run(&args) {
        error!("{}", render_report(&err));
        process::exit(1);
    }
}
