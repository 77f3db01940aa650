use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use clap::Parser;
use querytube_cli::args::{Cli, Command};
use querytube_cli::{app, commands};
use querytube_observability::tracing_setup::events;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match app::resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => return startup_failure(&e),
    };
    querytube_observability::init_tracing(&config.observability);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let result = match &cli.command {
        Command::Prepare { output } => {
            commands::prepare(&config, output.as_deref(), &mut out).map(|_| ())
        }
        command => {
            let service = match app::build_service(&config) {
                Ok(service) => service,
                Err(e) => return startup_failure(&e),
            };
            match command {
                Command::Search { query, k, json } => {
                    commands::search(&service, query, *k, *json, &mut out).map(|_| ())
                }
                Command::Repl { k } => {
                    commands::repl(&service, *k, io::stdin().lock(), &mut out).map(|_| ())
                }
                Command::Inspect => commands::inspect(&service, &mut out),
                Command::Prepare { .. } => Ok(()),
            }
        }
    };

    if let Err(e) = result.and_then(|()| out.flush().map_err(Into::into)) {
        eprintln!("error: {e:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn startup_failure(error: &anyhow::Error) -> ExitCode {
    events::startup_failed(&format!("{error:#}"));
    eprintln!("error: {error:#}");
    ExitCode::FAILURE
}
