//! `bacon`: the six-degrees game over an actor/movie dataset.
//!
//! With no subcommand the interactive loop starts; every other subcommand
//! runs a single request against the configured center and exits.

mod config;
mod costars;
mod demo;
mod error;
mod load;
mod logging;
mod profiles;
mod repl;
mod status;
mod universe;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;

use crate::config::{Command, Settings};
use crate::costars::build_costar_graph;
use crate::error::Result;
use crate::repl::{Request, Session};

fn main() -> ExitCode {
    let settings = Settings::parse();

    if let Err(e) = logging::init_tracing(settings.verbose, settings.log_level.as_deref(), settings.log_json) {
        eprintln!("warning: {e}");
    }

    match run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "bacon failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(settings: &Settings) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let command = settings.command();
    if command == Command::Demo {
        return demo::run(&mut out);
    }

    let dataset = load::load_dataset(settings)?;
    let graph = build_costar_graph(&dataset);
    drop(dataset);

    let mut session = Session::new(&graph, &settings.center, settings.format, settings.progress_interval)?;

    let request = match command {
        Command::Play => {
            let stdin = io::stdin();
            return session.run(stdin.lock(), &mut out);
        }
        Command::Path { actor } => Request::Path(actor),
        Command::Unreached => Request::Unconnected,
        Command::Status => Request::Status,
        Command::BestSeparation { amount } => Request::BestSeparation(amount),
        Command::BestCostars { amount } => Request::BestCostars(amount),
        Command::Demo => Request::Demo,
    };

    session.execute(request, &mut out)?;
    out.flush()?;
    Ok(())
}
