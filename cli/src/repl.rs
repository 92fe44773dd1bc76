use std::io::{BufRead, Write};

use serde::Serialize;

use crate::config::OutputFormat;
use crate::costars::CostarGraph;
use crate::demo;
use crate::error::{CliError, Result};
use crate::profiles::Profiles;
use crate::status::Status;
use crate::universe::Universe;

const HELP: &[&str] = &[
    "u <actor>   make <actor> the center of the universe",
    "p <actor>   path from <actor> to the center",
    "i           actors the center cannot reach",
    "c <n>       n lowest (or -n highest) average separations",
    "r <n>       n fewest (or -n most) costars",
    "s           status",
    "t           run the built-in example",
    "h           this help",
    "q           quit",
];

/// One parsed line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Center(String),
    Path(String),
    Unconnected,
    BestSeparation(i64),
    BestCostars(i64),
    Status,
    Demo,
    Help,
    Quit,
    Empty,
    Usage(&'static str),
    Unknown(String),
}

impl Request {
    /// The command is the first whitespace-separated token; the argument is
    /// the rest of the line, trimmed.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (command, argument) = match line.split_once(char::is_whitespace) {
            Some((command, argument)) => (command, argument.trim()),
            None => (line, ""),
        };

        match command {
            "" => Request::Empty,
            "u" if argument.is_empty() => Request::Usage("u <actor>"),
            "p" if argument.is_empty() => Request::Usage("p <actor>"),
            "u" => Request::Center(argument.to_string()),
            "p" => Request::Path(argument.to_string()),
            "i" => Request::Unconnected,
            "c" => argument
                .parse()
                .map_or(Request::Usage("c <number>"), Request::BestSeparation),
            "r" => argument
                .parse()
                .map_or(Request::Usage("r <number>"), Request::BestCostars),
            "s" => Request::Status,
            "t" => Request::Demo,
            "h" | "?" => Request::Help,
            "q" => Request::Quit,
            other => Request::Unknown(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Game state: the costar graph, the current universe and the lazily
/// computed actor profiles.
pub struct Session<'g> {
    graph: &'g CostarGraph,
    universe: Universe<'g>,
    profiles: Option<Profiles>,
    format: OutputFormat,
    progress_interval: u64,
}

impl<'g> Session<'g> {
    pub fn new(
        graph: &'g CostarGraph,
        center: &str,
        format: OutputFormat,
        progress_interval: u64,
    ) -> Result<Self> {
        Ok(Self {
            graph,
            universe: Universe::new(graph, center)?,
            profiles: None,
            format,
            progress_interval: progress_interval.max(1),
        })
    }

    /// Read commands until `q` or end of input.
    ///
    /// Unknown actors are reported and the loop continues; I/O failures end it.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        let mut lines = input.lines();
        loop {
            write!(out, "{} game $ ", self.universe.center())?;
            out.flush()?;

            let Some(line) = lines.next() else {
                writeln!(out)?;
                return Ok(());
            };

            match self.execute(Request::parse(&line?), out) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => return Ok(()),
                Err(CliError::UnknownActor(name)) => {
                    tracing::debug!(actor = %name, "unknown actor");
                    writeln!(out, "Actor not found!")?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    pub fn execute<W: Write>(&mut self, request: Request, out: &mut W) -> Result<Flow> {
        let format = self.format;
        match request {
            Request::Center(actor) => {
                self.universe = Universe::new(self.graph, &actor)?;
                let status = Status::collect(&self.universe);
                emit(format, out, &status, vec![self.universe.summary()])?;
            }
            Request::Path(actor) => {
                let report = self.universe.path_report(&actor)?;
                emit(format, out, &report, report.lines())?;
            }
            Request::Unconnected => {
                let names = self.universe.unconnected();
                let line = format!(
                    "The following actors can't be reached from {}: {}",
                    self.universe.center(),
                    names.join(", ")
                );
                emit(format, out, &names, vec![line])?;
            }
            Request::BestSeparation(_) | Request::BestCostars(_) if self.profiles()?.is_empty() => {
                let none: [&str; 0] = [];
                emit(format, out, &none, vec!["No actor has any costars.".to_string()])?;
            }
            Request::BestSeparation(amount) => {
                let best = self.profiles()?.best_by_separation(amount);
                let lines = best
                    .iter()
                    .map(|p| format!("{} - {}", p.name, p.average_separation))
                    .collect();
                emit(format, out, &best, lines)?;
            }
            Request::BestCostars(amount) => {
                let best = self.profiles()?.best_by_costars(amount);
                let lines = best
                    .iter()
                    .map(|p| format!("{} - {}", p.name, p.costars))
                    .collect();
                emit(format, out, &best, lines)?;
            }
            Request::Status => {
                let status = Status::collect(&self.universe);
                emit(format, out, &status, status.lines())?;
            }
            Request::Demo => demo::run(out)?,
            Request::Help => {
                for line in HELP {
                    writeln!(out, "{line}")?;
                }
            }
            Request::Quit => return Ok(Flow::Quit),
            Request::Empty => {}
            Request::Usage(usage) => writeln!(out, "usage: {usage}")?,
            Request::Unknown(command) => {
                tracing::debug!(%command, "unrecognized command");
                writeln!(out, "Command not recognized.")?;
            }
        }
        Ok(Flow::Continue)
    }

    /// Computed on first use; one BFS per actor.
    fn profiles(&mut self) -> Result<&Profiles> {
        let profiles = match self.profiles.take() {
            Some(profiles) => profiles,
            None => {
                let profiles = Profiles::compute(self.graph, self.progress_interval)?;
                tracing::debug!(profiles = profiles.len(), "cached actor profiles");
                profiles
            }
        };
        Ok(self.profiles.insert(profiles))
    }
}

fn emit<W: Write, T: Serialize + ?Sized>(
    format: OutputFormat,
    out: &mut W,
    value: &T,
    lines: Vec<String>,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for line in lines {
                writeln!(out, "{line}")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, value)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
