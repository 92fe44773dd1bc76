use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

pub const DEFAULT_CENTER: &str = "Kevin Bacon";

/// Six degrees of Kevin Bacon over an actor/movie dataset
#[derive(Parser, Debug, Clone)]
#[command(name = "bacon")]
#[command(author, version, about, long_about = None)]
pub struct Settings {
    /// Directory holding the three dataset files
    #[arg(long, env = "BACON_DATA_DIR", default_value = "PS4", global = true)]
    pub data_dir: PathBuf,

    /// `<actor_id>|<name>` file, relative to the data directory
    #[arg(long, env = "BACON_ACTORS_FILE", default_value = "actors.txt", global = true)]
    pub actors_file: PathBuf,

    /// `<movie_id>|<title>` file, relative to the data directory
    #[arg(long, env = "BACON_MOVIES_FILE", default_value = "movies.txt", global = true)]
    pub movies_file: PathBuf,

    /// `<movie_id>|<actor_id>` file, relative to the data directory
    #[arg(long, env = "BACON_MOVIE_ACTORS_FILE", default_value = "movie-actors.txt", global = true)]
    pub movie_actors_file: PathBuf,

    /// Actor at the center of the universe on startup
    #[arg(long, env = "BACON_CENTER", default_value = DEFAULT_CENTER, global = true)]
    pub center: String,

    /// Log profile-computation progress every N actors
    #[arg(
        long,
        env = "BACON_PROGRESS_INTERVAL",
        default_value_t = 100,
        value_parser = clap::value_parser!(u64).range(1..),
        global = true
    )]
    pub progress_interval: u64,

    /// Output format for reports
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Explicit tracing filter (e.g. `debug`, `bacon_core=trace`)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactive game loop (default)
    Play,

    /// Path from an actor back to the center
    Path {
        actor: String,
    },

    /// Actors the center cannot reach
    Unreached,

    /// Summary of the loaded graph and current universe
    Status,

    /// Actors by average separation: N lowest, or -N highest
    BestSeparation {
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },

    /// Actors by costar count: N lowest, or -N highest
    BestCostars {
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },

    /// Run the built-in seven-actor example; needs no dataset
    Demo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Settings {
    pub fn actors_path(&self) -> PathBuf {
        self.data_dir.join(&self.actors_file)
    }

    pub fn movies_path(&self) -> PathBuf {
        self.data_dir.join(&self.movies_file)
    }

    pub fn movie_actors_path(&self) -> PathBuf {
        self.data_dir.join(&self.movie_actors_file)
    }

    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Play)
    }
}
