use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::config::Settings;
use crate::error::{CliError, Result};

pub type ActorId = u32;
pub type MovieId = u32;

/// Raw tables from the three dataset files.
///
/// BTreeMaps keep everything in id order, which makes graph construction
/// (and therefore BFS tie-breaking) reproducible across runs.
#[derive(Debug, Default, Clone)]
pub struct Dataset {
    pub actors: BTreeMap<ActorId, String>,
    pub movies: BTreeMap<MovieId, String>,
    pub casts: BTreeMap<MovieId, BTreeSet<ActorId>>,
}

/// Read actors, movies and movie casts from the configured data directory.
pub fn load_dataset(settings: &Settings) -> Result<Dataset> {
    let start = Instant::now();

    let actors_path = settings.actors_path();
    let actors = parse_names(open(&actors_path)?, &actors_path)?;

    let movies_path = settings.movies_path();
    let movies = parse_names(open(&movies_path)?, &movies_path)?;

    let casts_path = settings.movie_actors_path();
    let casts = parse_casts(open(&casts_path)?, &casts_path)?;

    tracing::info!(
        actors = actors.len(),
        movies = movies.len(),
        casts = casts.len(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "loaded dataset"
    );

    Ok(Dataset { actors, movies, casts })
}

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path).map(BufReader::new).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Line parsing
// ---------------------------------------------------------------------------

/// Parse `<id>|<name>` lines. A repeated id keeps the last name seen.
pub fn parse_names<R: BufRead>(reader: R, path: &Path) -> Result<BTreeMap<u32, String>> {
    let mut names = BTreeMap::new();

    for_each_record(reader, path, |line_no, id, name| {
        let id = parse_id(id, path, line_no)?;
        if name.is_empty() {
            return Err(parse_error(path, line_no, "missing name"));
        }
        if names.insert(id, name.to_string()).is_some() {
            tracing::warn!(path = %path.display(), line = line_no, id, "duplicate id, keeping last");
        }
        Ok(())
    })?;

    Ok(names)
}

/// Parse `<movie_id>|<actor_id>` lines into per-movie casts.
pub fn parse_casts<R: BufRead>(reader: R, path: &Path) -> Result<BTreeMap<MovieId, BTreeSet<ActorId>>> {
    let mut casts: BTreeMap<MovieId, BTreeSet<ActorId>> = BTreeMap::new();

    for_each_record(reader, path, |line_no, movie, actor| {
        let movie = parse_id(movie, path, line_no)?;
        let actor = parse_id(actor, path, line_no)?;
        casts.entry(movie).or_default().insert(actor);
        Ok(())
    })?;

    Ok(casts)
}

/// Split every non-blank line into its first two `|`-separated fields.
fn for_each_record<R, F>(reader: R, path: &Path, mut f: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(usize, &str, &str) -> Result<()>,
{
    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = line.split('|');
        let first = fields.next().unwrap_or_default();
        let second = fields
            .next()
            .ok_or_else(|| parse_error(path, line_no, "missing '|' delimiter"))?;
        f(line_no, first, second)?;
    }
    Ok(())
}

fn parse_id(field: &str, path: &Path, line_no: usize) -> Result<u32> {
    field
        .trim()
        .parse()
        .map_err(|_| parse_error(path, line_no, &format!("invalid id '{}'", field)))
}

fn parse_error(path: &Path, line: usize, reason: &str) -> CliError {
    CliError::Parse {
        path: path.to_path_buf(),
        line,
        reason: reason.to_string(),
    }
}

/// Seven linked actors, a detached pair, a loner and two dangling cast rows.
#[cfg(test)]
pub(crate) fn sample_dataset() -> Dataset {
    const ACTORS: &str = "1|Kevin Bacon\n2|Alice\n3|Bob\n4|Charlie\n5|Dartmouth (Earl thereof)\n\
                          6|Nobody\n7|Nobody's Friend\n8|Loner\n";
    const MOVIES: &str = "10|Footloose\n11|Apollo 13\n12|Tremors\n13|Nobody Knows\n14|Solo Act\n15|The Earl\n";
    const CASTS: &str = "10|1\n10|2\n10|3\n10|42\n11|2\n11|4\n12|3\n12|4\n13|6\n13|7\n14|8\n15|4\n15|5\n99|1\n";

    Dataset {
        actors: parse_names(ACTORS.as_bytes(), Path::new("actors.txt")).unwrap(),
        movies: parse_names(MOVIES.as_bytes(), Path::new("movies.txt")).unwrap(),
        casts: parse_casts(CASTS.as_bytes(), Path::new("movie-actors.txt")).unwrap(),
    }
}
