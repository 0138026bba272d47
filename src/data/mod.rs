use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{Movie, MovieId, Rating, Tag};

pub mod matrix;

/// Errors raised while loading the dataset at startup
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to open {name}: {source}")]
    Open {
        name: String,
        source: std::io::Error,
    },

    #[error("failed to parse {name}: {source}")]
    Parse { name: String, source: csv::Error },
}

/// The three source tables, loaded once and frozen for the process lifetime.
///
/// There is no reload mechanism and no write path; every view of the data is
/// a borrow from these vectors.
#[derive(Debug)]
pub struct Dataset {
    pub movies: Vec<Movie>,
    pub ratings: Vec<Rating>,
    pub tags: Vec<Tag>,
}

impl Dataset {
    /// Loads `movies.csv`, `ratings.csv` and `tags.csv` from `dir`.
    ///
    /// Any missing file or malformed row fails the load; the caller decides
    /// whether that aborts startup (it does, in `main`).
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let dir = dir.as_ref();
        Ok(Self {
            movies: read_table(dir, "movies.csv")?,
            ratings: read_table(dir, "ratings.csv")?,
            tags: read_table(dir, "tags.csv")?,
        })
    }

    /// Builds a dataset from in-memory CSV text, for tests
    pub fn from_readers<M, R, T>(movies: M, ratings: R, tags: T) -> Result<Self, DatasetError>
    where
        M: Read,
        R: Read,
        T: Read,
    {
        Ok(Self {
            movies: parse_table("movies.csv", movies)?,
            ratings: parse_table("ratings.csv", ratings)?,
            tags: parse_table("tags.csv", tags)?,
        })
    }

    /// Movie rows whose id is in `ids`, in movie-table order.
    ///
    /// Table order, not the order of `ids`: recommendation lists are joined
    /// back against the catalog the same way the table is stored.
    pub fn movies_with_ids(&self, ids: &[MovieId]) -> Vec<&Movie> {
        let wanted: HashSet<MovieId> = ids.iter().copied().collect();
        self.movies
            .iter()
            .filter(|m| wanted.contains(&m.movie_id))
            .collect()
    }
}

fn read_table<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<Vec<T>, DatasetError> {
    let path = dir.join(name);
    let file = File::open(&path).map_err(|source| DatasetError::Open {
        name: path.display().to_string(),
        source,
    })?;
    parse_table(name, file)
}

fn parse_table<T: DeserializeOwned, R: Read>(name: &str, reader: R) -> Result<Vec<T>, DatasetError> {
    let mut reader = csv::Reader::from_reader(reader);
    reader
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()
        .map_err(|source| DatasetError::Parse {
            name: name.to_string(),
            source,
        })
}
