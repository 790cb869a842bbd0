//! The movie record and the sample data file.

use crate::error::Result;

use serde::{Deserialize, Serialize};
use std::{fs, io, path};

/// Partition key attribute of the movies table.
pub const PARTITION_KEY: &str = "year";

/// Sort key attribute of the movies table.
pub const SORT_KEY: &str = "title";

/// One movie as stored in the table.
///
/// `info` holds arbitrary nested details (plot, rating, actors, genres...).
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Movie {
    /// Release year, the partition key.
    pub year: i32,
    /// Title, the sort key.
    pub title: String,
    /// Everything else.
    #[serde(default)]
    pub info: serde_json::Value,
}

impl Movie {
    /// The primary key of this movie.
    pub fn key(&self) -> MovieKey {
        MovieKey::new(self.year, self.title.clone())
    }
}

/// Primary key of a movie; serializes to the key attributes only.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct MovieKey {
    /// Release year.
    pub year: i32,
    /// Title.
    pub title: String,
}

impl MovieKey {
    /// Key of the movie released in `year` named `title`.
    pub fn new(year: i32, title: impl Into<String>) -> Self {
        Self {
            year,
            title: title.into(),
        }
    }
}

/// Parse a JSON array of movies.
pub fn from_str(text: &str) -> Result<Vec<Movie>> {
    let movies = serde_json::from_str(text)?;
    Ok(movies)
}

/// Read a JSON array of movies from `path`.
#[cfg_attr(feature = "tracing", tracing::instrument(err))]
pub fn load(path: &path::Path) -> Result<Vec<Movie>> {
    let file = io::BufReader::new(fs::File::open(path)?);
    let movies = serde_json::from_reader(file)?;
    Ok(movies)
}
