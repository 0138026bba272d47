use serde::{Deserialize, Serialize};

/// Unique identifier for a movie in the catalog
pub type MovieId = u32;

/// A row of the movie table, as loaded from `movies.csv`
///
/// Field names keep the MovieLens column headers, so CSV ingest and JSON
/// responses both use the spelling the source data does.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    /// Unique identifier for the movie
    #[serde(rename = "movieId")]
    pub movie_id: MovieId,
    /// Display title, usually with the release year in parentheses
    pub title: String,
    /// Pipe-delimited genre list (e.g. "Comedy|Romance")
    pub genres: String,
}

impl Movie {
    /// Splits the delimited genre field into individual genre names
    pub fn genre_list(&self) -> Vec<&str> {
        self.genres.split('|').filter(|g| !g.is_empty()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_json_keeps_csv_column_names() {
        let movie = Movie {
            movie_id: 1,
            title: "Toy Story (1995)".to_string(),
            genres: "Adventure|Animation|Children|Comedy|Fantasy".to_string(),
        };

        let json = serde_json::to_value(&movie).unwrap();
        assert_eq!(json["movieId"], 1);
        assert_eq!(json["title"], "Toy Story (1995)");
        assert_eq!(json["genres"], "Adventure|Animation|Children|Comedy|Fantasy");
    }

    #[test]
    fn test_genre_list_splits_on_pipe() {
        let movie = Movie {
            movie_id: 2,
            title: "Jumanji (1995)".to_string(),
            genres: "Adventure|Children|Fantasy".to_string(),
        };
        assert_eq!(movie.genre_list(), vec!["Adventure", "Children", "Fantasy"]);
    }

    #[test]
    fn test_genre_list_empty_field() {
        let movie = Movie {
            movie_id: 3,
            title: "Untitled".to_string(),
            genres: String::new(),
        };
        assert!(movie.genre_list().is_empty());
    }
}
