use serde::{Deserialize, Serialize};

use super::{MovieId, UserId};

/// A row of the tag table, as loaded from `tags.csv`
///
/// Tags are free-text labels users attach to movies. They are loaded and
/// displayed but feed no computation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tag {
    /// User who applied the tag
    #[serde(rename = "userId")]
    pub user_id: UserId,
    /// Movie the tag applies to
    #[serde(rename = "movieId")]
    pub movie_id: MovieId,
    /// Free-text tag label
    pub tag: String,
    /// Unix timestamp of the application
    pub timestamp: i64,
}
