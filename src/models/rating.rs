use serde::{Deserialize, Serialize};

use super::MovieId;

/// Unique identifier for a user in the ratings table
pub type UserId = u32;

/// A row of the ratings table, as loaded from `ratings.csv`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Rating {
    /// User who submitted the rating
    #[serde(rename = "userId")]
    pub user_id: UserId,
    /// Movie the rating applies to
    #[serde(rename = "movieId")]
    pub movie_id: MovieId,
    /// Star rating, 0.5 to 5.0 in the MovieLens data
    pub rating: f32,
    /// Unix timestamp of the submission
    pub timestamp: i64,
}
