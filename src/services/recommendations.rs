use std::cmp::Ordering;

use tracing::debug;

use crate::data::matrix::RatingMatrix;
use crate::error::{AppError, AppResult};
use crate::models::{MovieId, UserId};
use crate::services::similarity::CosineKnnIndex;

/// Upper bound on the length of a recommendation list
pub const MAX_RECOMMENDATIONS: usize = 6;

/// Computes the top movie recommendations for a user.
///
/// Finds the `num_neighbors` users nearest to the target by cosine distance,
/// averages their ratings per movie, keeps the movies where the target's own
/// stored rating is exactly 0.0 (an unrated cell and a literal zero rating
/// are the same thing in the dense matrix), and returns the ids of the top
/// `MAX_RECOMMENDATIONS` by descending average. Ties keep ascending movie-id
/// order.
///
/// A user id with no row in the matrix is a not-found error.
pub fn recommend_for_user(
    matrix: &RatingMatrix,
    index: &CosineKnnIndex,
    user_id: UserId,
    num_neighbors: usize,
) -> AppResult<Vec<MovieId>> {
    let position = matrix
        .user_position(user_id)
        .ok_or_else(|| AppError::NotFound(format!("user {user_id} has no ratings")))?;
    let user_row = matrix.row(position);

    // The query row is its own nearest match at distance 0, so ask for one
    // extra neighbor and drop the first result. The index always holds the
    // user's own row, so there is at least one result to drop.
    let neighbors = index.kneighbors(user_row, num_neighbors + 1);
    let neighbors = &neighbors[1..];

    let mut scored: Vec<(MovieId, f32)> = Vec::new();
    for column in 0..matrix.n_movies() {
        if user_row[column] != 0.0 {
            continue;
        }
        let sum: f32 = neighbors
            .iter()
            .map(|neighbor| index.row(neighbor.index)[column])
            .sum();
        let average = if neighbors.is_empty() {
            0.0
        } else {
            sum / neighbors.len() as f32
        };
        scored.push((matrix.movie_id_at(column), average));
    }

    // Stable sort: equal averages stay in ascending movie-id order.
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored.truncate(MAX_RECOMMENDATIONS);

    let recommendations: Vec<MovieId> = scored.into_iter().map(|(id, _)| id).collect();
    debug!(
        user_id,
        neighbors = neighbors.len(),
        count = recommendations.len(),
        "computed recommendations"
    );
    Ok(recommendations)
}
