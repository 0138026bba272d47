use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::models::{MovieId, Rating, UserId};

/// Dense user-by-movie pivot of the ratings table.
///
/// Rows are the distinct user ids and columns the distinct movie ids present
/// in the ratings, both ascending. A cell holds the user's rating for the
/// movie, 0.0 when absent; a stored rating of zero is indistinguishable from
/// no rating. Duplicate (user, movie) pairs are aggregated by mean. Built
/// once at startup and never updated.
#[derive(Debug, Clone)]
pub struct RatingMatrix {
    user_ids: Vec<UserId>,
    movie_ids: Vec<MovieId>,
    user_positions: HashMap<UserId, usize>,
    /// Row-major, `user_ids.len() * movie_ids.len()` cells
    values: Vec<f32>,
}

impl RatingMatrix {
    /// Pivots the ratings table into the dense matrix
    pub fn from_ratings(ratings: &[Rating]) -> Self {
        // BTree keys double as the sorted axis sets.
        let mut cells: BTreeMap<UserId, BTreeMap<MovieId, (f64, u32)>> = BTreeMap::new();
        let mut movie_set: BTreeSet<MovieId> = BTreeSet::new();

        for rating in ratings {
            movie_set.insert(rating.movie_id);
            let (sum, count) = cells
                .entry(rating.user_id)
                .or_default()
                .entry(rating.movie_id)
                .or_insert((0.0, 0));
            *sum += f64::from(rating.rating);
            *count += 1;
        }

        let user_ids: Vec<UserId> = cells.keys().copied().collect();
        let movie_ids: Vec<MovieId> = movie_set.into_iter().collect();
        let user_positions: HashMap<UserId, usize> = user_ids
            .iter()
            .enumerate()
            .map(|(pos, &id)| (id, pos))
            .collect();
        let movie_positions: HashMap<MovieId, usize> = movie_ids
            .iter()
            .enumerate()
            .map(|(pos, &id)| (id, pos))
            .collect();

        let mut values = vec![0.0; user_ids.len() * movie_ids.len()];
        for (row, per_movie) in cells.values().enumerate() {
            for (movie_id, &(sum, count)) in per_movie {
                let col = movie_positions[movie_id];
                values[row * movie_ids.len() + col] = (sum / f64::from(count)) as f32;
            }
        }

        Self {
            user_ids,
            movie_ids,
            user_positions,
            values,
        }
    }

    /// Number of distinct users (matrix rows)
    pub fn n_users(&self) -> usize {
        self.user_ids.len()
    }

    /// Number of distinct movies (matrix columns)
    pub fn n_movies(&self) -> usize {
        self.movie_ids.len()
    }

    /// Row position for a user id, `None` when the user has no ratings
    pub fn user_position(&self, user_id: UserId) -> Option<usize> {
        self.user_positions.get(&user_id).copied()
    }

    /// The user's full rating vector
    pub fn row(&self, position: usize) -> &[f32] {
        let width = self.movie_ids.len();
        &self.values[position * width..(position + 1) * width]
    }

    /// Movie id for a column position
    pub fn movie_id_at(&self, column: usize) -> MovieId {
        self.movie_ids[column]
    }

    /// Distinct user ids, ascending
    pub fn user_ids(&self) -> &[UserId] {
        &self.user_ids
    }

    /// Distinct movie ids, ascending
    pub fn movie_ids(&self) -> &[MovieId] {
        &self.movie_ids
    }
}
