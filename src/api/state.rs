use std::sync::Arc;
use std::time::Duration;

use crate::data::matrix::RatingMatrix;
use crate::data::Dataset;
use crate::services::CosineKnnIndex;
use crate::session::SessionStore;

/// Shared application state
///
/// Everything except the session store is frozen after construction: the
/// dataset, the pivoted rating matrix and the fitted index are read-only and
/// reach handlers through this context object rather than any global.
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub matrix: Arc<RatingMatrix>,
    pub index: Arc<CosineKnnIndex>,
    pub sessions: SessionStore,
    /// Neighbor users consulted per recommendation
    pub neighbor_count: usize,
}

impl AppState {
    /// Builds the state from a loaded dataset: pivots the rating matrix and
    /// fits the similarity index once
    pub fn new(dataset: Dataset, neighbor_count: usize, session_ttl: Duration) -> Self {
        let matrix = RatingMatrix::from_ratings(&dataset.ratings);
        let index = CosineKnnIndex::fit(&matrix);

        Self {
            dataset: Arc::new(dataset),
            matrix: Arc::new(matrix),
            index: Arc::new(index),
            sessions: SessionStore::new(session_ttl),
            neighbor_count,
        }
    }
}
