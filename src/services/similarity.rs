use std::cmp::Ordering;

use tracing::info;

use crate::data::matrix::RatingMatrix;

/// A single nearest-neighbor query result
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Row position in the fitted matrix
    pub index: usize,
    /// Cosine distance from the query vector, 0.0 for an identical direction
    pub distance: f32,
}

/// Brute-force cosine nearest-neighbor index over the rating matrix rows.
///
/// Fit once at startup; queries scan every row. There is no approximate
/// structure and no update path. Fitting also materializes the full pairwise
/// user-similarity matrix; no request path reads it.
#[derive(Debug, Clone)]
pub struct CosineKnnIndex {
    rows: Vec<Vec<f32>>,
    norms: Vec<f32>,
    similarity: Vec<Vec<f32>>,
}

impl CosineKnnIndex {
    /// Fits the index over every row of the rating matrix
    pub fn fit(matrix: &RatingMatrix) -> Self {
        let rows: Vec<Vec<f32>> = (0..matrix.n_users())
            .map(|row| matrix.row(row).to_vec())
            .collect();
        let norms: Vec<f32> = rows.iter().map(|row| norm(row)).collect();
        let similarity = pairwise_similarity(&rows, &norms);

        info!(
            users = rows.len(),
            movies = matrix.n_movies(),
            "fitted cosine nearest-neighbor index"
        );

        Self {
            rows,
            norms,
            similarity,
        }
    }

    /// The `k` rows nearest to `query`, ascending by cosine distance.
    ///
    /// Ties resolve to the lower row index. When `query` is itself a fitted
    /// row it comes back in its own result at distance 0; callers that want
    /// "other" rows drop the first entry.
    pub fn kneighbors(&self, query: &[f32], k: usize) -> Vec<Neighbor> {
        let query_norm = norm(query);
        let mut neighbors: Vec<Neighbor> = self
            .rows
            .iter()
            .zip(&self.norms)
            .enumerate()
            .map(|(index, (row, &row_norm))| Neighbor {
                index,
                distance: 1.0 - cosine(query, query_norm, row, row_norm),
            })
            .collect();

        // Stable sort over the enumeration order gives the index tie-break.
        neighbors.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal));
        neighbors.truncate(k);
        neighbors
    }

    /// Rating vector of a fitted row
    pub fn row(&self, index: usize) -> &[f32] {
        &self.rows[index]
    }

    /// Number of fitted rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the index was fit over an empty matrix
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Full pairwise user-similarity matrix, `len() x len()`
    pub fn user_similarity(&self) -> &[Vec<f32>] {
        &self.similarity
    }
}

fn norm(vector: &[f32]) -> f32 {
    vector.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Cosine similarity with precomputed norms; a zero-norm vector is similar to
/// nothing (0.0)
fn cosine(a: &[f32], a_norm: f32, b: &[f32], b_norm: f32) -> f32 {
    if a_norm == 0.0 || b_norm == 0.0 {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    dot / (a_norm * b_norm)
}

fn pairwise_similarity(rows: &[Vec<f32>], norms: &[f32]) -> Vec<Vec<f32>> {
    rows.iter()
        .zip(norms)
        .map(|(a, &a_norm)| {
            rows.iter()
                .zip(norms)
                .map(|(b, &b_norm)| cosine(a, a_norm, b, b_norm))
                .collect()
        })
        .collect()
}
