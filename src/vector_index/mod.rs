//! In-memory vector index over the corpus embeddings.

mod similarity;

pub use similarity::{cosine_similarity, l2_norm};

use crate::error::{RecallChatError, Result};

/// Best match of a similarity scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult {
    pub index: usize,
    pub score: f32,
}

/// Positionally-aligned embedding vectors, one per corpus entry.
///
/// The index never mutates one vector at a time: after a teaching event the
/// whole freshly-encoded set is swapped in with [`VectorIndex::replace`], so
/// the one-vector-per-entry alignment changes in a single step.
pub struct VectorIndex {
    dimensions: usize,
    vectors: Vec<Vec<f32>>,
}

impl VectorIndex {
    /// Create an index over already-encoded vectors.
    pub fn from_embeddings(dimensions: usize, vectors: Vec<Vec<f32>>) -> Result<Self> {
        validate_dimensions(dimensions, &vectors)?;

        Ok(Self {
            dimensions,
            vectors,
        })
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Swap in a freshly encoded vector set (full rebuild after teaching).
    pub fn replace(&mut self, vectors: Vec<Vec<f32>>) -> Result<()> {
        validate_dimensions(self.dimensions, &vectors)?;
        self.vectors = vectors;
        Ok(())
    }

    /// Cosine similarity of the query against every stored vector, in
    /// positional order.
    pub fn scores(&self, query: &[f32]) -> Result<Vec<f32>> {
        self.check_query(query)?;

        Ok(self
            .vectors
            .iter()
            .map(|v| cosine_similarity(query, v))
            .collect())
    }

    /// Index and score of the most similar stored vector. Ties break to the
    /// first stored position. `None` for an empty index.
    pub fn best_match(&self, query: &[f32]) -> Result<Option<MatchResult>> {
        self.check_query(query)?;

        let mut best: Option<MatchResult> = None;
        for (index, vector) in self.vectors.iter().enumerate() {
            let score = cosine_similarity(query, vector);
            if score.is_nan() {
                continue;
            }

            let better = match best {
                Some(current) => score > current.score,
                None => true,
            };
            if better {
                best = Some(MatchResult { index, score });
            }
        }

        Ok(best)
    }

    fn check_query(&self, query: &[f32]) -> Result<()> {
        if query.len() != self.dimensions {
            return Err(RecallChatError::similarity(format!(
                "query vector has {} dimensions, index expects {}",
                query.len(),
                self.dimensions
            )));
        }
        Ok(())
    }
}

fn validate_dimensions(dimensions: usize, vectors: &[Vec<f32>]) -> Result<()> {
    for (index, vector) in vectors.iter().enumerate() {
        if vector.len() != dimensions {
            return Err(RecallChatError::similarity(format!(
                "vector {} has {} dimensions, index expects {}",
                index,
                vector.len(),
                dimensions
            )));
        }
    }
    Ok(())
}
