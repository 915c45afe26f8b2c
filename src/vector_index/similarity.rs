//! Similarity math for embedding vectors.

/// Compute L2 norm of a vector.
pub fn l2_norm(v: &[f32]) -> f32 {
    let sum: f32 = v.iter().map(|x| x * x).sum();
    sum.sqrt()
}

/// Cosine similarity between two equal-length vectors: dot product over the
/// product of norms. Defined as 0.0 when either vector has zero magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());

    let norm_product = l2_norm(a) * l2_norm(b);
    if norm_product == 0.0 {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    dot / norm_product
}
