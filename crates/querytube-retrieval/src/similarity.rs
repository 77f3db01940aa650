//! Cosine similarity.

/// Euclidean norm, accumulated in `f64`.
pub fn norm(v: &[f32]) -> f64 {
    v.iter()
        .map(|x| f64::from(*x) * f64::from(*x))
        .sum::<f64>()
        .sqrt()
}

/// Cosine similarity between two vectors.
///
/// Returns `None` when the lengths differ, when either vector has zero
/// magnitude, or when the inputs contain non-finite values. Otherwise the
/// result is clamped to [-1, 1].
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f32> {
    if a.len() != b.len() {
        return None;
    }
    let dot: f64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| f64::from(*x) * f64::from(*y))
        .sum();
    from_parts(dot, norm(a), norm(b))
}

/// Cosine similarity from a dot product and both norms.
///
/// Used by the ranker, which precomputes the corpus row norms.
pub fn from_parts(dot: f64, norm_a: f64, norm_b: f64) -> Option<f32> {
    if !(norm_a.is_finite() && norm_b.is_finite()) || norm_a == 0.0 || norm_b == 0.0 {
        return None;
    }
    let sim = dot / (norm_a * norm_b);
    if !sim.is_finite() {
        return None;
    }
    // Fold -0.0 into 0.0 so orthogonal rows tie.
    let sim = sim.clamp(-1.0, 1.0) as f32;
    Some(if sim == 0.0 { 0.0 } else { sim })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_vectors_score_one() {
        let v = [0.3, -1.2, 4.0];
        assert!((cosine_similarity(&v, &v).unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn opposite_vectors_score_minus_one() {
        let s = cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]).unwrap();
        assert!((s + 1.0).abs() < 1e-6);
    }

    #[test]
    fn orthogonal_vectors_score_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 5.0]), Some(0.0));
    }

    #[test]
    fn scale_invariant() {
        let a = cosine_similarity(&[1.0, 2.0, 3.0], &[2.0, 1.0, 0.5]).unwrap();
        let b = cosine_similarity(&[10.0, 20.0, 30.0], &[2.0, 1.0, 0.5]).unwrap();
        assert!((a - b).abs() < 1e-6);
    }

    #[test]
    fn zero_vector_is_undefined() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), None);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 0.0]), None);
    }

    #[test]
    fn tiny_magnitudes_are_still_directional() {
        let same = cosine_similarity(&[1e-8, 0.0], &[1.0, 0.0]).unwrap();
        assert!((same - 1.0).abs() < 1e-6);
        let opposite = cosine_similarity(&[-1e-30, 0.0], &[1e-30, 0.0]).unwrap();
        assert!((opposite + 1.0).abs() < 1e-6);
    }

    #[test]
    fn length_mismatch_is_undefined() {
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), None);
    }

    #[test]
    fn non_finite_is_undefined() {
        assert_eq!(cosine_similarity(&[f32::NAN, 1.0], &[1.0, 1.0]), None);
        assert_eq!(cosine_similarity(&[f32::INFINITY, 1.0], &[1.0, 1.0]), None);
    }

    #[test]
    fn norm_of_unit_axis() {
        assert_eq!(norm(&[0.0, 1.0, 0.0]), 1.0);
        assert_eq!(norm(&[]), 0.0);
    }
}
