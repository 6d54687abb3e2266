use rand::Rng;

/// Uniform float in `[min, max)`.
///
/// Scales a unit sample instead of calling `gen_range`, so an empty or
/// inverted range yields `min` (or a value between the bounds) rather than
/// panicking.
pub fn random_range<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    min + rng.gen::<f64>() * (max - min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_values_within_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = random_range(&mut rng, 0.1, 0.9);
            assert!((0.1..0.9).contains(&v), "{} out of range", v);
        }
    }

    #[test]
    fn test_empty_range_returns_min() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(random_range(&mut rng, 3.0, 3.0), 3.0);
    }

    #[test]
    fn test_inverted_range_does_not_panic() {
        let mut rng = StdRng::seed_from_u64(7);
        let v = random_range(&mut rng, 0.5, 0.25);
        assert!(v <= 0.5 && v > 0.25);
    }
}
