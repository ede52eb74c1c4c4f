use rand::Rng;

/// Uniform random coordinate in `[min, max)`.
///
/// A field smaller than an item leaves no room to scatter; the range
/// collapses and `min` is returned.
pub fn random_position<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..max)
}
