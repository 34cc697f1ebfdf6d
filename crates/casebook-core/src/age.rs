//! General-population age model.

use rand::Rng;

/// Fraction of draws that fall in the young tail `[0, 20)`.
pub const YOUNG_TAIL: f32 = 0.01;

/// Draw an age: uniform in `[20, 100)` 99% of the time, otherwise uniform
/// in `[0, 20)`.
pub fn random_age<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    if rng.gen::<f32>() > YOUNG_TAIL {
        rng.gen_range(20..100)
    } else {
        rng.gen_range(0..20)
    }
}
