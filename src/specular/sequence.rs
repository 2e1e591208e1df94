//! Deterministic launch-angle sampling
//!
//! The search only needs a reproducible stream of uniform values in [0, 1).
//! Any `rand` generator provides one; the default is a seeded PCG32 so a
//! given seed always replays the same angles.

use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg32;
use std::f32::consts::FRAC_PI_4;

use crate::consts::MAX_ANGLE_RESAMPLES;

/// Source of uniform values in [0, 1)
pub trait AngleSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: RngCore> AngleSource for R {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// The default seeded source
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Draw an angle in [0, π) whose |cos| and |sin| both reach `min_axis`.
///
/// Falls back to 45° when no draw qualifies.
pub fn sample_angle_avoid_axis(source: &mut impl AngleSource, min_axis: f32) -> f32 {
    for _ in 0..MAX_ANGLE_RESAMPLES {
        let theta = (source.next_unit() * std::f64::consts::PI) as f32;
        if theta.cos().abs() >= min_axis && theta.sin().abs() >= min_axis {
            return theta;
        }
    }
    FRAC_PI_4
}
