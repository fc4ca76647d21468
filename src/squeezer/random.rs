//! Random extraction source.
//!
//! The store draws one uniform value per completed squeeze. Tests inject a
//! scripted source to get exact extraction amounts.

use rand::RngExt;

pub const MIN_EXTRACTION: f64 = 0.6;
pub const EXTRACTION_SPAN: f64 = 0.4;

pub trait ExtractionSource: Send {
    /// A uniform value in `[0, 1)`.
    fn unit(&mut self) -> f64;
}

/// Thread-local generator from `rand`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl ExtractionSource for ThreadRandom {
    fn unit(&mut self) -> f64 {
        rand::rng().random::<f64>()
    }
}

impl<F> ExtractionSource for F
where
    F: FnMut() -> f64 + Send,
{
    fn unit(&mut self) -> f64 {
        (self)()
    }
}

/// Juice extracted from a lemon of `capacity` for the draw `u`.
///
/// Out-of-range draws are clamped so the result always lies in
/// `[0.6 * capacity, capacity]`.
pub fn extraction_for(capacity: f64, u: f64) -> f64 {
    let u = if u.is_nan() { 0.0 } else { u.clamp(0.0, 1.0) };
    (capacity * (MIN_EXTRACTION + EXTRACTION_SPAN * u)).min(capacity)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::ExtractionSource;
    use std::collections::VecDeque;

    /// Replays fixed draws, repeating the last one when exhausted.
    pub struct ScriptedDraws {
        draws: VecDeque<f64>,
        last: f64,
    }

    impl ScriptedDraws {
        pub fn new(draws: &[f64]) -> Self {
            Self {
                draws: draws.iter().copied().collect(),
                last: draws.last().copied().unwrap_or(0.0),
            }
        }
    }

    impl ExtractionSource for ScriptedDraws {
        fn unit(&mut self) -> f64 {
            self.draws.pop_front().unwrap_or(self.last)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_bounds() {
        assert_eq!(extraction_for(50.0, 0.0), 30.0);
        assert_eq!(extraction_for(50.0, 0.5), 40.0);
        assert!(extraction_for(50.0, 0.999_999) <= 50.0);
        assert_eq!(extraction_for(80.0, 7.0), 80.0);
        assert_eq!(extraction_for(80.0, -1.0), 48.0);
        assert_eq!(extraction_for(30.0, f64::NAN), 18.0);
    }

    #[test]
    fn test_thread_random_in_unit_range() {
        let mut rng = ThreadRandom;
        for _ in 0..1000 {
            let u = rng.unit();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn test_closure_source() {
        let mut n = 0;
        let mut src = move || {
            n += 1;
            if n % 2 == 0 { 0.5 } else { 0.25 }
        };
        assert_eq!(src.unit(), 0.25);
        assert_eq!(src.unit(), 0.5);
    }
}
