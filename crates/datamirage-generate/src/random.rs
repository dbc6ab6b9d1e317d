use std::sync::{Mutex, PoisonError};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::errors::GenerationError;

/// Replaced by a random decimal digit in patterns.
pub const DIGIT_PLACEHOLDER: char = '#';
/// Replaced by a random upper-case ASCII letter by [`RandomService::bothify`].
pub const LETTER_PLACEHOLDER: char = '?';

/// Source of every random draw made by the generators.
///
/// A seeded service produces the same sequence of values for the same
/// sequence of calls.
#[derive(Debug)]
pub struct RandomService {
    rng: Mutex<ChaCha8Rng>,
}

impl RandomService {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::from_rng(&mut rand::rng())),
        }
    }

    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    fn with_rng<T>(&self, draw: impl FnOnce(&mut ChaCha8Rng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        draw(&mut rng)
    }

    /// Uniformly chosen element of `items`.
    pub fn element<'a, T>(&self, items: &'a [T]) -> Result<&'a T, GenerationError> {
        if items.is_empty() {
            return Err(GenerationError::EmptyInput(
                "cannot choose from an empty sequence".to_string(),
            ));
        }
        let idx = self.with_rng(|rng| rng.random_range(0..items.len()));
        items.get(idx).ok_or_else(|| {
            GenerationError::EmptyInput(format!("index {idx} out of {} items", items.len()))
        })
    }

    /// Uniform integer in `[min, max]`.
    pub fn int_in(&self, min: i64, max: i64) -> Result<i64, GenerationError> {
        if min > max {
            return Err(GenerationError::InvalidRange(format!(
                "min {min} must be <= max {max}"
            )));
        }
        Ok(self.with_rng(|rng| rng.random_range(min..=max)))
    }

    /// Uniform real number in `[min, max]`.
    ///
    /// Any finite bounds are accepted, including ranges whose width
    /// overflows `f64`.
    pub fn double_in(&self, min: f64, max: f64) -> Result<f64, GenerationError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(GenerationError::InvalidRange(format!(
                "bounds must be finite, got [{min}, {max}]"
            )));
        }
        if min > max {
            return Err(GenerationError::InvalidRange(format!(
                "min {min} must be <= max {max}"
            )));
        }
        if min == max {
            return Ok(min);
        }
        let t: f64 = self.with_rng(|rng| rng.random_range(0.0..=1.0));
        // Interpolating from both ends never computes `max - min`.
        Ok((min * (1.0 - t) + max * t).clamp(min, max))
    }

    /// `true` with probability `p_true`.
    pub fn weighted_bool(&self, p_true: f64) -> Result<bool, GenerationError> {
        if !(0.0..=1.0).contains(&p_true) {
            return Err(GenerationError::InvalidRange(format!(
                "probability {p_true} is outside [0, 1]"
            )));
        }
        Ok(self.with_rng(|rng| rng.random_bool(p_true)))
    }

    /// Replace every `#` with an independent random digit.
    pub fn expand_pattern(&self, pattern: &str) -> String {
        self.with_rng(|rng| {
            pattern
                .chars()
                .map(|ch| match ch {
                    DIGIT_PLACEHOLDER => random_digit(rng),
                    other => other,
                })
                .collect()
        })
    }

    /// Like [`expand_pattern`](Self::expand_pattern), and also replaces
    /// every `?` with a random upper-case letter.
    pub fn bothify(&self, pattern: &str) -> String {
        self.with_rng(|rng| {
            pattern
                .chars()
                .map(|ch| match ch {
                    DIGIT_PLACEHOLDER => random_digit(rng),
                    LETTER_PLACEHOLDER => char::from(b'A' + rng.random_range(0..26_u8)),
                    other => other,
                })
                .collect()
        })
    }

    pub fn digits(&self, count: usize) -> String {
        self.with_rng(|rng| (0..count).map(|_| random_digit(rng)).collect())
    }
}

impl Default for RandomService {
    fn default() -> Self {
        Self::from_entropy()
    }
}

fn random_digit(rng: &mut ChaCha8Rng) -> char {
    char::from(b'0' + rng.random_range(0..10_u8))
}
