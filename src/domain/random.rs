//! Deterministic Park-Miller pseudo-random generator.
//!
//! state = state * 16807 mod (2^31 - 1), output = (state - 1) / (2^31 - 2).
//! Every generator in the crate takes one of these by `&mut`, so a given seed
//! and call count always reproduces the same draws.

const MODULUS: u64 = 2_147_483_647;
const MULTIPLIER: u64 = 16_807;

#[derive(Debug, Clone)]
pub struct SeededRandom {
    state: u64,
}

impl SeededRandom {
    pub fn new(seed: i64) -> Self {
        let mut state = seed.rem_euclid(MODULUS as i64) as u64;
        if state == 0 {
            state = MODULUS - 1;
        }
        SeededRandom { state }
    }

    /// Next draw in the open interval (0, 1).
    pub fn next_f64(&mut self) -> f64 {
        // states 1 and MODULUS - 1 map to exactly 0.0 and 1.0; each comes round once per period.
        loop {
            self.state = self.state * MULTIPLIER % MODULUS;
            if self.state != 1 && self.state != MODULUS - 1 {
                break;
            }
        }
        (self.state - 1) as f64 / (MODULUS - 2) as f64
    }

    /// Standard normal sample via the Box-Muller transform (two draws).
    pub fn next_normal(&mut self) -> f64 {
        let u1 = self.next_f64();
        let u2 = self.next_f64();
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }
}

/// Sum of the symbol's character codes times `multiplier`.
pub fn symbol_seed(symbol: &str, multiplier: i64) -> i64 {
    let sum: i64 = symbol.chars().map(|c| c as i64).sum();
    sum.wrapping_mul(multiplier)
}
