//! Chaotic-map scrambling strategies.
//!
//! These variants are ported from the original research prototypes and are
//! available but unvalidated: they satisfy the bijection and determinism
//! contracts, but no claims are made about their diffusion quality. The
//! production default is [`super::SeededShuffle`].
//!
//! The prototype formulas quantized each chaotic value straight into an
//! index (`int(x * n) % n`), which collides and is not invertible. Here the
//! trajectory is rank-ordered instead: sorting `[0, N)` by the chaotic value
//! at each step yields a true permutation while preserving the map dynamics.

use fastrand::Rng;

use super::{Permutation, Scrambler};

const BURN_IN: usize = 64;

/// Logistic map `x(n+1) = r * x(n) * (1 - x(n))`, chaotic for r near 4.
#[derive(Debug, Clone, Copy)]
pub struct LogisticMap {
    pub r: f64,
}

impl Default for LogisticMap {
    fn default() -> Self {
        Self { r: 3.99 }
    }
}

impl Scrambler for LogisticMap {
    fn permutation(&self, seed: u64, length: usize) -> Permutation {
        let mut x = seed_unit_interval(seed);
        rank_permutation(length, || {
            x = self.r * x * (1.0 - x);
            x
        })
    }
}

/// Tent map `x(n+1) = mu * min(x, 1 - x)`.
///
/// Runs with mu slightly below 2: at exactly 2 the doubling shifts mantissa
/// bits out and the f64 trajectory collapses to zero within 53 steps.
#[derive(Debug, Clone, Copy)]
pub struct TentMap {
    pub mu: f64,
}

impl Default for TentMap {
    fn default() -> Self {
        Self { mu: 1.9999 }
    }
}

impl Scrambler for TentMap {
    fn permutation(&self, seed: u64, length: usize) -> Permutation {
        let mut x = seed_unit_interval(seed);
        rank_permutation(length, || {
            x = if x < 0.5 {
                self.mu * x
            } else {
                self.mu * (1.0 - x)
            };
            x
        })
    }
}

/// Henon map `x(n+1) = 1 - a * x(n)^2 + y(n)`, `y(n+1) = b * x(n)`.
#[derive(Debug, Clone, Copy)]
pub struct HenonMap {
    pub a: f64,
    pub b: f64,
}

impl Default for HenonMap {
    fn default() -> Self {
        Self { a: 1.4, b: 0.3 }
    }
}

impl Scrambler for HenonMap {
    fn permutation(&self, seed: u64, length: usize) -> Permutation {
        let mut x = seed_unit_interval(seed);
        let mut y = 0.3;
        rank_permutation(length, || {
            let next = 1.0 - self.a * x * x + y;
            y = self.b * x;
            x = next;
            if !x.is_finite() || x.abs() > 2.0 {
                // left the attractor basin, re-enter near the origin
                x = 0.5;
                y = 0.3;
            }
            x
        })
    }
}

/// Arnold cat map over the unit square, tracking the x coordinate.
#[derive(Debug, Clone, Copy)]
pub struct ArnoldMap {
    pub a: f64,
    pub b: f64,
}

impl Default for ArnoldMap {
    fn default() -> Self {
        Self { a: 1.0, b: 1.0 }
    }
}

impl Scrambler for ArnoldMap {
    fn permutation(&self, seed: u64, length: usize) -> Permutation {
        let mut x = seed_unit_interval(seed);
        let mut y = seed_unit_interval(seed.wrapping_add(1));
        rank_permutation(length, || {
            let nx = (x + self.a * y).fract();
            let ny = (self.b * x + (self.a * self.b + 1.0) * y).fract();
            x = nx;
            y = ny;
            x
        })
    }
}

/// Maps a seed into an initial condition inside (0, 1), away from the fixed
/// points at the interval ends.
fn seed_unit_interval(seed: u64) -> f64 {
    let mut rng = Rng::with_seed(seed);
    0.05 + 0.9 * rng.f64()
}

/// Drives the map for `BURN_IN + length` steps and argsorts the recorded
/// trajectory. Ties (possible once a trajectory degenerates) break by index,
/// so the result is always a valid permutation.
fn rank_permutation<F: FnMut() -> f64>(length: usize, mut step: F) -> Permutation {
    for _ in 0..BURN_IN {
        step();
    }

    let trajectory: Vec<f64> = (0..length).map(|_| step()).collect();
    let mut indices: Vec<usize> = (0..length).collect();
    indices.sort_by(|&a, &b| trajectory[a].total_cmp(&trajectory[b]).then(a.cmp(&b)));

    Permutation::from_indices(indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scramble::ScramblerStrategy;

    fn all_chaotic_strategies() -> Vec<ScramblerStrategy> {
        vec![
            LogisticMap::default().into(),
            TentMap::default().into(),
            HenonMap::default().into(),
            ArnoldMap::default().into(),
        ]
    }

    #[test]
    fn chaotic_permutations_are_bijective() {
        for strategy in all_chaotic_strategies() {
            let p = strategy.permutation(1234, 500);
            let mut seen = vec![false; 500];
            for &i in &p.indices {
                assert!(!seen[i], "strategy {strategy:?} repeats index {i}");
                seen[i] = true;
            }
            assert!(seen.iter().all(|&s| s), "strategy {strategy:?} lost indices");
        }
    }

    #[test]
    fn chaotic_permutations_are_deterministic() {
        for strategy in all_chaotic_strategies() {
            let data: Vec<u8> = (0..=255).collect();
            let a = strategy.permutation(99, data.len()).apply(&data).unwrap();
            let b = strategy.permutation(99, data.len()).apply(&data).unwrap();
            assert_eq!(a, b, "strategy {strategy:?} is not deterministic");
        }
    }

    #[test]
    fn chaotic_permutations_round_trip() {
        for strategy in all_chaotic_strategies() {
            let data: Vec<u8> = (0..=255).rev().collect();
            let p = strategy.permutation(7, data.len());
            let scrambled = p.apply(&data).unwrap();
            let restored = p.invert(&scrambled).unwrap();
            assert_eq!(restored, data, "strategy {strategy:?} does not invert");
        }
    }

    #[test]
    fn chaotic_permutations_actually_move_samples() {
        let data: Vec<u8> = (0..=255).collect();
        for strategy in all_chaotic_strategies() {
            let scrambled = strategy.permutation(7, data.len()).apply(&data).unwrap();
            assert_ne!(scrambled, data, "strategy {strategy:?} left data in place");
        }
    }
}
