//! Calibrated filler computation.

use std::hint::black_box;

/// Multiplier of the filler loop (a prime, so the product never collapses to zero).
const MULTIPLIER: i32 = 982_451_653;

/// Run `cost` units of CPU-bound filler work.
///
/// Each unit is one wrapping multiplication. The multiplier passes through
/// `black_box` on every iteration so the loop cannot be folded into a
/// closed form, which keeps the cost linear in `cost`.
#[inline(never)]
pub fn work(cost: u64) -> i32 {
    let mut s: i32 = 1;
    for _ in 0..cost {
        s = s.wrapping_mul(black_box(MULTIPLIER));
    }
    black_box(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn zero_cost_is_identity() {
        assert_eq!(work(0), 1);
    }

    #[test]
    fn deterministic() {
        assert_eq!(work(12_345), work(12_345));
        assert_eq!(work(1), MULTIPLIER);
        assert_eq!(work(2), MULTIPLIER.wrapping_mul(MULTIPLIER));
    }

    fn fastest_secs(cost: u64) -> f64 {
        (0..7)
            .map(|_| {
                let start = Instant::now();
                black_box(work(cost));
                start.elapsed().as_secs_f64()
            })
            .fold(f64::INFINITY, f64::min)
    }

    #[test]
    fn cost_scales_linearly() {
        let c = 4_000_000;
        let single = fastest_secs(c);
        let double = fastest_secs(2 * c);
        let ratio = double / single;
        assert!(
            (1.5..=2.5).contains(&ratio),
            "work(2c)/work(c) = {ratio:.3}, expected ~2"
        );
    }
}
