//! Difficulty curve and day/night cycle

use crate::{lerp, rounded_square_wave};

/// Speed multiplier for a given score.
///
/// Starts at 0.5, reaches 1 at score 50, holds until 100, then climbs to 2 at 400.
pub fn difficulty(score: f32) -> f32 {
    if score < 50.0 {
        lerp(0.5, 1.0, score / 50.0)
    } else if score <= 100.0 {
        1.0
    } else {
        lerp(1.0, 2.0, (score - 100.0) / 300.0)
    }
}

/// Background tint (0xRRGGBB) for the given tick. Fully bright by day,
/// dark slate blue by night, with a short dusk between.
pub fn day_night_tint(time_ticks: u64, period_ticks: f32) -> u32 {
    let phase = time_ticks as f32 / period_ticks * std::f32::consts::TAU;
    let brightness = (rounded_square_wave(phase) + 1.0) / 2.0;
    let channel = |night: f32| -> u32 {
        lerp(night, 255.0, brightness + 0.1).round().min(255.0) as u32
    };
    let red = channel(0x33 as f32);
    let green = channel(0x44 as f32);
    let blue = channel(0x55 as f32);
    (red << 16) | (green << 8) | blue
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_difficulty_anchor_points() {
        assert!((difficulty(0.0) - 0.5).abs() < 1e-6);
        assert!((difficulty(25.0) - 0.75).abs() < 1e-6);
        assert!((difficulty(50.0) - 1.0).abs() < 1e-6);
        assert!((difficulty(100.0) - 1.0).abs() < 1e-6);
        assert!((difficulty(250.0) - 1.5).abs() < 1e-6);
        assert!((difficulty(400.0) - 2.0).abs() < 1e-6);
        assert!((difficulty(10_000.0) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_tint_starts_bright() {
        // Tick 0 sits mid-dusk; a quarter period in is full day
        let tint = day_night_tint(2000, 8000.0);
        assert_eq!(tint, 0xffffff);
    }

    #[test]
    fn test_tint_night() {
        // Three quarters in is deepest night: blue stays brightest, red darkest
        assert_eq!(day_night_tint(6000, 8000.0), 0x4e5d6b);
    }

    proptest! {
        #[test]
        fn difficulty_is_monotonic(a in 0.0f32..1000.0, b in 0.0f32..1000.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(difficulty(lo) <= difficulty(hi) + 1e-6);
        }

        #[test]
        fn difficulty_is_continuous(s in 0.0f32..1000.0) {
            let eps = 1e-3;
            prop_assert!((difficulty(s + eps) - difficulty(s)).abs() < 1e-2);
        }

        #[test]
        fn difficulty_stays_in_range(s in 0.0f32..100_000.0) {
            let d = difficulty(s);
            prop_assert!((0.5..=2.0).contains(&d));
        }
    }
}
