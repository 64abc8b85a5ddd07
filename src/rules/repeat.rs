//! Selection that avoids repeating the previous question.

use smallvec::SmallVec;

use crate::core::rng::RandomSource;

/// Redraw budget when a fresh draw matches the previous question.
///
/// A level that can only ever produce one question repeats once the
/// budget is spent.
pub const MAX_REDRAWS: usize = 32;

/// Pick uniformly from `pool`, excluding `previous`.
///
/// Falls back to the whole pool when excluding `previous` would leave
/// nothing (a single-element pool). Returns `None` only for an empty
/// pool.
pub fn pick_avoiding<T, R>(pool: &[T], previous: Option<&T>, rng: &mut R) -> Option<T>
where
    T: PartialEq + Copy,
    R: RandomSource,
{
    let fresh: SmallVec<[T; 32]> = pool
        .iter()
        .copied()
        .filter(|v| Some(v) != previous)
        .collect();

    let candidates: &[T] = if fresh.is_empty() { pool } else { &fresh };
    rng.pick(candidates).copied()
}

/// Draw until the result differs from `previous`, up to `MAX_REDRAWS`
/// extra attempts.
pub fn draw_avoiding<T, F>(previous: Option<&T>, mut draw: F) -> T
where
    T: PartialEq,
    F: FnMut() -> T,
{
    let mut candidate = draw();
    for _ in 0..MAX_REDRAWS {
        if previous != Some(&candidate) {
            break;
        }
        candidate = draw();
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::{GameRng, ScriptedRng};

    #[test]
    fn test_pick_never_repeats() {
        let mut rng = GameRng::new(3);
        let pool = [10, 20, 30];
        let mut previous = None;
        for _ in 0..200 {
            let picked = pick_avoiding(&pool, previous.as_ref(), &mut rng).unwrap();
            assert_ne!(Some(picked), previous);
            previous = Some(picked);
        }
    }

    #[test]
    fn test_pick_indexes_filtered_pool() {
        // Index 1 of [10, 30] once 20 is excluded
        let mut rng = ScriptedRng::new(vec![1]);
        assert_eq!(pick_avoiding(&[10, 20, 30], Some(&20), &mut rng), Some(30));
    }

    #[test]
    fn test_single_element_pool_repeats() {
        let mut rng = GameRng::new(1);
        assert_eq!(pick_avoiding(&[50], Some(&50), &mut rng), Some(50));
    }

    #[test]
    fn test_empty_pool() {
        let mut rng = GameRng::new(1);
        let empty: [u32; 0] = [];
        assert_eq!(pick_avoiding(&empty, None, &mut rng), None);
    }

    #[test]
    fn test_draw_avoiding_redraws() {
        let mut seq = vec![7, 7, 7, 3].into_iter();
        let got = draw_avoiding(Some(&7), || seq.next().unwrap_or(0));
        assert_eq!(got, 3);
    }

    #[test]
    fn test_draw_avoiding_gives_up() {
        let mut calls = 0;
        let got = draw_avoiding(Some(&1), || {
            calls += 1;
            1
        });
        assert_eq!(got, 1);
        assert_eq!(calls, MAX_REDRAWS + 1);
    }
}
