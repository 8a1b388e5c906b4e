// Arg-min over the children of a heap node.
//
// Full sibling groups are compared as a fixed bracket instead of a scan, so
// there's no data-dependent loop. Ties go to the left-most candidate, which
// keeps the choice stable when ranks compare equal.

#[inline(always)]
#[must_use]
fn fight<T: Ord>(a: &[T], l: usize, r: usize) -> usize {
    if a[l] <= a[r] { l } else { r }
}

// 0   1   2   3
// *   *   *   *
//  \ /     \ /
//   *       *
//    \     /
//       *
#[inline(always)]
#[must_use]
fn bracket_4<T: Ord>(a: &[T]) -> usize {
    debug_assert_eq!(a.len(), 4);
    fight(a, fight(a, 0, 1), fight(a, 2, 3))
}

/// Index of the smallest element of a non-empty slice.
///
/// ```
/// use graph_search::derank::derank;
/// assert_eq!(derank(&[4, 2, 9, 2]), 1);
/// assert_eq!(derank(&[7, 3]), 1);
/// ```
#[inline(always)]
#[must_use]
pub fn derank<T: Ord>(a: &[T]) -> usize {
    match a.len() {
        0 => unreachable!("No candidates to pick from"),
        1 => 0usize,
        2 => fight(a, 0, 1),
        3 => fight(a, fight(a, 0, 1), 2),
        4 => bracket_4(a),
        _ => scan_min_index(a),
    }
}

/// Left-most index of the smallest element, one comparison at a time.
#[must_use]
pub fn scan_min_index<T: Ord>(a: &[T]) -> usize {
    (1..a.len()).fold(0usize, |best, i| fight(a, best, i))
}

#[cfg(test)]
mod tests {
    use rand::Rng;
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;

    #[test]
    fn brackets_match_scan() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for len in 1..=9 {
            for _ in 0..200 {
                // Small values, so ties are common.
                let a: Vec<u8> = (0..len).map(|_| rng.random_range(0..4u8)).collect();
                let i = derank(&a);
                assert_eq!(i, scan_min_index(&a), "{a:?}");
                assert_eq!(Some(&a[i]), a.iter().min());
                assert!(a[..i].iter().all(|x| *x > a[i]), "Not left-most in {a:?}");
            }
        }
    }

    #[test]
    fn ties_go_left() {
        assert_eq!(derank(&[1u8, 0u8, 0u8]), 1);
        assert_eq!(derank(&[0u8, 1u8, 0u8, 0u8]), 0);
        assert_eq!(derank(&[2u8, 1u8, 1u8, 1u8]), 1);
        assert_eq!(scan_min_index(&[2u8, 1u8, 1u8, 1u8, 1u8]), 1);
    }
}
