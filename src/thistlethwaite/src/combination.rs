//! Lexicographic ranking of k-subsets of `{0..n}`.
//!
//! Subsets are bit masks: bit `i` is set when element `i` is a member. Ranks
//! follow the lexicographic order of the sorted member lists, so the subset
//! `{0, 1, .., k - 1}` ranks 0 and `{n - k, .., n - 1}` ranks `C(n, k) - 1`.

/// The binomial coefficient `C(n, k)`, zero when `k > n`.
#[must_use]
pub const fn binomial(n: usize, k: usize) -> u32 {
    if k > n {
        return 0;
    }
    let mut result = 1;
    let mut i = 0;
    while i < k {
        result = result * (n - i) / (i + 1);
        i += 1;
    }
    result as u32
}

/// The rank of `mask` among subsets of `{0..n}` of the same size.
#[must_use]
pub fn rank(mask: u16, n: usize) -> u32 {
    debug_assert!(n <= 16 && (n == 16 || mask >> n == 0));
    let mut remaining = mask.count_ones() as usize;
    let mut rank = 0;
    for element in 0..n {
        if remaining == 0 {
            break;
        }
        if mask & (1 << element) == 0 {
            // Every subset sharing the members so far but taking `element`
            // next comes first
            rank += binomial(n - 1 - element, remaining - 1);
        } else {
            remaining -= 1;
        }
    }
    rank
}

/// The `k`-subset of `{0..n}` with the given rank. Inverse of `rank`.
#[must_use]
pub fn unrank(mut rank: u32, n: usize, k: usize) -> u16 {
    debug_assert!(rank < binomial(n, k));
    let mut mask = 0;
    let mut remaining = k;
    for element in 0..n {
        if remaining == 0 {
            break;
        }
        let with_element = binomial(n - 1 - element, remaining - 1);
        if rank < with_element {
            mask |= 1 << element;
            remaining -= 1;
        } else {
            rank -= with_element;
        }
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binomial() {
        assert_eq!(binomial(12, 4), 495);
        assert_eq!(binomial(8, 4), 70);
        assert_eq!(binomial(5, 0), 1);
        assert_eq!(binomial(3, 4), 0);
        assert_eq!(binomial(12, 12), 1);
    }

    #[test]
    fn test_extremes() {
        assert_eq!(rank(0b1111, 12), 0);
        assert_eq!(rank(0b1111_0000_0000, 12), 494);
        assert_eq!(rank(0b1111_0000, 8), 69);
        assert_eq!(unrank(0, 8, 4), 0b1111);
        assert_eq!(unrank(494, 12, 4), 0b1111_0000_0000);
        assert_eq!(rank(0, 12), 0);
    }

    #[test]
    fn test_bijection() {
        for (n, k) in [(12, 4), (8, 4), (6, 3), (5, 1), (4, 0)] {
            let count = binomial(n, k);
            for r in 0..count {
                let mask = unrank(r, n, k);
                assert_eq!(mask.count_ones() as usize, k);
                assert!(mask >> n == 0);
                assert_eq!(rank(mask, n), r);
            }
        }
    }

    #[test]
    fn test_lexicographic_order() {
        // Sorted member lists of every 4-subset of 8, compared as sequences
        let members = |mask: u16| (0..8).filter(|i| mask & (1 << i) != 0).collect::<Vec<_>>();
        for r in 1..binomial(8, 4) {
            assert!(members(unrank(r - 1, 8, 4)) < members(unrank(r, 8, 4)));
        }
    }
}
