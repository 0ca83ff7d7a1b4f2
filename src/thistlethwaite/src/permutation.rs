//! Lexicographic (Lehmer code) ranking of permutations of `{0..n}`, `n <= 12`.

use crate::FACTORIAL;
use cube3::is_odd;

/// The lexicographic rank of `perm` in `[0, n!)`.
#[must_use]
pub fn rank(perm: &[u8]) -> u32 {
    let n = perm.len();
    debug_assert!(n < FACTORIAL.len());
    let mut rank = 0;
    for i in 0..n {
        let smaller = perm[i + 1..].iter().filter(|&&p| p < perm[i]).count() as u32;
        rank += smaller * FACTORIAL[n - 1 - i];
    }
    rank
}

/// Writes the permutation of `{0..perm.len()}` with the given rank into
/// `perm`. Inverse of `rank`.
pub fn unrank(mut rank: u32, perm: &mut [u8]) {
    let n = perm.len();
    debug_assert!(n < FACTORIAL.len() && rank < FACTORIAL[n]);
    let mut unused: u16 = (1 << n) - 1;
    for i in 0..n {
        let factorial = FACTORIAL[n - 1 - i];
        let mut digit = rank / factorial;
        rank %= factorial;
        // Pick the `digit`th smallest value not placed yet
        let mut value = 0;
        loop {
            if unused & (1 << value) != 0 {
                if digit == 0 {
                    break;
                }
                digit -= 1;
            }
            value += 1;
        }
        unused &= !(1 << value);
        perm[i] = value;
    }
}

/// The rank of `perm` among the `n!/2` permutations sharing its parity.
///
/// Lexicographic neighbours `2r` and `2r + 1` differ by swapping the last two
/// entries, so each pair holds exactly one permutation of each parity and
/// halving the full rank is enough.
#[must_use]
pub fn rank_with_parity(perm: &[u8]) -> u32 {
    debug_assert!(perm.len() >= 2);
    rank(perm) / 2
}

/// Writes the permutation with the given parity and `rank_with_parity` into
/// `perm`.
pub fn unrank_with_parity(rank: u32, odd: bool, perm: &mut [u8]) {
    unrank(2 * rank, perm);
    if is_odd(perm) != odd {
        unrank(2 * rank + 1, perm);
    }
}
