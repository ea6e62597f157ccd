//! Table size family with favorable modular properties.
//!
//! Every table size this module hands out is the larger member of a
//! twin-prime pair `(S - 2, S)`. The probe scheme derives a jump
//! distance in `[1, S - 2]` from a key's hash; because `S` is prime,
//! every such jump is coprime with `S`, so a probe path visits all `S`
//! slots before repeating. Keeping `S - 2` prime as well makes the jump
//! modulus itself well distributed.

/// Largest size the family can produce: the larger member of the
/// greatest twin-prime pair below `2^31`.
pub const MAX_TWIN_PRIME: usize = 2_147_482_951;

/// Smallest size the family produces; keeps `size - 2 >= 3` so the
/// jump modulus is always meaningful.
const MIN_TWIN_PRIME: usize = 5;

/// Returns the smallest family member `>= n` (and never below 5).
///
/// Deterministic: same input, same output. Callers pass a desired
/// minimum table size; the result is the size to allocate.
pub fn next_twin_prime(n: usize) -> usize {
    let mut candidate = n.max(MIN_TWIN_PRIME);
    // Twin primes other than (3, 5) have a larger member of form 6k + 1.
    if candidate > 5 {
        let rem = candidate % 6;
        if rem != 1 {
            candidate += (7 - rem) % 6;
        }
    }
    loop {
        if is_prime(candidate) && is_prime(candidate - 2) {
            return candidate;
        }
        candidate = if candidate == 5 { 7 } else { candidate + 6 };
    }
}

/// Trial division primality test. Inputs stay below `MAX_TWIN_PRIME`,
/// so the divisor loop is bounded by ~46k iterations.
fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut d = 5usize;
    while d * d <= n {
        if n % d == 0 || n % (d + 2) == 0 {
            return false;
        }
        d += 6;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_family_members() {
        assert_eq!(next_twin_prime(0), 5);
        assert_eq!(next_twin_prime(2), 5);
        assert_eq!(next_twin_prime(5), 5);
        assert_eq!(next_twin_prime(6), 7);
        assert_eq!(next_twin_prime(7), 7);
        assert_eq!(next_twin_prime(8), 13);
        assert_eq!(next_twin_prime(10), 13);
        assert_eq!(next_twin_prime(14), 19);
        assert_eq!(next_twin_prime(20), 31);
        assert_eq!(next_twin_prime(100), 103);
        assert_eq!(next_twin_prime(1000), 1021);
        assert_eq!(next_twin_prime(2048), 2083);
    }

    #[test]
    fn results_are_twin_primes_at_least_n() {
        for n in 0..500 {
            let s = next_twin_prime(n);
            assert!(s >= n);
            assert!(is_prime(s), "{s} not prime");
            assert!(is_prime(s - 2), "{} not prime", s - 2);
        }
    }

    #[test]
    fn max_constant_is_a_family_member() {
        assert!(is_prime(MAX_TWIN_PRIME));
        assert!(is_prime(MAX_TWIN_PRIME - 2));
    }

    /// Invariant the probe scheme depends on: every jump in
    /// `[1, size - 2]` is coprime with the table size.
    #[test]
    fn jumps_are_coprime_with_size() {
        fn gcd(a: usize, b: usize) -> usize {
            if b == 0 {
                a
            } else {
                gcd(b, a % b)
            }
        }
        for n in [0, 8, 14, 40, 100, 1000] {
            let size = next_twin_prime(n);
            for jump in 1..=(size - 2) {
                assert_eq!(gcd(size, jump), 1, "size {size} jump {jump}");
            }
        }
    }
}
