/// Trial-division primality test.
pub fn is_prime(x: u64) -> bool {
    if x < 2 || x % 2 == 0 {
        return x == 2;
    }
    let mut i = 3u64;
    while i <= x / i {
        if x % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

/// Parity of `C(n, k)` from the bit patterns alone (Lucas' theorem for `p = 2`):
/// the coefficient is odd exactly when every set bit of `k` is set in `n`.
pub fn binomial_is_odd(n: u64, k: u64) -> bool {
    k & (n ^ k) == 0
}
