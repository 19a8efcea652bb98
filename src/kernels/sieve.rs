pub const SIEVE_SIZE: usize = 1024;

/// Odd-only sieve: flag `i` stands for `2i + 3`. Runs `iterations` passes
/// and returns the prime count of the last one, or 0 when no pass ran.
pub fn sieve(iterations: u32) -> u32 {
    let mut flags = [true; SIEVE_SIZE];
    let mut count = 0;

    for _ in 0..iterations {
        count = 0;
        flags.fill(true);

        for index in 0..SIEVE_SIZE {
            if flags[index] {
                let prime = index + index + 3;
                let mut multiple = index + prime;
                while multiple < SIEVE_SIZE {
                    flags[multiple] = false;
                    multiple += prime;
                }
                count += 1;
            }
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_odd_primes_up_to_2049() {
        assert_eq!(sieve(1), 308);
    }

    #[test]
    fn passes_are_independent() {
        assert_eq!(sieve(5), sieve(1));
        assert_eq!(sieve(0), 0);
    }
}
