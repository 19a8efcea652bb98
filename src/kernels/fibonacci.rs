/// Naive doubly-recursive fibonacci with `fib(0) = fib(1) = 1`.
pub fn fibonacci(number: u32) -> u32 {
    if number <= 1 {
        return 1;
    }
    fibonacci(number - 1).wrapping_add(fibonacci(number - 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_cases_are_one() {
        assert_eq!(fibonacci(0), 1);
        assert_eq!(fibonacci(1), 1);
    }

    #[test]
    fn known_values() {
        assert_eq!(fibonacci(10), 89);
        assert_eq!(fibonacci(20), 10_946);
    }
}
