//! Reference computations behind the benchmark programs.
//!
//! Each function is the plain loop the benchmark times. The `*_report`
//! functions build the single line each benchmark binary prints.

/// Upper bound used by the `divisible` benchmark.
pub const DIVISIBLE_LIMIT: u64 = 1_000_000_000;

/// Argument used by the `fibonacci` benchmark.
pub const FIBONACCI_INPUT: u32 = 35;

/// Candidate tested by the `prime` benchmark.
pub const PRIME_CANDIDATE: u64 = 999_998_727;

/// Upper bound used by the `sum_of_digits` benchmark.
pub const SUM_OF_DIGITS_LIMIT: u64 = 100_000_000;

/// Count of integers in `1..=n` divisible by 3 or 5.
pub fn count_multiples_of_3_or_5(n: u64) -> u64 {
    let mut count = 0;
    for i in 1..=n {
        if i % 3 == 0 || i % 5 == 0 {
            count += 1;
        }
    }
    count
}

/// Largest `n` whose Fibonacci number fits in a `u64`.
pub const FIBONACCI_MAX_INPUT: u32 = 93;

/// Naive doubly recursive Fibonacci, `fibonacci(0) == 0`.
///
/// # Panics
///
/// Panics if `n` exceeds [`FIBONACCI_MAX_INPUT`].
pub fn fibonacci(n: u32) -> u64 {
    assert!(
        n <= FIBONACCI_MAX_INPUT,
        "fibonacci({n}) does not fit in u64"
    );
    fib(n)
}

fn fib(n: u32) -> u64 {
    if n <= 1 {
        return n as u64;
    }
    fib(n - 1) + fib(n - 2)
}

/// Trial division by odd divisors up to the square root.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }

    let mut i = 3;
    // `i <= n / i` is `i * i <= n` without overflow
    while i <= n / i {
        if n % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

/// Sum of the decimal digits of `n`.
pub fn sum_of_digits(mut n: u64) -> u64 {
    let mut sum = 0;
    while n > 0 {
        sum += n % 10;
        n /= 10;
    }
    sum
}

/// Sum of the digit sums of every integer in `1..=n`.
pub fn sum_of_digits_range(n: u64) -> u64 {
    (1..=n).map(sum_of_digits).sum()
}

pub fn divisible_report(n: u64) -> String {
    format!(
        "Count of numbers divisible by 3 or 5: {}",
        count_multiples_of_3_or_5(n)
    )
}

pub fn fibonacci_report(n: u32) -> String {
    format!("Fibonacci({n}): {}", fibonacci(n))
}

pub fn prime_report(n: u64) -> String {
    let verdict = if is_prime(n) { "prime" } else { "not prime" };
    format!("{n} is {verdict}")
}

pub fn sum_of_digits_report(n: u64) -> String {
    format!(
        "Sum of all digits from 1 to {}: {}",
        group_thousands(n),
        sum_of_digits_range(n)
    )
}

/// Format `n` with commas between groups of three digits.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn test_count_multiples() {
        assert_eq!(count_multiples_of_3_or_5(0), 0);
        assert_eq!(count_multiples_of_3_or_5(14), 6);
        assert_eq!(count_multiples_of_3_or_5(15), 7);
        assert_eq!(count_multiples_of_3_or_5(1000), 467);
    }

    #[test]
    fn test_fibonacci() {
        let expected = [0, 1, 1, 2, 3, 5, 8, 13, 21, 34, 55];
        for (n, want) in expected.into_iter().enumerate() {
            assert_eq!(fibonacci(n as u32), want);
        }
        assert_eq!(fibonacci(20), 6765);
    }

    #[test]
    #[should_panic(expected = "fibonacci(94) does not fit in u64")]
    fn test_fibonacci_rejects_overflowing_input() {
        fibonacci(FIBONACCI_MAX_INPUT + 1);
    }

    #[test]
    fn test_is_prime() {
        assert!(is_prime(97));
        assert!(!is_prime(100));
        assert!(is_prime(2));
        assert!(is_prime(3));
        assert!(!is_prime(0));
        assert!(!is_prime(1));
        assert!(!is_prime(9));
        assert!(!is_prime(49));
        assert!(is_prime(7919));
        assert!(is_prime(4_294_967_291));
        assert!(!is_prime(PRIME_CANDIDATE));
    }

    #[test]
    fn test_digit_sums() {
        assert_eq!(sum_of_digits(0), 0);
        assert_eq!(sum_of_digits(9876), 30);
        assert_eq!(sum_of_digits_range(10), 46);
        assert_eq!(sum_of_digits_range(100), 901);
        assert_eq!(sum_of_digits_range(1000), 13501);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(SUM_OF_DIGITS_LIMIT), "100,000,000");
    }

    #[test]
    fn test_report_lines() {
        assert_snapshot!(divisible_report(14), @"Count of numbers divisible by 3 or 5: 6");
        assert_snapshot!(fibonacci_report(10), @"Fibonacci(10): 55");
        assert_snapshot!(prime_report(97), @"97 is prime");
        assert_snapshot!(prime_report(PRIME_CANDIDATE), @"999998727 is not prime");
        assert_snapshot!(sum_of_digits_report(1000), @"Sum of all digits from 1 to 1,000: 13501");
    }
}
