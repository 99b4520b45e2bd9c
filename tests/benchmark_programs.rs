//! Runs the quick benchmark binaries and checks their single output line.
//!
//! `divisible` and `sum_of_digits` loop over 10^9 and 10^8 values and are
//! only covered through `purrgram::oracle`.

use std::process::Command;

fn run(binary: &str) -> String {
    let output = Command::new(binary).output().expect("failed to run benchmark");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("benchmark printed invalid UTF-8");
    assert_eq!(stdout.lines().count(), 1);
    stdout.trim_end().to_owned()
}

#[test]
fn test_fibonacci_program() {
    insta::assert_snapshot!(run(env!("CARGO_BIN_EXE_fibonacci")), @"Fibonacci(35): 9227465");
}

#[test]
fn test_prime_program() {
    insta::assert_snapshot!(run(env!("CARGO_BIN_EXE_prime")), @"999998727 is not prime");
}
