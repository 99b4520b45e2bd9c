//! Naive recursive Fibonacci.

use purrgram::oracle::{FIBONACCI_INPUT, fibonacci_report};

fn main() {
    println!("{}", fibonacci_report(FIBONACCI_INPUT));
}
