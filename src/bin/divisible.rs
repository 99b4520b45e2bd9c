//! Count of numbers divisible by 3 or 5.

use purrgram::oracle::{DIVISIBLE_LIMIT, divisible_report};

fn main() {
    println!("{}", divisible_report(DIVISIBLE_LIMIT));
}
