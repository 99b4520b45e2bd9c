//! Sum of the digit sums over a range.

use purrgram::oracle::{SUM_OF_DIGITS_LIMIT, sum_of_digits_report};

fn main() {
    println!("{}", sum_of_digits_report(SUM_OF_DIGITS_LIMIT));
}
