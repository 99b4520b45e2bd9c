//! Trial-division primality test.

use purrgram::oracle::{PRIME_CANDIDATE, prime_report};

fn main() {
    println!("{}", prime_report(PRIME_CANDIDATE));
}
