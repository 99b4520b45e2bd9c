//! Purrgram benchmark programs.
//!
//! The binaries in `src/bin` each run one reference computation from
//! [`oracle`] and print a single result line. They share nothing with the
//! runtime in `crates/purr-runtime`.

pub mod oracle;
