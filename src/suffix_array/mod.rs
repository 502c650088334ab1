//! Suffix array construction.
//!
//! Two linear-time builders are provided: [`sais`], based on induced
//! sorting, and [`skew`], the difference-cover (DC3) algorithm. Both
//! produce a permutation of `0..=n` ordered by suffix, with the sentinel
//! suffix first, stored as `i32` (texts are bounded by `i32::MAX`).
//!
//! Each builder accepts a raw string (an alphabet is built internally),
//! a string with an explicit alphabet, or a pre-mapped integer sequence
//! with a terminal sentinel. The integer entry points exist because the
//! recursions work on reduced alphabets that can grow past 256 letters.

mod sais;
mod skew;

pub use sais::{sais, sais_from_ints, sais_with_alphabet};
pub use skew::{skew, skew_from_ints, skew_with_alphabet};
