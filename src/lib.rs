//! String indexes and pattern matching for byte-oriented text.
//!
//! The crate builds compact in-memory indexes over a reference string
//! and answers exact and approximate occurrence queries against them:
//!
//! - [`suffix_array`]: linear-time suffix array construction, both by
//!   induced sorting ([`suffix_array::sais`]) and with the skew
//!   algorithm ([`suffix_array::skew`]).
//! - [`SuffixTree`]: naive and McCreight construction, subtree search,
//!   and suffix/LCP array extraction by traversal.
//! - [`FmIndex`]: the Burrows-Wheeler transform with C- and O-tables,
//!   exact backward search, and approximate search with an edit budget
//!   reporting CIGAR alignments.
//! - [`exact`]: the classic raw-text algorithms (naive, border search,
//!   KMP, Boyer-Moore-Horspool) sharing one visitor contract.
//! - [`Trie`]: an Aho-Corasick automaton for multi-pattern matching.
//!
//! Texts and patterns are byte strings; all indexes map them through an
//! [`Alphabet`] that assigns the bytes actually present small dense
//! codes, with code zero reserved for a terminal sentinel.
//!
//! Matches are delivered through visitor callbacks, invoked
//! synchronously during the search: `FnMut(usize)` for exact matches
//! and `FnMut(usize, &str)` with a CIGAR string for approximate ones.
//! Every index is immutable once built, so independent queries may run
//! in parallel against a shared index without synchronization.
//!
//! ```
//! use stridex::FmIndex;
//!
//! let index = FmIndex::new("mississippi");
//! let mut positions = Vec::new();
//! index.exact_search("ssi", |i| positions.push(i));
//! positions.sort();
//! assert_eq!(positions, vec![2, 5]);
//! ```

#![allow(clippy::len_without_is_empty)]

pub mod aho_corasick;
pub mod alphabet;
pub mod approx;
pub mod border_array;
pub mod bwt;
pub mod error;
pub mod exact;
pub mod fm_index;
pub mod suffix_array;
pub mod suffix_tree;

#[cfg(test)]
mod testutil;

pub use aho_corasick::Trie;
pub use alphabet::Alphabet;
pub use error::{Error, Result};
pub use fm_index::FmIndex;
pub use suffix_tree::SuffixTree;
