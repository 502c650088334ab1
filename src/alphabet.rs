//! Alphabets map the bytes of a reference string to a small dense range
//! of codes, with code zero reserved for a sentinel that is smaller than
//! every real letter. All index structures in this crate work on mapped
//! strings.

use num_traits::PrimInt;
use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// The sentinel byte. It is part of every alphabet and always maps to
/// code zero, so it sorts before all other letters.
pub const SENTINEL: u8 = 0;

/// A printable stand-in for the sentinel, used when mapped strings are
/// translated back for display. The NUL byte itself would be invisible.
pub const SENTINEL_SYMBOL: char = '𝕊';

/// A bijection between the bytes that occur in a reference string and
/// the dense code range `0..size`.
///
/// Codes are assigned in ascending byte order, so comparing mapped
/// strings is equivalent to comparing the originals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alphabet {
    map: [u8; 256],
    revmap: [u8; 256],
    size: usize,
}

impl Alphabet {
    /// Creates the alphabet of the bytes occurring in `reference`,
    /// plus the sentinel.
    pub fn new(reference: &str) -> Alphabet {
        let mut map = [0u8; 256];

        map[SENTINEL as usize] = 1;
        for &b in reference.as_bytes() {
            map[b as usize] = 1;
        }

        let mut revmap = [0u8; 256];
        let mut size = 0usize;
        for b in 0..256 {
            if map[b] == 1 {
                map[b] = size as u8;
                revmap[size] = b as u8;
                size += 1;
            }
        }

        Alphabet { map, revmap, size }
    }

    /// The number of letters in the alphabet, sentinel included. Never
    /// less than one.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Checks whether `b` is a letter of this alphabet.
    pub fn contains(&self, b: u8) -> bool {
        b == SENTINEL || self.map[b as usize] != 0
    }

    fn map_impl<T: PrimInt>(&self, x: &str, with_sentinel: bool) -> Result<Vec<T>> {
        let mut out = vec![T::zero(); x.len() + usize::from(with_sentinel)];
        for (o, &b) in out.iter_mut().zip(x.as_bytes()) {
            let code = self.map[b as usize];
            if code == 0 && b != SENTINEL {
                return Err(Error::AlphabetLookup(b));
            }
            *o = T::from(code).expect("alphabet codes fit in every primitive integer type");
        }
        Ok(out)
    }

    /// Translates a string into its code sequence.
    pub fn map_to_bytes(&self, x: &str) -> Result<Vec<u8>> {
        self.map_impl(x, false)
    }

    /// Translates a string into its code sequence with a terminal
    /// sentinel appended.
    pub fn map_to_bytes_with_sentinel(&self, x: &str) -> Result<Vec<u8>> {
        self.map_impl(x, true)
    }

    /// Translates a string into a code sequence widened to `i32`.
    ///
    /// The suffix array construction algorithms need integer codes
    /// because their recursions build reduced alphabets larger than a
    /// byte can hold.
    pub fn map_to_ints(&self, x: &str) -> Result<Vec<i32>> {
        self.map_impl(x, false)
    }

    /// Like [`Alphabet::map_to_ints`], with a terminal sentinel
    /// appended.
    pub fn map_to_ints_with_sentinel(&self, x: &str) -> Result<Vec<i32>> {
        self.map_impl(x, true)
    }

    fn revmap_impl(&self, xs: &[u8], strip_sentinel: bool) -> String {
        let strip = usize::from(strip_sentinel && xs.last() == Some(&SENTINEL));

        let mut out = String::with_capacity(xs.len());
        for &c in &xs[..xs.len() - strip] {
            if c == SENTINEL {
                out.push(SENTINEL_SYMBOL);
            } else {
                out.push(self.revmap[c as usize] as char);
            }
        }

        out
    }

    /// Maps a code sequence back to the string it was created from.
    /// Sentinels are rendered as [`SENTINEL_SYMBOL`].
    pub fn revmap_bytes(&self, xs: &[u8]) -> String {
        self.revmap_impl(xs, false)
    }

    /// Like [`Alphabet::revmap_bytes`], but drops a terminal sentinel
    /// from the output if the code sequence carries one.
    pub fn revmap_bytes_strip_sentinel(&self, xs: &[u8]) -> String {
        self.revmap_impl(xs, true)
    }
}

/// Builds an alphabet from `x` and maps `x` through it.
pub fn map_str(x: &str) -> (Vec<u8>, Alphabet) {
    let alpha = Alphabet::new(x);
    let xs = alpha
        .map_to_bytes(x)
        .expect("an alphabet built from the string maps it");
    (xs, alpha)
}

/// Builds an alphabet from `x` and maps `x` through it, appending a
/// terminal sentinel.
pub fn map_str_with_sentinel(x: &str) -> (Vec<u8>, Alphabet) {
    let alpha = Alphabet::new(x);
    let xs = alpha
        .map_to_bytes_with_sentinel(x)
        .expect("an alphabet built from the string maps it");
    (xs, alpha)
}

// An alphabet serializes as its three fields in order: forward table,
// reverse table, size. Both tables always hold 256 entries.
impl Serialize for Alphabet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut tup = serializer.serialize_tuple(3)?;
        tup.serialize_element(&self.map[..])?;
        tup.serialize_element(&self.revmap[..])?;
        tup.serialize_element(&self.size)?;
        tup.end()
    }
}

impl<'de> Deserialize<'de> for Alphabet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct AlphabetVisitor;

        impl<'de> Visitor<'de> for AlphabetVisitor {
            type Value = Alphabet;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("an alphabet (forward table, reverse table, size)")
            }

            fn visit_seq<A: SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> std::result::Result<Alphabet, A::Error> {
                let map: Vec<u8> = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let revmap: Vec<u8> = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let size: usize = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(2, &self))?;

                let map: [u8; 256] = map
                    .try_into()
                    .map_err(|_| de::Error::custom("alphabet forward table must hold 256 entries"))?;
                let revmap: [u8; 256] = revmap
                    .try_into()
                    .map_err(|_| de::Error::custom("alphabet reverse table must hold 256 entries"))?;

                Ok(Alphabet { map, revmap, size })
            }
        }

        deserializer.deserialize_tuple(3, AlphabetVisitor)
    }
}
