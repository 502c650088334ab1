//! Alignment descriptors for approximate matching.
//!
//! An alignment is a sequence of edit operations; its compact form is a
//! CIGAR string, runs of identical operations encoded as
//! `<count><op>` tokens over `{M, I, D}`.

use std::fmt::Write as _;

use crate::error::{Error, Result};

/// A single alignment operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edit {
    /// Match or mismatch; consumes a letter of both text and pattern.
    M,
    /// Insertion, a gap in the text; consumes a letter of the pattern
    /// only.
    I,
    /// Deletion, a gap in the pattern; consumes a letter of the text
    /// only.
    D,
}

impl Edit {
    fn symbol(self) -> char {
        match self {
            Edit::M => 'M',
            Edit::I => 'I',
            Edit::D => 'D',
        }
    }
}

/// Encodes a sequence of edit operations as a CIGAR string.
pub fn ops_to_cigar(ops: &[Edit]) -> String {
    let mut cigar = String::new();

    let mut i = 0;
    while i < ops.len() {
        let mut j = i + 1;
        while j < ops.len() && ops[j] == ops[i] {
            j += 1;
        }
        write!(cigar, "{}{}", j - i, ops[i].symbol()).expect("writing to a string cannot fail");
        i = j;
    }

    cigar
}

/// Decodes a CIGAR string into the sequence of edit operations it
/// describes.
///
/// The whole input must consist of `<digits><op>` tokens; anything else
/// fails with [`Error::InvalidCigar`].
pub fn cigar_to_ops(cigar: &str) -> Result<Vec<Edit>> {
    let bytes = cigar.as_bytes();
    let mut ops = Vec::new();

    let mut i = 0;
    while i < bytes.len() {
        let digits = bytes[i..].iter().take_while(|b| b.is_ascii_digit()).count();
        if digits == 0 {
            return Err(Error::InvalidCigar(cigar.to_string()));
        }
        let count: usize = cigar[i..i + digits]
            .parse()
            .map_err(|_| Error::InvalidCigar(cigar.to_string()))?;

        let op = match bytes.get(i + digits) {
            Some(b'M') => Edit::M,
            Some(b'I') => Edit::I,
            Some(b'D') => Edit::D,
            _ => return Err(Error::InvalidCigar(cigar.to_string())),
        };

        ops.extend(std::iter::repeat(op).take(count));
        i += digits + 1;
    }

    Ok(ops)
}

/// Expands the alignment of `p` against `x` at position `pos` described
/// by `cigar` into two equal-length rows, with `-` marking gaps.
pub fn extract_alignment(x: &str, p: &str, pos: usize, cigar: &str) -> Result<(String, String)> {
    let ops = cigar_to_ops(cigar)?;
    let (x, p) = (x.as_bytes(), p.as_bytes());

    let mut subx = String::new();
    let mut subp = String::new();
    let (mut i, mut j) = (pos, 0);

    for op in ops {
        match op {
            Edit::M => {
                subx.push(x[i] as char);
                subp.push(p[j] as char);
                i += 1;
                j += 1;
            }
            Edit::I => {
                subx.push('-');
                subp.push(p[j] as char);
                j += 1;
            }
            Edit::D => {
                subx.push(x[i] as char);
                subp.push('-');
                i += 1;
            }
        }
    }

    Ok((subx, subp))
}

/// Counts the edits in the alignment of `p` against `x` at `pos`
/// described by `cigar`: the columns of the extracted alignment whose
/// two letters differ (mismatches and gaps alike).
pub fn count_edits(x: &str, p: &str, pos: usize, cigar: &str) -> Result<usize> {
    let (subx, subp) = extract_alignment(x, p, pos, cigar)?;

    Ok(subx
        .chars()
        .zip(subp.chars())
        .filter(|(a, b)| a != b)
        .count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ops_to_cigar() {
        use Edit::*;
        assert_eq!(ops_to_cigar(&[]), "");
        assert_eq!(ops_to_cigar(&[M, M, M]), "3M");
        assert_eq!(ops_to_cigar(&[I, I, M, M, M, D, D, I]), "2I3M2D1I");
    }

    #[test]
    fn test_cigar_to_ops() {
        use Edit::*;
        assert_eq!(cigar_to_ops("").unwrap(), vec![]);
        assert_eq!(cigar_to_ops("1M").unwrap(), vec![M]);

        let ops = cigar_to_ops("2I3M2D1I").unwrap();
        assert_eq!(ops.len(), 8);
        assert_eq!(ops, vec![I, I, M, M, M, D, D, I]);
        assert_eq!(ops_to_cigar(&ops), "2I3M2D1I");
    }

    #[test]
    fn test_invalid_cigars() {
        for bad in ["M", "1", "1X", "1M2", "1Mx", "M1", " 1M", "1M ", "\u{661}M"] {
            assert_eq!(
                cigar_to_ops(bad),
                Err(Error::InvalidCigar(bad.to_string())),
                "input {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_roundtrip_on_canonical_cigars() {
        for c in ["", "1M", "10M3I1D2M", "2I3M2D1I", "100D"] {
            assert_eq!(ops_to_cigar(&cigar_to_ops(c).unwrap()), *c);
        }
    }

    #[test]
    fn test_extract_alignment() {
        // x: gac-gtta
        // p: gatagt-a
        let (subx, subp) = extract_alignment("ggacgttat", "gatagta", 1, "3M1I2M1D1M").unwrap();
        assert_eq!(subx, "gac-gtta");
        assert_eq!(subp, "gatagt-a");
    }

    #[test]
    fn test_count_edits() {
        assert_eq!(count_edits("ggacgttat", "gatagta", 1, "3M1I2M1D1M").unwrap(), 3);
        assert_eq!(count_edits("acgt", "acgt", 0, "4M").unwrap(), 0);
        assert_eq!(count_edits("acgt", "aagt", 0, "4M").unwrap(), 1);
        assert!(count_edits("acgt", "acgt", 0, "4Z").is_err());
    }
}
