//! Suffix array invariants: both builders produce the sorted
//! permutation of all suffix start positions, sentinel suffix first.

mod testutil;

use stridex::alphabet::{map_str_with_sentinel, Alphabet};
use stridex::suffix_array::{sais, sais_with_alphabet, skew, skew_with_alphabet};

#[test]
fn test_mississippi() {
    let expected = vec![11, 10, 7, 4, 1, 0, 9, 8, 6, 3, 5, 2];
    assert_eq!(sais("mississippi"), expected);
    assert_eq!(skew("mississippi"), expected);
}

fn check_invariants(x: &str, sa: &[i32]) {
    let (xs, _) = map_str_with_sentinel(x);
    assert_eq!(sa.len(), xs.len());

    // The sentinel suffix comes first.
    assert_eq!(sa[0] as usize, xs.len() - 1);

    // The suffixes are strictly increasing.
    for i in 1..sa.len() {
        let a = &xs[sa[i - 1] as usize..];
        let b = &xs[sa[i] as usize..];
        assert!(a < b, "x = {:?}, i = {}", x, i);
    }

    // The entries are a permutation of all positions.
    let mut seen = vec![false; sa.len()];
    for &i in sa {
        seen[i as usize] = true;
    }
    assert!(seen.iter().all(|&s| s), "x = {:?}", x);
}

#[test]
fn test_sais_invariants() {
    for x in testutil::corpus() {
        check_invariants(&x, &sais(&x));
    }
}

#[test]
fn test_skew_invariants() {
    for x in testutil::corpus() {
        check_invariants(&x, &skew(&x));
    }
}

#[test]
fn test_builders_agree() {
    for x in testutil::corpus() {
        assert_eq!(sais(&x), skew(&x), "x = {:?}", x);
        assert_eq!(sais(&x), testutil::naive_suffix_array(&x), "x = {:?}", x);
    }
}

#[test]
fn test_explicit_alphabet_may_be_wider_than_the_text() {
    let alpha = Alphabet::new("abcdefgh");
    for x in ["", "a", "hhhh", "abcabc", "hagfbace"] {
        let expected = testutil::naive_suffix_array(x);
        // The naive reference maps through x's own alphabet, but the
        // order of suffixes does not depend on which alphabet maps
        // them.
        assert_eq!(sais_with_alphabet(x, &alpha).unwrap(), expected, "x = {:?}", x);
        assert_eq!(skew_with_alphabet(x, &alpha).unwrap(), expected, "x = {:?}", x);
    }
}

#[test]
fn test_unmappable_text_is_an_error() {
    let alpha = Alphabet::new("ab");
    assert!(sais_with_alphabet("abz", &alpha).is_err());
    assert!(skew_with_alphabet("abz", &alpha).is_err());
}
