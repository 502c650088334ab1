//! String generators and reference implementations shared by the
//! integration tests. Each test binary compiles its own copy, so not
//! every helper is used everywhere.
#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A random string of length `len` over the letters of `alphabet`.
pub fn random_string(rng: &mut StdRng, alphabet: &str, len: usize) -> String {
    let letters: Vec<char> = alphabet.chars().collect();
    (0..len)
        .map(|_| letters[rng.gen_range(0..letters.len())])
        .collect()
}

/// The Fibonacci string: `fib(0) = "a"`, `fib(1) = "b"`,
/// `fib(n + 1) = fib(n - 1) + fib(n)`.
pub fn fibonacci_string(n: usize) -> String {
    let (mut prev, mut cur) = ("a".to_string(), "b".to_string());
    for _ in 0..n {
        let next = format!("{}{}", prev, cur);
        prev = cur;
        cur = next;
    }
    prev
}

/// A mixed corpus of the string families the invariants are checked
/// against: random strings over small alphabets, singleton runs and
/// Fibonacci strings.
pub fn corpus() -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut corpus = vec![String::new(), "mississippi".to_string()];

    for len in [1, 2, 13, 60, 250] {
        corpus.push(random_string(&mut rng, "acgt", len));
        corpus.push(random_string(&mut rng, "abcdefg", len));
        corpus.push("a".repeat(len));
    }
    for n in [0, 1, 6, 12] {
        corpus.push(fibonacci_string(n));
    }

    corpus
}

/// Patterns worth searching `x` for: occurring substrings, prefixes and
/// suffixes, the empty pattern, and random strings that may use letters
/// `x` does not have.
pub fn patterns_for(rng: &mut StdRng, x: &str) -> Vec<String> {
    let mut patterns = vec![String::new(), x.to_string()];

    for _ in 0..5 {
        patterns.push(random_substring(rng, x));
        patterns.push(x[..rng.gen_range(0..=x.len())].to_string());
        patterns.push(x[rng.gen_range(0..=x.len())..].to_string());
        let len = rng.gen_range(1..6);
        patterns.push(random_string(rng, "abxy", len));
    }

    patterns
}

/// A random substring of `x` (possibly empty).
pub fn random_substring(rng: &mut StdRng, x: &str) -> String {
    let i = rng.gen_range(0..=x.len());
    let j = rng.gen_range(i..=x.len());
    x[i..j].to_string()
}

/// All positions where `p` occurs in `x`, by direct comparison. The
/// empty pattern occurs at every position, including one past the end.
pub fn naive_occurrences(x: &str, p: &str) -> Vec<usize> {
    let (x, p) = (x.as_bytes(), p.as_bytes());
    if p.len() > x.len() {
        return vec![];
    }
    (0..=x.len() - p.len())
        .filter(|&i| &x[i..i + p.len()] == p)
        .collect()
}

/// The suffix array of the sentinel-terminated mapped `x`, by sorting
/// suffixes.
pub fn naive_suffix_array(x: &str) -> Vec<i32> {
    let (xs, _) = stridex::alphabet::map_str_with_sentinel(x);
    let mut sa: Vec<i32> = (0..xs.len() as i32).collect();
    sa.sort_by(|&i, &j| xs[i as usize..].cmp(&xs[j as usize..]));
    sa
}
