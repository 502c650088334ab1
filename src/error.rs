/// An error produced while mapping strings or parsing alignment
/// descriptors.
///
/// Everything else the crate reports (empty inputs, patterns longer
/// than the text, searches without hits) is a valid result, not an
/// error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A byte that is not part of the alphabet was used in a string
    /// mapped through it.
    AlphabetLookup(u8),
    /// A CIGAR string did not match the `(\d+[MID])*` grammar.
    InvalidCigar(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::AlphabetLookup(b) => {
                write!(f, "byte {:#04x} is not in the alphabet", b)
            }
            Error::InvalidCigar(cigar) => {
                write!(f, "invalid cigar string: {:?}", cigar)
            }
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
