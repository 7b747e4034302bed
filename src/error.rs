/// An error that can occur when building, querying, saving, or loading an index.
#[derive(Debug)]
pub enum Error {
    /// The input was not a `.fasta` file, was empty, or had a malformed header.
    InputFormat(String),
    /// A query byte was not part of the indexed alphabet.
    UnknownSymbol(u8),
    /// An I/O failure occurred while saving or loading an index.
    Io(std::io::Error),
    /// An internal invariant was violated (a bug, not a user error).
    Invariant(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InputFormat(msg) => write!(f, "invalid FASTA input: {}", msg),
            Error::UnknownSymbol(c) => write!(f, "unknown symbol: {:?}", *c as char),
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Invariant(msg) => write!(f, "internal invariant violated: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
