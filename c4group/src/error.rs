//! Error types for C4Group reading and writing

use std::io;

use thiserror::Error;

/// Result type for C4Group operations
pub type Result<T> = std::result::Result<T, Error>;

/// C4Group error types
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Leading bytes are not the C4Group magic `1e 8c`
    #[error("invalid magic bytes")]
    InvalidMagic,

    /// Group header ID or version mismatch
    #[error("header fields (id or version) invalid")]
    InvalidHeader,

    /// `read_group` called on an entry without the child-group flag
    #[error("entry is not a child group")]
    NoChildGroup,

    /// `read_group` called after payload bytes were already consumed
    #[error("entry has already been read, cannot open child group")]
    AlreadyRead,

    /// Second `write_header` on the same writer
    #[error("header already written")]
    HeaderAlreadyWritten,

    /// Entry records or payload written before the group header
    #[error("initial group header missing")]
    NoHeader,

    /// More entry records than the header declared
    #[error("more entries than specified in the header")]
    TooManyEntries,

    /// Payload written while entry records are still outstanding
    #[error("not enough entry headers written")]
    NotEnoughEntries,

    /// Payload exceeds the sum of the declared entry sizes
    #[error("too much file data")]
    TooMuchWritten,

    /// Writer closed before all declared payload bytes were written
    #[error("not enough file data")]
    NotEnoughWritten,
}

impl Error {
    /// Recover an [`Error`] that crossed a `std::io` trait boundary.
    ///
    /// The magic shims and the writer's payload checks can only signal
    /// failures through `io::Error`; they wrap the real error so it can be
    /// unwrapped again here.
    pub(crate) fn from_io(err: io::Error) -> Self {
        match err.downcast::<Error>() {
            Ok(own) => own,
            Err(err) => Error::Io(err),
        }
    }

    /// Wrap for transport through a `std::io::Read`/`Write` implementation.
    pub(crate) fn into_io(self) -> io::Error {
        match self {
            Error::Io(err) => err,
            other => io::Error::other(other),
        }
    }
}
