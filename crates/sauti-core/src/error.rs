//! Error types shared across the codec.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Invalid stream table, prefix, frame duration, or delimiter pair.
    /// Raised when a codec is constructed or when an encode call references a
    /// stream the table does not carry. Fatal; never recovered at call time.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A token sequence failed to parse. `offset` is the byte position of the
    /// offending token in the input string. Bad tokens are never skipped.
    #[error("malformed sequence at byte {offset}: {reason}")]
    MalformedSequence { offset: usize, reason: String },
}
