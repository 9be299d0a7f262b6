use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("token at {begin}..{end} is outside of the statement ({len} bytes)")]
    TokenOutOfBounds { begin: usize, end: usize, len: usize },

    #[error("token at {begin} overlaps the previous token ending at {previous_end}")]
    TokensOverlap { begin: usize, previous_end: usize },

    #[error("{token} token doesn't match the statement: {reason}")]
    StatementMismatch {
        token: &'static str,
        reason: &'static str,
    },

    #[error("{0}")]
    Encrypt(#[from] crate::encrypt::Error),
}
