//! Transparent column encryption.

pub mod encryptor;
pub mod error;
pub mod rewriter;
pub mod rule;

pub use encryptor::Encryptor;
pub use error::Error;
pub use rewriter::{rewrite_parameters, ParameterRewriter};
pub use rule::{EncryptColumn, EncryptRule, EncryptTable, QueryColumn};
