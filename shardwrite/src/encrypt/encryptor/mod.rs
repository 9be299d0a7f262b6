//! Encryptors turning plaintext into what's stored
//! in cipher, assisted-query and like-query columns.

pub mod aes;
pub mod like;
pub mod md5;

pub use self::aes::AesEncryptor;
pub use self::like::CharDigestLikeEncryptor;
pub use self::md5::Md5Encryptor;

use std::fmt::Debug;
use std::sync::Arc;

use shardwrite_config::{EncryptorConfig, EncryptorKind};

use super::Error;
use crate::value::Value;

/// Transforms column values.
///
/// Shared between statements, so it can't hold any
/// per-statement state.
pub trait Encryptor: Send + Sync + Debug {
    /// Encryptor kind, for logging.
    fn kind(&self) -> EncryptorKind;

    /// Encrypt a single value. `NULL` stays `NULL`.
    fn encrypt(&self, value: &Value) -> Result<Value, Error>;

    /// Decrypt a value produced by [`Encryptor::encrypt`].
    /// One-way encryptors return an error.
    fn decrypt(&self, value: &Value) -> Result<Value, Error> {
        let _ = value;
        Err(Error::Cipher(format!("{:?} can't decrypt", self.kind())))
    }
}

/// Build an encryptor from its configuration.
pub fn create(config: &EncryptorConfig) -> Result<Arc<dyn Encryptor>, Error> {
    Ok(match config.kind {
        EncryptorKind::Aes => Arc::new(AesEncryptor::new(config)?),
        EncryptorKind::Md5 => Arc::new(Md5Encryptor),
        EncryptorKind::CharDigestLike => Arc::new(CharDigestLikeEncryptor::new(config)?),
    })
}
