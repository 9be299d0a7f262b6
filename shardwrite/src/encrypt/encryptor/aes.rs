use aws_lc_rs::cipher::{
    DecryptionContext, PaddedBlockDecryptingKey, PaddedBlockEncryptingKey, UnboundCipherKey,
    AES_128,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use sha1::{Digest, Sha1};
use shardwrite_config::{EncryptorConfig, EncryptorKind};

use super::{Encryptor, Error};
use crate::value::Value;

const KEY: &str = "aes-key-value";

/// AES-128 in ECB mode with PKCS#7 padding, Base64 encoded.
///
/// The key is the first 16 bytes of the SHA-1 digest
/// of the `aes-key-value` property.
#[derive(Clone)]
pub struct AesEncryptor {
    key: [u8; 16],
}

impl std::fmt::Debug for AesEncryptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AesEncryptor").finish_non_exhaustive()
    }
}

impl AesEncryptor {
    pub fn new(config: &EncryptorConfig) -> Result<Self, Error> {
        let value = config
            .props
            .get(KEY)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| Error::InvalidProperty {
                encryptor: config.name.clone(),
                message: format!("\"{}\" is required", KEY),
            })?;

        Ok(Self::from_secret(value))
    }

    pub fn from_secret(secret: &str) -> Self {
        let digest = Sha1::digest(secret.as_bytes());
        let mut key = [0u8; 16];
        key.copy_from_slice(&digest[..16]);
        Self { key }
    }

    fn encrypting_key(&self) -> Result<PaddedBlockEncryptingKey, Error> {
        Ok(PaddedBlockEncryptingKey::ecb_pkcs7(UnboundCipherKey::new(
            &AES_128, &self.key,
        )?)?)
    }

    fn decrypting_key(&self) -> Result<PaddedBlockDecryptingKey, Error> {
        Ok(PaddedBlockDecryptingKey::ecb_pkcs7(UnboundCipherKey::new(
            &AES_128, &self.key,
        )?)?)
    }
}

impl Encryptor for AesEncryptor {
    fn kind(&self) -> EncryptorKind {
        EncryptorKind::Aes
    }

    fn encrypt(&self, value: &Value) -> Result<Value, Error> {
        if value.is_null() {
            return Ok(Value::Null);
        }

        let mut in_out = value.to_string().into_bytes();
        self.encrypting_key()?.encrypt(&mut in_out)?;

        Ok(Value::Text(STANDARD.encode(&in_out)))
    }

    fn decrypt(&self, value: &Value) -> Result<Value, Error> {
        let ciphertext = match value {
            Value::Null => return Ok(Value::Null),
            Value::Text(text) => text,
            value => return Err(Error::Cipher(format!("\"{}\" is not base64", value))),
        };

        let mut in_out = STANDARD
            .decode(ciphertext)
            .map_err(|err| Error::Cipher(err.to_string()))?;
        let plaintext = self
            .decrypting_key()?
            .decrypt(&mut in_out, DecryptionContext::None)?;

        String::from_utf8(plaintext.to_vec())
            .map(Value::Text)
            .map_err(|err| Error::Cipher(err.to_string()))
    }
}
