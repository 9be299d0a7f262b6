use shardwrite_config::EncryptorKind;

use super::{Encryptor, Error};
use crate::value::Value;

/// Lowercase hex MD5 digest. Used for assisted queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct Md5Encryptor;

impl Encryptor for Md5Encryptor {
    fn kind(&self) -> EncryptorKind {
        EncryptorKind::Md5
    }

    fn encrypt(&self, value: &Value) -> Result<Value, Error> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        let digest = ::md5::compute(value.to_string().as_bytes());
        Ok(Value::Text(format!("{:x}", digest)))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_md5() {
        assert_eq!(
            Md5Encryptor.encrypt(&"test".into()).unwrap(),
            Value::from("098f6bcd4621d373cade4e832627b4f6")
        );
        assert_eq!(Md5Encryptor.encrypt(&Value::Null).unwrap(), Value::Null);
    }
}
