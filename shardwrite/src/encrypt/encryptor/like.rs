use std::str::FromStr;

use shardwrite_config::{EncryptorConfig, EncryptorKind};

use super::{Encryptor, Error};
use crate::value::Value;

/// Characters up to this one are digested without the offset.
const MAX_NUMERIC_LETTER_CHAR: u32 = 255;

/// Digests every character on its own so `LIKE` patterns
/// still match. `%` and `_` are left alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharDigestLikeEncryptor {
    delta: u32,
    mask: u32,
    start: u32,
}

impl Default for CharDigestLikeEncryptor {
    fn default() -> Self {
        Self {
            delta: 1,
            mask: 0xF7D,
            start: 0x4E00,
        }
    }
}

impl CharDigestLikeEncryptor {
    pub fn new(config: &EncryptorConfig) -> Result<Self, Error> {
        let defaults = Self::default();
        Ok(Self {
            delta: prop(config, "delta", defaults.delta)?,
            mask: prop(config, "mask", defaults.mask)?,
            start: prop(config, "start", defaults.start)?,
        })
    }

    fn digest(&self, c: char) -> char {
        if c == '%' || c == '_' {
            return c;
        }
        let code = c as u32;
        let masked = code.wrapping_add(self.delta) & self.mask;
        let masked = if code <= MAX_NUMERIC_LETTER_CHAR {
            masked
        } else {
            masked.wrapping_add(self.start)
        };
        char::from_u32(masked).unwrap_or(c)
    }
}

fn prop(config: &EncryptorConfig, name: &str, default: u32) -> Result<u32, Error> {
    let Some(value) = config.props.get(name) else {
        return Ok(default);
    };
    let value = value.trim();
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => u32::from_str(value).ok(),
    };
    parsed.ok_or_else(|| Error::InvalidProperty {
        encryptor: config.name.clone(),
        message: format!("\"{}\" must be an integer, got \"{}\"", name, value),
    })
}

impl Encryptor for CharDigestLikeEncryptor {
    fn kind(&self) -> EncryptorKind {
        EncryptorKind::CharDigestLike
    }

    fn encrypt(&self, value: &Value) -> Result<Value, Error> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        Ok(Value::Text(
            value.to_string().chars().map(|c| self.digest(c)).collect(),
        ))
    }
}

#[cfg(test)]
mod test {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn test_wildcards_kept() {
        let like = CharDigestLikeEncryptor::default();
        let pattern = like.encrypt(&"%ab_".into()).unwrap();
        let Value::Text(pattern) = pattern else {
            panic!("not text");
        };
        assert!(pattern.starts_with('%'));
        assert!(pattern.ends_with('_'));
        assert_eq!(pattern.chars().count(), 4);
    }

    #[test]
    fn test_digest_per_character() {
        let like = CharDigestLikeEncryptor::default();
        let full = like.encrypt(&"abcd".into()).unwrap().to_string();
        let part = like.encrypt(&"bc".into()).unwrap().to_string();
        assert!(full.contains(&part));
    }

    #[test]
    fn test_known_values() {
        let like = CharDigestLikeEncryptor::default();
        // ('1' + 1) & 0xF7D
        assert_eq!(like.digest('1'), '0');
        // (('中' + 1) & 0xF7D) + 0x4E00
        let expected = char::from_u32((('中' as u32 + 1) & 0xF7D) + 0x4E00).unwrap();
        assert_eq!(like.digest('中'), expected);
    }

    #[test]
    fn test_props() {
        let mut props = BTreeMap::new();
        props.insert("mask".to_string(), "0xFFF".to_string());
        props.insert("delta".to_string(), "2".to_string());
        let config = EncryptorConfig {
            name: "like".into(),
            kind: EncryptorKind::CharDigestLike,
            props,
        };
        let like = CharDigestLikeEncryptor::new(&config).unwrap();
        assert_eq!(like.delta, 2);
        assert_eq!(like.mask, 0xFFF);
        assert_eq!(like.start, 0x4E00);

        let mut config = config;
        config.props.insert("start".into(), "abc".into());
        assert!(CharDigestLikeEncryptor::new(&config).is_err());
    }

    #[test]
    fn test_large_props_wrap() {
        let like = CharDigestLikeEncryptor {
            delta: u32::MAX,
            mask: u32::MAX,
            start: u32::MAX,
        };
        // 'b' + u32::MAX wraps around to 'a'.
        assert_eq!(like.digest('b'), 'a');
        let pattern = like.encrypt(&"%中_".into()).unwrap().to_string();
        assert!(pattern.starts_with('%'));
        assert!(pattern.ends_with('_'));
    }
}
