use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Encryption algorithm backing an encryptor.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum EncryptorKind {
    /// AES-128, reversible. Requires the `aes-key-value` property.
    #[default]
    Aes,
    /// MD5 digest. Deterministic and one-way, good for assisted queries.
    Md5,
    /// Per-character digest keeping `LIKE` wildcards intact.
    CharDigestLike,
}

/// Named encryptor referenced by encrypted columns.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct EncryptorConfig {
    pub name: String,
    pub kind: EncryptorKind,
    /// Algorithm properties, e.g. `aes-key-value`.
    #[serde(default)]
    pub props: BTreeMap<String, String>,
}

/// Table with at least one encrypted column.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct EncryptTable {
    /// Logical table name.
    pub name: String,
    #[serde(default)]
    pub columns: Vec<EncryptColumn>,
}

/// Encrypted column.
///
/// The logical column only exists for the application. Data sources
/// store the cipher column and, optionally, the assisted query and
/// like query columns next to it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct EncryptColumn {
    /// Logical column name.
    pub name: String,
    pub cipher_column: String,
    pub cipher_encryptor: String,
    #[serde(default)]
    pub assisted_query_column: Option<String>,
    #[serde(default)]
    pub assisted_query_encryptor: Option<String>,
    #[serde(default)]
    pub like_query_column: Option<String>,
    #[serde(default)]
    pub like_query_encryptor: Option<String>,
    /// Plaintext column kept during migrations. Informational only,
    /// the rewriter never writes to it.
    #[serde(default)]
    pub plain_column: Option<String>,
}
