//! Encrypted columns, compiled from configuration.

use std::sync::Arc;

use fnv::FnvHashMap as HashMap;
use indexmap::IndexMap;
use shardwrite_config::Config;
use tracing::debug;

use super::encryptor::{self, Encryptor};
use super::Error;
use crate::statement::Operator;
use crate::value::Value;

/// Physical column and the encryptor producing its values.
#[derive(Debug, Clone)]
pub struct QueryColumn {
    pub column: String,
    pub encryptor: Arc<dyn Encryptor>,
}

impl QueryColumn {
    pub fn new(column: impl ToString, encryptor: Arc<dyn Encryptor>) -> Self {
        Self {
            column: column.to_string(),
            encryptor,
        }
    }

    pub fn encrypt(&self, value: &Value) -> Result<Value, Error> {
        self.encryptor.encrypt(value)
    }
}

/// Logical column stored encrypted.
#[derive(Debug, Clone)]
pub struct EncryptColumn {
    pub name: String,
    pub cipher: QueryColumn,
    pub assisted_query: Option<QueryColumn>,
    pub like_query: Option<QueryColumn>,
}

impl EncryptColumn {
    pub fn new(name: impl ToString, cipher: QueryColumn) -> Self {
        Self {
            name: name.to_string(),
            cipher,
            assisted_query: None,
            like_query: None,
        }
    }

    pub fn with_assisted_query(mut self, assisted_query: QueryColumn) -> Self {
        self.assisted_query = Some(assisted_query);
        self
    }

    pub fn with_like_query(mut self, like_query: QueryColumn) -> Self {
        self.like_query = Some(like_query);
        self
    }

    /// Columns written next to the cipher column, assisted query first.
    pub fn derived(&self) -> impl Iterator<Item = &QueryColumn> {
        self.assisted_query.iter().chain(self.like_query.iter())
    }

    /// Every physical column a write to this column turns into.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        std::iter::once(&self.cipher)
            .chain(self.derived())
            .map(|query| query.column.as_str())
    }

    /// Cipher value.
    pub fn encrypt(&self, value: &Value) -> Result<Value, Error> {
        self.cipher.encrypt(value)
    }

    /// Assisted and like query values for `value`, in column order.
    pub fn derived_values(&self, value: &Value) -> Result<Vec<Value>, Error> {
        self.derived().map(|query| query.encrypt(value)).collect()
    }

    /// Column a predicate with `operator` is evaluated against.
    ///
    /// `LIKE` goes to the like query column when there is one,
    /// everything else to the assisted query column, and
    /// the cipher column is the fallback.
    pub fn query(&self, operator: Operator) -> &QueryColumn {
        if operator == Operator::Like {
            if let Some(ref like_query) = self.like_query {
                return like_query;
            }
        }
        self.assisted_query.as_ref().unwrap_or(&self.cipher)
    }
}

/// Encrypted columns of one table.
#[derive(Debug, Clone, Default)]
pub struct EncryptTable {
    pub name: String,
    columns: IndexMap<String, EncryptColumn>,
}

impl EncryptTable {
    pub fn column(&self, name: &str) -> Option<&EncryptColumn> {
        self.columns.get(&name.to_lowercase())
    }

    pub fn columns(&self) -> impl Iterator<Item = &EncryptColumn> {
        self.columns.values()
    }
}

/// Every encrypted column, looked up by logical table and column.
///
/// Immutable once built and shared between statements.
#[derive(Debug, Clone, Default)]
pub struct EncryptRule {
    tables: HashMap<String, EncryptTable>,
}

impl EncryptRule {
    /// Compile encrypted columns and resolve their encryptors.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let mut encryptors = HashMap::default();
        for each in &config.encryptors {
            encryptors.insert(each.name.as_str(), encryptor::create(each)?);
        }

        let mut rule = Self::default();

        for table in &config.encrypt_tables {
            for column in &table.columns {
                let lookup = |name: &str| {
                    encryptors
                        .get(name)
                        .cloned()
                        .ok_or_else(|| Error::MissingEncryptor {
                            table: table.name.clone(),
                            column: column.name.clone(),
                            encryptor: name.to_string(),
                        })
                };

                let mut encrypt_column = EncryptColumn::new(
                    &column.name,
                    QueryColumn::new(&column.cipher_column, lookup(column.cipher_encryptor.as_str())?),
                );

                if let (Some(name), Some(encryptor)) = (
                    &column.assisted_query_column,
                    &column.assisted_query_encryptor,
                ) {
                    encrypt_column =
                        encrypt_column.with_assisted_query(QueryColumn::new(name, lookup(encryptor.as_str())?));
                }

                if let (Some(name), Some(encryptor)) =
                    (&column.like_query_column, &column.like_query_encryptor)
                {
                    encrypt_column =
                        encrypt_column.with_like_query(QueryColumn::new(name, lookup(encryptor.as_str())?));
                }

                rule = rule.with_column(&table.name, encrypt_column);
            }
            debug!("encrypt table \"{}\" with {} columns", table.name, table.columns.len());
        }

        Ok(rule)
    }

    /// Add an encrypted column.
    pub fn with_column(mut self, table: &str, column: EncryptColumn) -> Self {
        let entry = self
            .tables
            .entry(table.to_lowercase())
            .or_insert_with(|| EncryptTable {
                name: table.to_string(),
                columns: IndexMap::new(),
            });
        entry.columns.insert(column.name.to_lowercase(), column);
        self
    }

    pub fn table(&self, table: &str) -> Option<&EncryptTable> {
        self.tables.get(&table.to_lowercase())
    }

    /// Encrypted column, if `table.column` is one.
    pub fn find_column(&self, table: &str, column: &str) -> Option<&EncryptColumn> {
        self.table(table)?.column(column)
    }

    /// Names of the encrypted columns of `table`.
    pub fn encrypted_columns(&self, table: &str) -> Vec<&str> {
        self.table(table)
            .map(|table| table.columns().map(|c| c.name.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
