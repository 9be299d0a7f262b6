use fnv::FnvHashMap as HashMap;
use shardwrite_config::{Config, Dialect, General};

use crate::encrypt::{EncryptRule, Error};

/// Immutable view of the rules a statement is rewritten with.
#[derive(Debug, Clone)]
pub struct RuleSnapshot {
    pub dialect: Dialect,
    pub max_row_count: u64,
    pub show_sql: bool,
    /// Data source name to its actual schema.
    schemas: HashMap<String, String>,
    pub encrypt: EncryptRule,
}

impl Default for RuleSnapshot {
    fn default() -> Self {
        let general = General::default();
        Self {
            dialect: general.dialect,
            max_row_count: general.max_row_count,
            show_sql: general.show_sql,
            schemas: HashMap::default(),
            encrypt: EncryptRule::default(),
        }
    }
}

impl RuleSnapshot {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let schemas = config
            .data_sources
            .iter()
            .filter_map(|ds| ds.schema.clone().map(|schema| (ds.name.clone(), schema)))
            .collect();

        Ok(Self {
            dialect: config.general.dialect,
            max_row_count: config.general.max_row_count,
            show_sql: config.general.show_sql,
            schemas,
            encrypt: EncryptRule::new(config)?,
        })
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_schema(mut self, data_source: &str, schema: &str) -> Self {
        self.schemas
            .insert(data_source.to_string(), schema.to_string());
        self
    }

    pub fn with_encrypt(mut self, encrypt: EncryptRule) -> Self {
        self.encrypt = encrypt;
        self
    }

    /// Actual schema behind a data source.
    pub fn schema(&self, data_source: &str) -> Option<&str> {
        self.schemas.get(data_source).map(|schema| schema.as_str())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults() {
        let rules = RuleSnapshot::default();
        assert_eq!(rules.dialect, Dialect::MySql);
        assert_eq!(rules.max_row_count, i32::MAX as u64);
        assert!(!rules.show_sql);
        assert!(rules.encrypt.is_empty());
        assert!(rules.schema("ds_0").is_none());
    }

    #[test]
    fn test_from_config() {
        let config = Config::from_toml(
            r#"
[general]
max_row_count = 1000

[[data_sources]]
name = "ds_0"
schema = "shard_0"

[[data_sources]]
name = "ds_1"
"#,
        )
        .unwrap();
        let rules = RuleSnapshot::new(&config).unwrap();
        assert_eq!(rules.max_row_count, 1000);
        assert_eq!(rules.schema("ds_0"), Some("shard_0"));
        assert_eq!(rules.schema("ds_1"), None);
    }
}
