use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::read_to_string;
use std::path::Path;
use tracing::{info, warn};

use super::data_source::DataSource;
use super::encrypt::{EncryptColumn, EncryptTable, EncryptorConfig};
use super::error::Error;
use super::general::General;

/// Configuration.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// General configuration.
    #[serde(default)]
    pub general: General,

    /// Data sources and their actual schemas.
    #[serde(default)]
    pub data_sources: Vec<DataSource>,

    /// Encryptors referenced by encrypted columns.
    #[serde(default)]
    pub encryptors: Vec<EncryptorConfig>,

    /// Tables with encrypted columns.
    #[serde(default)]
    pub encrypt_tables: Vec<EncryptTable>,
}

impl Config {
    /// Load configuration from disk or use defaults.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let config = if let Ok(source) = read_to_string(path) {
            let config: Config = match toml::from_str(&source) {
                Ok(config) => config,
                Err(err) => return Err(Error::config(&source, err)),
            };
            info!("loaded \"{}\"", path.display());
            config
        } else {
            warn!(
                "\"{}\" doesn't exist, loading defaults instead",
                path.display()
            );
            Config::default()
        };

        config.check()?;

        if !config.encrypt_tables.is_empty() {
            info!(
                "{} encrypted tables, {} encryptors",
                config.encrypt_tables.len(),
                config.encryptors.len()
            );
        }

        Ok(config)
    }

    /// Parse configuration from a string.
    pub fn from_toml(source: &str) -> Result<Self, Error> {
        let config: Config = toml::from_str(source).map_err(|err| Error::config(source, err))?;
        config.check()?;
        Ok(config)
    }

    /// Validate settings that serde can't check on its own.
    ///
    /// Encryptor references are resolved later, when the
    /// rule snapshot is compiled.
    pub fn check(&self) -> Result<(), Error> {
        let mut names = HashSet::new();
        for data_source in &self.data_sources {
            if !names.insert(data_source.name.as_str()) {
                return Err(Error::DuplicateDataSource(data_source.name.clone()));
            }
        }

        let mut names = HashSet::new();
        for encryptor in &self.encryptors {
            if !names.insert(encryptor.name.as_str()) {
                return Err(Error::DuplicateEncryptor(encryptor.name.clone()));
            }
        }

        for table in &self.encrypt_tables {
            for column in &table.columns {
                check_pair(
                    table,
                    column,
                    column.assisted_query_column.is_some(),
                    column.assisted_query_encryptor.is_some(),
                    ("assisted_query_column", "assisted_query_encryptor"),
                )?;
                check_pair(
                    table,
                    column,
                    column.like_query_column.is_some(),
                    column.like_query_encryptor.is_some(),
                    ("like_query_column", "like_query_encryptor"),
                )?;
            }
        }

        Ok(())
    }

    /// Get data source by name.
    pub fn data_source(&self, name: &str) -> Option<&DataSource> {
        self.data_sources.iter().find(|ds| ds.name == name)
    }
}

fn check_pair(
    table: &EncryptTable,
    column: &EncryptColumn,
    has_column: bool,
    has_encryptor: bool,
    names: (&'static str, &'static str),
) -> Result<(), Error> {
    let (present, missing) = match (has_column, has_encryptor) {
        (true, false) => names,
        (false, true) => (names.1, names.0),
        _ => return Ok(()),
    };

    Err(Error::IncompleteColumn {
        table: table.name.clone(),
        column: column.name.clone(),
        present,
        missing,
    })
}
