//! Configuration errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Toml(#[from] toml::de::Error),

    #[error("config error on line {line}: {message}\n\n{snippet}")]
    Config {
        line: usize,
        message: String,
        snippet: String,
    },

    #[error("duplicate data source \"{0}\"")]
    DuplicateDataSource(String),

    #[error("duplicate encryptor \"{0}\"")]
    DuplicateEncryptor(String),

    #[error("column \"{table}.{column}\" sets {present} without {missing}")]
    IncompleteColumn {
        table: String,
        column: String,
        present: &'static str,
        missing: &'static str,
    },
}

impl Error {
    /// Build a parse error pointing at the offending line
    /// of the configuration file.
    pub fn config(source: &str, err: toml::de::Error) -> Self {
        let line = err
            .span()
            .map(|span| source[..span.start.min(source.len())].matches('\n').count() + 1)
            .unwrap_or(1);
        let snippet = source
            .lines()
            .nth(line - 1)
            .map(|l| format!("{} | {}", line, l))
            .unwrap_or_default();

        Self::Config {
            line,
            message: err.message().to_owned(),
            snippet,
        }
    }
}
