use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// SQL dialect spoken by the data sources behind the rewriter.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    MySql,
    PostgreSql,
    Oracle,
    SqlServer,
    H2,
}

impl Dialect {
    /// Dialects using `LIMIT row_count OFFSET offset` can't skip rows
    /// on every shard, so the row count has to include the offset
    /// before the query is fanned out.
    pub fn needs_row_count_rewrite(&self) -> bool {
        matches!(self, Self::MySql | Self::PostgreSql | Self::H2)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Dialect::MySql => "mysql",
            Dialect::PostgreSql => "postgresql",
            Dialect::Oracle => "oracle",
            Dialect::SqlServer => "sqlserver",
            Dialect::H2 => "h2",
        };
        f.write_str(value)
    }
}

impl FromStr for Dialect {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mysql" => Ok(Dialect::MySql),
            "postgresql" | "postgres" => Ok(Dialect::PostgreSql),
            "oracle" => Ok(Dialect::Oracle),
            "sqlserver" => Ok(Dialect::SqlServer),
            "h2" => Ok(Dialect::H2),
            _ => Err(()),
        }
    }
}

/// Settings that apply to every statement going through the rewriter.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct General {
    /// Dialect of the backing data sources.
    ///
    /// _Default:_ `mysql`
    #[serde(default)]
    pub dialect: Dialect,

    /// Row count pushed down to every shard when a `LIMIT` can't be
    /// applied shard-locally, e.g. `GROUP BY` merged in memory.
    ///
    /// _Default:_ `2147483647`
    #[serde(default = "General::max_row_count")]
    pub max_row_count: u64,

    /// Log the logical statement and every rewritten unit.
    ///
    /// _Default:_ `false`
    #[serde(default)]
    pub show_sql: bool,
}

impl Default for General {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            max_row_count: Self::max_row_count(),
            show_sql: false,
        }
    }
}

impl General {
    const fn max_row_count() -> u64 {
        i32::MAX as u64
    }
}
