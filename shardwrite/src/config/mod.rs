//! Configuration.

pub mod snapshot;

pub use snapshot::RuleSnapshot;
pub use shardwrite_config::{Config, Dialect};

use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwap;
use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::Error;

static CONFIG: Lazy<ArcSwap<ConfigAndRules>> =
    Lazy::new(|| ArcSwap::from_pointee(ConfigAndRules::default()));

static LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// Current configuration.
pub fn config() -> Arc<ConfigAndRules> {
    CONFIG.load().clone()
}

/// Load the configuration file from disk.
pub fn load(path: &Path) -> Result<ConfigAndRules, Error> {
    let config = Config::load(path)?;
    set(config)
}

/// Compile rules and make this configuration current.
pub fn set(config: Config) -> Result<ConfigAndRules, Error> {
    let config = ConfigAndRules::new(config)?;
    CONFIG.store(Arc::new(config.clone()));
    Ok(config)
}

/// Toggle statement logging at runtime.
pub fn show_sql(show_sql: bool) {
    let _lock = LOCK.lock();
    let mut config = (*config()).clone();
    config.config.general.show_sql = show_sql;
    let mut rules = (*config.rules).clone();
    rules.show_sql = show_sql;
    config.rules = Arc::new(rules);
    CONFIG.store(Arc::new(config));
}

/// Configuration file and the rules compiled from it.
#[derive(Debug, Clone, Default)]
pub struct ConfigAndRules {
    pub config: Config,
    /// Shared by every statement rewritten with this configuration.
    pub rules: Arc<RuleSnapshot>,
}

impl ConfigAndRules {
    pub fn new(config: Config) -> Result<Self, Error> {
        config.check()?;
        let rules = Arc::new(RuleSnapshot::new(&config)?);
        Ok(Self { config, rules })
    }
}
