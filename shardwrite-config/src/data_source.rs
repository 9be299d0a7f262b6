use serde::{Deserialize, Serialize};

/// Physical data source a route unit can point at.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct DataSource {
    /// Name used by route units.
    pub name: String,
    /// Actual schema backing this data source. Schema references
    /// in rewritten statements are replaced with it.
    #[serde(default)]
    pub schema: Option<String>,
}
