//! Settings categories.

use serde::{Deserialize, Serialize};

/// An independently read and written grouping of remote settings
///
/// The declaration order is the order in which categories are reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigCategory {
    Database,
    Network,
    Api,
    Auth,
    Storage,
    Pooler,
}

impl ConfigCategory {
    pub const ALL: [ConfigCategory; 6] = [
        ConfigCategory::Database,
        ConfigCategory::Network,
        ConfigCategory::Api,
        ConfigCategory::Auth,
        ConfigCategory::Storage,
        ConfigCategory::Pooler,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigCategory::Database => "database",
            ConfigCategory::Network => "network",
            ConfigCategory::Api => "api",
            ConfigCategory::Auth => "auth",
            ConfigCategory::Storage => "storage",
            ConfigCategory::Pooler => "pooler",
        }
    }
}

impl std::fmt::Display for ConfigCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
