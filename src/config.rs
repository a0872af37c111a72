//! Cart configuration: storage namespace and persistence mode.

use clap::ValueEnum;

pub const DEFAULT_NAMESPACE: &str = "GoMarketplace";

/// Which snapshot an operation writes to storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PersistMode {
    /// Write the items as they were before the operation ran, so storage
    /// trails memory by one operation.
    #[default]
    Lagged,
    /// Write the items as they are after the operation ran.
    Current,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    pub namespace: String,
    pub persist_mode: PersistMode,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            persist_mode: PersistMode::default(),
        }
    }
}

impl CartConfig {
    pub fn new(namespace: impl Into<String>, persist_mode: PersistMode) -> Self {
        Self {
            namespace: namespace.into(),
            persist_mode,
        }
    }

    /// The single key the cart blob lives under.
    pub fn storage_key(&self) -> String {
        format!("@{}:cart", self.namespace)
    }
}
