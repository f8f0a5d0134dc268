//! Editor configuration.

use crate::error::{Result, SeatError};
use serde::{Deserialize, Serialize};

/// Provisional names handed to freshly added student desks before a real
/// roster is imported.
const DEFAULT_SEED_NAMES: &[&str] = &[
    "Alex", "Blair", "Casey", "Devon", "Emery", "Finley", "Gray", "Harper", "Indy", "Jordan",
    "Kai", "Logan", "Morgan", "Noel", "Oakley", "Parker", "Quinn", "Reese", "Sage", "Taylor",
    "Umi", "Val", "Wren", "Xen", "Yael", "Zion",
];

/// Configuration for an `EntityStore` and the editor built on it.
///
/// Every field is optional in JSON; missing keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeatConfig {
    /// Desks per row when auto-placing new desks. Default: **6**.
    pub desks_per_row: usize,

    /// Local-storage entry holding the layout table. Default: **"classroomLayouts"**.
    pub storage_key: String,

    /// Names consumed, in order, by newly added student desks.
    pub seed_names: Vec<String>,

    /// Current-layout name before anything is loaded. Default: **"default"**.
    pub default_layout: String,
}

impl Default for SeatConfig {
    fn default() -> Self {
        Self {
            desks_per_row: 6,
            storage_key: "classroomLayouts".to_string(),
            seed_names: DEFAULT_SEED_NAMES.iter().map(|s| s.to_string()).collect(),
            default_layout: "default".to_string(),
        }
    }
}

impl SeatConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| SeatError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.desks_per_row == 0 {
            return Err(SeatError::InvalidConfig(
                "desksPerRow must be at least 1".to_string(),
            ));
        }
        if self.storage_key.is_empty() {
            return Err(SeatError::InvalidConfig(
                "storageKey must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = SeatConfig::from_json(r#"{"desksPerRow": 4}"#).unwrap();
        assert_eq!(config.desks_per_row, 4);
        assert_eq!(config.storage_key, "classroomLayouts");
        assert_eq!(config.seed_names.len(), DEFAULT_SEED_NAMES.len());
    }

    #[test]
    fn zero_row_width_is_rejected() {
        let err = SeatConfig::from_json(r#"{"desksPerRow": 0}"#).unwrap_err();
        assert!(matches!(err, SeatError::InvalidConfig(_)));
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(SeatConfig::from_json("{desksPerRow").is_err());
    }
}
