//! Startup configuration: the Category Cap Table and the reimbursement fraction.
//!
//! Resolution is two-layered. An override file given on the command line wins,
//! otherwise the defaults compiled into the binary are used.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::config::ConfigError;
use crate::types::Amount;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../config/default.toml");

/// Monthly reimbursement ceiling for one category.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CategoryCap {
    pub category: String,
    pub limit: Amount
}

/// The closed set of reimbursable categories, in configured order.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CapTable {
    caps: Vec<CategoryCap>
}

impl CapTable {
    pub fn new(caps: Vec<CategoryCap>) -> Result<Self, ConfigError> {
        if caps.is_empty() {
            return Err(ConfigError::NoCaps);
        }

        let mut seen: Vec<String> = Vec::with_capacity(caps.len());

        for cap in &caps {
            let key = cap.category.trim().to_lowercase();

            if key.is_empty() {
                return Err(ConfigError::BlankCategory);
            }

            if seen.contains(&key) {
                return Err(ConfigError::DuplicateCategory(cap.category.clone()));
            }

            seen.push(key);
        }

        Ok(Self { caps })
    }

    /// Looks a category up case-insensitively, returning its configured spelling and limit.
    pub fn resolve(&self, category: &str) -> Option<&CategoryCap> {
        let key = category.trim().to_lowercase();
        self.caps.iter().find(|cap| cap.category.trim().to_lowercase() == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryCap> {
        self.caps.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.caps.iter().map(|cap| cap.category.as_str())
    }
}

/// Immutable process configuration handed to the engine at construction.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Settings {
    pub caps: CapTable,
    /// Share of a reimbursable expense that is requested back automatically.
    pub reimbursement_fraction: Decimal
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    reimbursement_fraction: Decimal,
    caps: Vec<RawCap>
}

#[derive(Debug, Deserialize)]
struct RawCap {
    category: String,
    limit: i64
}

impl Settings {
    pub fn new(caps: CapTable, reimbursement_fraction: Decimal) -> Result<Self, ConfigError> {
        if reimbursement_fraction <= Decimal::ZERO || reimbursement_fraction > Decimal::ONE {
            return Err(ConfigError::InvalidFraction(reimbursement_fraction));
        }

        Ok(Self {
            caps,
            reimbursement_fraction
        })
    }

    /// Loads the override file when one is given, the embedded defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source
                })?;
                Self::from_toml_str(&content)
            }
            None => Self::from_toml_str(DEFAULT_CONFIG)
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawSettings = toml::from_str(content)?;

        let caps = raw.caps.into_iter()
            .map(|cap| {
                let limit = Amount::try_from(cap.limit).map_err(|_| ConfigError::InvalidLimit {
                    category: cap.category.clone(),
                    limit: cap.limit
                })?;

                Ok(CategoryCap {
                    category: cap.category.trim().to_string(),
                    limit
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Self::new(CapTable::new(caps)?, raw.reimbursement_fraction)
    }
}
