//! Units of measure

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::entry::EntryError;

/// Unit a product is counted in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Kilograms
    #[default]
    Kg,
    /// Litres
    Ltr,
    /// Pieces
    Nos,
}

impl Unit {
    /// Cell text for this unit
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kg => "kg",
            Self::Ltr => "ltr",
            Self::Nos => "nos",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = EntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kg" => Ok(Self::Kg),
            "ltr" => Ok(Self::Ltr),
            "nos" => Ok(Self::Nos),
            _ => Err(EntryError::InvalidUnit(s.to_string())),
        }
    }
}
