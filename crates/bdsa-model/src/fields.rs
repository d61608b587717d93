//! Canonical schema fields and their standardized output columns.
//!
//! Every canonical field has exactly one standardized counterpart that is
//! always present in harmonized output:
//!
//! | canonical    | standardized   |
//! |--------------|----------------|
//! | `caseID`     | `bdsaCaseID`   |
//! | `regionName` | `bdsaRegionID` |
//! | `stainID`    | `bdsaStainID`  |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Alias spellings historically used for the filename column.
pub const FILE_NAME_ALIASES: &[&str] = &["fileName", "FileName", "filename", "file_name", "file name"];

/// One of the fixed schema-governed identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CanonicalField {
    #[serde(rename = "caseID")]
    CaseId,
    #[serde(rename = "regionName")]
    RegionName,
    #[serde(rename = "stainID")]
    StainId,
}

impl CanonicalField {
    /// Standardized column order for harmonized output and export.
    pub const STANDARDIZED_ORDER: [CanonicalField; 3] = [
        CanonicalField::CaseId,
        CanonicalField::RegionName,
        CanonicalField::StainId,
    ];

    /// Fields whose values are checked against a schema enumeration.
    pub const GOVERNED: [CanonicalField; 2] = [CanonicalField::StainId, CanonicalField::RegionName];

    /// Schema property name (e.g. `stainID`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CaseId => "caseID",
            Self::RegionName => "regionName",
            Self::StainId => "stainID",
        }
    }

    /// Name of the harmonized-output column (e.g. `bdsaStainID`).
    pub fn standardized(self) -> &'static str {
        match self {
            Self::CaseId => "bdsaCaseID",
            Self::RegionName => "bdsaRegionID",
            Self::StainId => "bdsaStainID",
        }
    }

    /// Historical column spellings, highest priority first.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::CaseId => &["caseID", "case_id", "case", "Case"],
            Self::RegionName => &["regionName", "region_name", "region", "Region"],
            Self::StainId => &["stainID", "stain_id", "stain", "Stain"],
        }
    }

    /// True when values of this field are checked against a schema enum.
    pub fn is_governed(self) -> bool {
        matches!(self, Self::StainId | Self::RegionName)
    }

    pub fn is_standardized_name(name: &str) -> bool {
        Self::STANDARDIZED_ORDER
            .iter()
            .any(|field| field.standardized() == name)
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CanonicalField {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "caseID" => Ok(Self::CaseId),
            "regionName" => Ok(Self::RegionName),
            "stainID" => Ok(Self::StainId),
            other => Err(ModelError::UnknownField(other.to_string())),
        }
    }
}
