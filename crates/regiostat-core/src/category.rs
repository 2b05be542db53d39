//! Deputy categories and the per-category head-count triple.

use std::fmt;
use std::ops::{AddAssign, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The three fixed deputy categories tracked per region per period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeputyCategory {
    /// Deputies of the regional legislative assembly.
    Zs,
    /// Deputies of administrative-territorial councils.
    Acs,
    /// Deputies of municipal self-government bodies.
    Omsu,
}

impl DeputyCategory {
    pub const ALL: [DeputyCategory; 3] = [Self::Zs, Self::Acs, Self::Omsu];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Zs => "zs",
            Self::Acs => "acs",
            Self::Omsu => "omsu",
        }
    }

    /// Short upstream abbreviation, as it appears in feed field names.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Self::Zs => "ЗС",
            Self::Acs => "АЦС",
            Self::Omsu => "ОМСУ",
        }
    }
}

impl fmt::Display for DeputyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown deputy category: {0:?} (expected zs, acs or omsu)")]
pub struct UnknownCategory(pub String);

impl FromStr for DeputyCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zs" => Ok(Self::Zs),
            "acs" => Ok(Self::Acs),
            "omsu" => Ok(Self::Omsu),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// One of the three head-count metrics kept per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Total,
    Interacting,
    Reception,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Self::Total, Self::Interacting, Self::Reception];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Total => "total",
            Self::Interacting => "interacting",
            Self::Reception => "reception",
        }
    }
}

/// Head counts for one category: all deputies, those interacting with the
/// regional branch, and those holding citizen receptions.
///
/// Domain meaning implies `reception <= interacting <= total`; nothing here
/// enforces it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryStats {
    pub total: i64,
    pub interacting: i64,
    pub reception: i64,
}

impl CategoryStats {
    pub fn new(total: i64, interacting: i64, reception: i64) -> Self {
        Self {
            total,
            interacting,
            reception,
        }
    }

    pub fn get(&self, metric: Metric) -> i64 {
        match metric {
            Metric::Total => self.total,
            Metric::Interacting => self.interacting,
            Metric::Reception => self.reception,
        }
    }
}

impl AddAssign for CategoryStats {
    fn add_assign(&mut self, rhs: Self) {
        self.total += rhs.total;
        self.interacting += rhs.interacting;
        self.reception += rhs.reception;
    }
}

impl Sub for CategoryStats {
    type Output = CategoryStats;

    fn sub(self, rhs: Self) -> Self::Output {
        CategoryStats {
            total: self.total - rhs.total,
            interacting: self.interacting - rhs.interacting,
            reception: self.reception - rhs.reception,
        }
    }
}
