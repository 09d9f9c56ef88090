//! Weekly rest types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The kind of weekly rest a driver took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestKind {
    /// Regular weekly rest of at least 45 hours.
    Normal,
    /// Reduced weekly rest of at least 24 hours.
    Reduced,
}

/// Which weekly rest must come next.
///
/// Two reduced rests may not follow each other, so after a reduced rest
/// only the 45 hour variant is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RestRequirement {
    /// A reduced 24 h rest is acceptable.
    #[serde(rename = "24h")]
    Reduced24h,
    /// A regular 45 h rest is required.
    #[serde(rename = "45h")]
    Regular45h,
}

impl std::fmt::Display for RestRequirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RestRequirement::Reduced24h => f.write_str("24h"),
            RestRequirement::Regular45h => f.write_str("45h"),
        }
    }
}

/// A weekly rest found in a driver's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyRest {
    /// The date of the rest day.
    pub date: NaiveDate,
    /// Whether the rest was regular or reduced.
    pub kind: RestKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_requirement_wire_format() {
        assert_eq!(
            serde_json::to_string(&RestRequirement::Regular45h).unwrap(),
            "\"45h\""
        );
        assert_eq!(
            serde_json::to_string(&RestRequirement::Reduced24h).unwrap(),
            "\"24h\""
        );
        assert_eq!(RestRequirement::Regular45h.to_string(), "45h");
    }
}
