use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Lifecycle of a recommendation as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecommendationStatus {
    Active,
    Broken,
    Archived,
    /// Anything the backend sent that is not a known status. Empty when absent.
    Unknown(String),
}

impl RecommendationStatus {
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::Unknown(String::new());
        };

        match raw.trim() {
            "ACTIVE" => Self::Active,
            "BROKEN" => Self::Broken,
            "ARCHIVED" => Self::Archived,
            _ => Self::Unknown(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "ACTIVE",
            Self::Broken => "BROKEN",
            Self::Archived => "ARCHIVED",
            Self::Unknown(raw) => raw,
        }
    }

    pub fn is_archived(&self) -> bool {
        matches!(self, Self::Archived)
    }
}

impl Default for RecommendationStatus {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl fmt::Display for RecommendationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RecommendationStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RecommendationStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Non-string values (numbers, objects) degrade to Unknown instead of failing the record.
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(match raw {
            serde_json::Value::String(s) => Self::parse(Some(&s)),
            serde_json::Value::Null => Self::parse(None),
            other => Self::Unknown(other.to_string()),
        })
    }
}
