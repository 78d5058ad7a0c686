//! Alert system domain types
//!
//! Defines alert kinds, raised alert instances and the per-condition results
//! produced by the evaluator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch
pub type Timestamp = u64;

/// Current wall-clock time as a [`Timestamp`]
pub fn now_millis() -> Timestamp {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as Timestamp
}

/// Alert kind, which also selects the presentation style
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    /// Informational
    Info,
    /// Attention recommended
    Warning,
    /// Hard fault
    Error,
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

impl std::str::FromStr for AlertKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "warning" | "warn" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            _ => Err(format!("Unknown alert kind: {}", s)),
        }
    }
}

/// Outcome of one threshold rule for one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionResult {
    /// Stable condition identifier, e.g. `temp-low`
    pub condition_key: String,
    pub kind: AlertKind,
    pub message: String,
    pub is_active: bool,
}

impl ConditionResult {
    /// Create a condition result
    pub fn new(
        condition_key: impl Into<String>,
        kind: AlertKind,
        message: impl Into<String>,
        is_active: bool,
    ) -> Self {
        Self {
            condition_key: condition_key.into(),
            kind,
            message: message.into(),
            is_active,
        }
    }
}

/// A raised alert
///
/// `id` is `"{condition_key}-{created_at}"`, so the condition key is always
/// a prefix of the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub condition_key: String,
    pub kind: AlertKind,
    pub message: String,
    pub created_at: Timestamp,
}

impl Alert {
    /// Raise an alert for a condition at `now`
    pub fn raise(
        condition_key: &str,
        kind: AlertKind,
        message: impl Into<String>,
        now: Timestamp,
    ) -> Self {
        Self {
            id: format!("{}-{}", condition_key, now),
            condition_key: condition_key.to_string(),
            kind,
            message: message.into(),
            created_at: now,
        }
    }

    /// Whether this alert was raised for `condition_key`
    ///
    /// True when the id starts with `condition_key` followed by `-`. Any id
    /// continuing with `-` matches, so `tds` matches `tds-low-..` too, while
    /// `tds-low` never matches an alert raised for `tds-low2`.
    pub fn belongs_to(&self, condition_key: &str) -> bool {
        self.id
            .strip_prefix(condition_key)
            .map(|rest| rest.starts_with('-'))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_id_embeds_key() {
        let alert = Alert::raise("temp-low", AlertKind::Error, "cold", 1_700_000_000_000);
        assert_eq!(alert.id, "temp-low-1700000000000");
        assert!(alert.id.starts_with(&alert.condition_key));
        assert_eq!(alert.created_at, 1_700_000_000_000);
    }

    #[test]
    fn test_belongs_to() {
        let alert = Alert::raise("manual-5-1", AlertKind::Info, "note", 5);
        assert!(alert.belongs_to("manual-5-1"));
        // A shorter key still matches when the id continues with `-`
        assert!(alert.belongs_to("manual-5"));
        assert!(!alert.belongs_to("manual-5-1-5"));

        let other = Alert::raise("manual-5-10", AlertKind::Info, "note", 5);
        assert!(!other.belongs_to("manual-5-1"));

        let tds = Alert::raise("tds-low2", AlertKind::Info, "note", 7);
        assert!(!tds.belongs_to("tds-low"));
        assert!(!tds.belongs_to("tds-lo"));
    }

    #[test]
    fn test_kind_ordering() {
        assert!(AlertKind::Info < AlertKind::Warning);
        assert!(AlertKind::Warning < AlertKind::Error);
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("error".parse::<AlertKind>().unwrap(), AlertKind::Error);
        assert_eq!("Warning".parse::<AlertKind>().unwrap(), AlertKind::Warning);
        assert!("fatal".parse::<AlertKind>().is_err());
    }

    #[test]
    fn test_alert_serializes_camel_case() {
        let alert = Alert::raise("ph-high", AlertKind::Warning, "pH alto", 10);
        let value = serde_json::to_value(&alert).unwrap();
        assert_eq!(value["conditionKey"], "ph-high");
        assert_eq!(value["createdAt"], 10);
        assert_eq!(value["kind"], "warning");
    }
}
