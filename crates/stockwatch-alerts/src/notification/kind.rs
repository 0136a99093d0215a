//! Notification kinds and severity levels.

use serde::{Deserialize, Serialize};

/// Classification of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A product has no units on hand.
    OutOfStock,
    /// A product is at or below its reorder threshold.
    LowStock,
    /// A sale was recorded.
    Sale,
    /// A purchase was recorded.
    Purchase,
    /// System-level message.
    System,
}

/// Severity levels, ordered from least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational.
    Info,
    /// Something completed successfully.
    Success,
    /// Needs attention soon.
    Warning,
    /// Needs attention now.
    Critical,
}

impl NotificationKind {
    /// Return the kind as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OutOfStock => "out_of_stock",
            Self::LowStock => "low_stock",
            Self::Sale => "sale",
            Self::Purchase => "purchase",
            Self::System => "system",
        }
    }

    /// Severity used to rank advisories.
    pub fn severity(&self) -> Severity {
        match self {
            Self::OutOfStock => Severity::Critical,
            Self::LowStock => Severity::Warning,
            Self::Sale | Self::Purchase => Severity::Success,
            Self::System => Severity::Info,
        }
    }

    /// Display tone hint for the presentation layer.
    pub fn tone(&self) -> &'static str {
        match self {
            Self::OutOfStock => "red",
            Self::LowStock => "yellow",
            Self::Sale => "green",
            Self::Purchase => "blue",
            Self::System => "gray",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Severity {
    /// Return the severity as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_stock_outranks_low_stock() {
        assert!(NotificationKind::OutOfStock.severity() > NotificationKind::LowStock.severity());
        assert!(NotificationKind::LowStock.severity() > NotificationKind::Sale.severity());
        assert!(NotificationKind::Purchase.severity() > NotificationKind::System.severity());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&NotificationKind::OutOfStock).unwrap();
        assert_eq!(json, "\"out_of_stock\"");
        let kind: NotificationKind = serde_json::from_str("\"low_stock\"").unwrap();
        assert_eq!(kind, NotificationKind::LowStock);
    }
}
