//! Notification text formatting.

use chrono::{DateTime, Utc};

use stockwatch_core::types::{InventoryItem, StockLevels};

use super::classify::Candidate;
use super::kind::NotificationKind;

/// Builds the human-readable text of stock alerts.
pub struct NotificationFormatter;

impl NotificationFormatter {
    /// Formats an out-of-stock alert.
    pub fn out_of_stock(item: &InventoryItem, levels: StockLevels) -> Candidate {
        Candidate {
            kind: NotificationKind::OutOfStock,
            title: "Out of Stock".to_string(),
            message: format!("{} has no units available", item.name),
            item: item.clone(),
            levels,
        }
    }

    /// Formats a low-stock alert.
    pub fn low_stock(item: &InventoryItem, levels: StockLevels) -> Candidate {
        Candidate {
            kind: NotificationKind::LowStock,
            title: "Low Stock".to_string(),
            message: format!(
                "{} has only {} units left (minimum: {})",
                item.name, levels.current, levels.minimum
            ),
            item: item.clone(),
            levels,
        }
    }
}

/// Relative age of a notification as shown next to it in a list.
pub fn format_age(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(created_at);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();

    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{minutes} min ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else {
        format!("{}d ago", elapsed.num_days())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(seconds: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + seconds, 0).unwrap()
    }

    #[test]
    fn test_format_age_buckets() {
        let created = at(0);
        assert_eq!(format_age(created, at(30)), "just now");
        assert_eq!(format_age(created, at(60)), "1 min ago");
        assert_eq!(format_age(created, at(59 * 60)), "59 min ago");
        assert_eq!(format_age(created, at(60 * 60)), "1h ago");
        assert_eq!(format_age(created, created + Duration::hours(23)), "23h ago");
        assert_eq!(format_age(created, created + Duration::days(3)), "3d ago");
    }

    #[test]
    fn test_future_timestamp_is_just_now() {
        assert_eq!(format_age(at(120), at(0)), "just now");
    }

    #[test]
    fn test_low_stock_message() {
        let item = InventoryItem::new(4, "Drill", 2, 5);
        let candidate = NotificationFormatter::low_stock(&item, item.stock_levels().unwrap());
        assert_eq!(candidate.message, "Drill has only 2 units left (minimum: 5)");
        assert_eq!(candidate.title, "Low Stock");
    }
}
