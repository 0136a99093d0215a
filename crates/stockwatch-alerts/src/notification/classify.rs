//! Threshold classification of inventory records.

use chrono::{DateTime, Utc};

use stockwatch_core::types::{InventoryItem, StockLevels};

use super::dedup::DedupKey;
use super::formatter::NotificationFormatter;
use super::kind::NotificationKind;
use super::model::{NotificationEvent, NotificationId};

/// An alert derived from classification, not yet admitted to the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Alert kind.
    pub kind: NotificationKind,
    /// Headline.
    pub title: String,
    /// Message body.
    pub message: String,
    /// The record that triggered the alert.
    pub item: InventoryItem,
    /// Validated stock levels of `item`.
    pub levels: StockLevels,
}

/// Outcome of classifying one inventory record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The record crosses a threshold.
    Alert(Candidate),
    /// Stock is above the threshold.
    Healthy,
    /// The record lacks usable stock fields.
    Malformed,
}

/// Classify a single inventory record.
///
/// - no units on hand: out of stock
/// - `0 < current <= minimum`: low stock
/// - otherwise: healthy
pub fn classify(item: &InventoryItem) -> Classification {
    let Some(levels) = item.stock_levels() else {
        return Classification::Malformed;
    };

    if levels.current == 0 {
        Classification::Alert(NotificationFormatter::out_of_stock(item, levels))
    } else if levels.current <= levels.minimum {
        Classification::Alert(NotificationFormatter::low_stock(item, levels))
    } else {
        Classification::Healthy
    }
}

impl Candidate {
    /// Key used to check the candidate against the log.
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey::new(self.kind, Some(self.item.id))
    }

    /// Turn the candidate into an unread log entry.
    pub fn into_event(self, seq: u64, created_at: DateTime<Utc>) -> NotificationEvent {
        NotificationEvent {
            id: NotificationId::compose(self.dedup_key(), seq),
            kind: self.kind,
            title: self.title,
            message: self.message,
            product_id: Some(self.item.id),
            product_name: Some(self.item.name),
            current_stock: Some(self.levels.current),
            minimum_stock: Some(self.levels.minimum),
            created_at,
            is_read: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(item: InventoryItem) -> Option<NotificationKind> {
        match classify(&item) {
            Classification::Alert(candidate) => Some(candidate.kind),
            _ => None,
        }
    }

    #[test]
    fn test_zero_stock_is_out_of_stock() {
        assert_eq!(
            kind_of(InventoryItem::new(1, "Hammer", 0, 5)),
            Some(NotificationKind::OutOfStock)
        );
    }

    #[test]
    fn test_zero_stock_with_zero_minimum_is_out_of_stock() {
        assert_eq!(
            kind_of(InventoryItem::new(1, "Hammer", 0, 0)),
            Some(NotificationKind::OutOfStock)
        );
    }

    #[test]
    fn test_threshold_boundary() {
        assert_eq!(
            kind_of(InventoryItem::new(2, "Wrench", 5, 5)),
            Some(NotificationKind::LowStock)
        );
        assert_eq!(kind_of(InventoryItem::new(2, "Wrench", 6, 5)), None);
        assert_eq!(
            kind_of(InventoryItem::new(2, "Wrench", 1, 5)),
            Some(NotificationKind::LowStock)
        );
    }

    #[test]
    fn test_malformed_record() {
        let item = InventoryItem {
            current_stock: None,
            ..InventoryItem::new(3, "Tape", 0, 1)
        };
        assert_eq!(classify(&item), Classification::Malformed);
    }

    #[test]
    fn test_into_event_snapshots_record() {
        let item = InventoryItem::new(9, "Hammer", 0, 5);
        let Classification::Alert(candidate) = classify(&item) else {
            panic!("expected an alert");
        };
        let now = Utc::now();
        let event = candidate.into_event(17, now);

        assert_eq!(event.id.as_str(), "out_of_stock:9:17");
        assert_eq!(event.product_name.as_deref(), Some("Hammer"));
        assert_eq!(event.current_stock, Some(0));
        assert_eq!(event.minimum_stock, Some(5));
        assert_eq!(event.created_at, now);
        assert!(event.message.contains("Hammer"));
        assert!(!event.is_read);
    }
}
