//! Notification event model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockwatch_core::types::ProductId;

use super::dedup::DedupKey;
use super::kind::NotificationKind;

/// Unique identifier of a notification.
///
/// Rendered as `"{kind}:{product_id}:{seq}"` (`-` when there is no product),
/// where `seq` comes from a per-engine monotonic counter, so an id is never
/// reused within an engine's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(String);

impl NotificationId {
    /// Compose an id from its dedup key and a sequence number.
    pub fn compose(key: DedupKey, seq: u64) -> Self {
        Self(format!("{key}:{seq}"))
    }

    /// Return the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for NotificationId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for NotificationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A notification held in the engine's log.
///
/// Every field except `is_read` is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEvent {
    /// Unique notification identifier.
    pub id: NotificationId,
    /// Notification kind.
    pub kind: NotificationKind,
    /// Short headline.
    pub title: String,
    /// Full message body.
    pub message: String,
    /// Product that triggered the notification.
    pub product_id: Option<ProductId>,
    /// Product name at alert time.
    pub product_name: Option<String>,
    /// Units on hand at alert time.
    pub current_stock: Option<i64>,
    /// Reorder threshold at alert time.
    pub minimum_stock: Option<i64>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
    /// Whether the notification has been read.
    pub is_read: bool,
}

impl NotificationEvent {
    /// Key used to suppress repeat alerts for the same condition.
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey::new(self.kind, self.product_id)
    }

    /// Check if the notification has not been read yet.
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }

    /// One-line product summary, e.g. `Product: Hammer | Stock: 0 / Min: 5`.
    pub fn detail_line(&self) -> Option<String> {
        let name = self.product_name.as_deref()?;
        let mut line = format!("Product: {name}");
        if let Some(stock) = self.current_stock {
            line.push_str(&format!(" | Stock: {stock}"));
            if let Some(minimum) = self.minimum_stock {
                line.push_str(&format!(" / Min: {minimum}"));
            }
        }
        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(kind: NotificationKind) -> NotificationEvent {
        NotificationEvent {
            id: NotificationId::compose(DedupKey::new(kind, Some(ProductId(1))), 1),
            kind,
            title: "Out of Stock".to_string(),
            message: "Hammer has no units available".to_string(),
            product_id: Some(ProductId(1)),
            product_name: Some("Hammer".to_string()),
            current_stock: Some(0),
            minimum_stock: Some(5),
            created_at: Utc::now(),
            is_read: false,
        }
    }

    #[test]
    fn test_id_encodes_dedup_key() {
        let key = DedupKey::new(NotificationKind::LowStock, Some(ProductId(12)));
        assert_eq!(NotificationId::compose(key, 3).as_str(), "low_stock:12:3");

        let system = DedupKey::new(NotificationKind::System, None);
        assert_eq!(NotificationId::compose(system, 4).to_string(), "system:-:4");
    }

    #[test]
    fn test_detail_line() {
        let e = event(NotificationKind::OutOfStock);
        assert_eq!(
            e.detail_line().as_deref(),
            Some("Product: Hammer | Stock: 0 / Min: 5")
        );
    }

    #[test]
    fn test_detail_line_without_product() {
        let mut e = event(NotificationKind::System);
        e.product_name = None;
        assert_eq!(e.detail_line(), None);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(event(NotificationKind::OutOfStock)).unwrap();
        assert_eq!(json["id"], "out_of_stock:1:1");
        assert_eq!(json["kind"], "out_of_stock");
        assert_eq!(json["product_id"], 1);
        assert_eq!(json["is_read"], false);
    }
}
