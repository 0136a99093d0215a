//! Deduplication key for stock alerts.

use stockwatch_core::types::ProductId;

use super::kind::NotificationKind;

/// Key identifying "the same condition" across sampling cycles.
///
/// While the log holds an event with a given key, no further event with
/// that key is admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DedupKey {
    /// Notification kind.
    pub kind: NotificationKind,
    /// Product the condition refers to, if any.
    pub product_id: Option<ProductId>,
}

impl DedupKey {
    /// Build a key from its components.
    pub fn new(kind: NotificationKind, product_id: Option<ProductId>) -> Self {
        Self { kind, product_id }
    }
}

impl std::fmt::Display for DedupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.product_id {
            Some(id) => write!(f, "{}:{}", self.kind, id),
            None => write!(f, "{}:-", self.kind),
        }
    }
}
