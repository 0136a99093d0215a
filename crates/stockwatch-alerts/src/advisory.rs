//! One-shot advisory signal emitted after a sampling cycle admits new alerts.

use std::time::Duration;

use serde::Serialize;

use crate::notification::{NotificationEvent, NotificationId, NotificationKind, Severity};

/// A transient notice for the presentation layer (a toast, a banner).
///
/// Advisories are not stored; a subscriber that is not listening when one
/// is sent misses it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advisory {
    /// The log entry the advisory refers to.
    pub notification_id: NotificationId,
    /// Kind of that entry.
    pub kind: NotificationKind,
    /// Severity used for styling.
    pub severity: Severity,
    /// Headline.
    pub title: String,
    /// Message body.
    pub message: String,
    /// How long the notice should stay visible.
    #[serde(with = "millis")]
    pub display_for: Duration,
}

impl Advisory {
    /// Pick the most severe of the newly admitted events.
    ///
    /// On a tie the earliest event in `admitted` wins.
    pub fn most_severe(admitted: &[NotificationEvent], display_for: Duration) -> Option<Self> {
        let top = admitted.iter().reduce(|best, event| {
            if event.kind.severity() > best.kind.severity() {
                event
            } else {
                best
            }
        })?;

        Some(Self {
            notification_id: top.id.clone(),
            kind: top.kind,
            severity: top.kind.severity(),
            title: top.title.clone(),
            message: top.message.clone(),
            display_for,
        })
    }
}

mod millis {
    use std::time::Duration;

    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }
}
