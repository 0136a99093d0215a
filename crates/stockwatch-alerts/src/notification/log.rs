//! Bounded, newest-first notification log.

use std::collections::{HashSet, VecDeque};

use chrono::{DateTime, Utc};

use super::classify::Candidate;
use super::dedup::DedupKey;
use super::model::{NotificationEvent, NotificationId};

/// Ordered notification storage with a fixed capacity.
///
/// Entries are kept newest first. Admitting past capacity evicts from the
/// back, which always holds the oldest entries.
#[derive(Debug, Clone)]
pub struct NotificationLog {
    entries: VecDeque<NotificationEvent>,
    capacity: usize,
}

/// Result of merging a batch of candidates into the log.
#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    /// Events that were admitted, in log order. Every one of them is in the
    /// log when `merge` returns.
    pub admitted: Vec<NotificationEvent>,
    /// Candidates discarded because their key was already present.
    pub duplicates: usize,
    /// Old entries evicted, plus new candidates dropped because the batch
    /// alone exceeded capacity.
    pub evicted: usize,
}

impl NotificationLog {
    /// Create an empty log. A zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate newest first.
    pub fn iter(&self) -> impl Iterator<Item = &NotificationEvent> {
        self.entries.iter()
    }

    /// Count of unread entries, computed on every call.
    pub fn unread_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_unread()).count()
    }

    /// Dedup `candidates` against the current entries, stamp the survivors,
    /// prepend them and truncate to capacity.
    ///
    /// When the survivors alone exceed capacity, the most severe ones are
    /// kept (ties go to the earlier candidate) and the rest never enter the
    /// log. `next_seq` is called once per admitted candidate.
    pub fn merge(
        &mut self,
        candidates: Vec<Candidate>,
        created_at: DateTime<Utc>,
        mut next_seq: impl FnMut() -> u64,
    ) -> MergeOutcome {
        let mut seen: HashSet<DedupKey> = self.entries.iter().map(|e| e.dedup_key()).collect();
        let mut outcome = MergeOutcome::default();

        let mut survivors = Vec::new();
        for candidate in candidates {
            if !seen.insert(candidate.dedup_key()) {
                outcome.duplicates += 1;
                continue;
            }
            survivors.push(candidate);
        }

        if survivors.len() > self.capacity {
            outcome.evicted += survivors.len() - self.capacity;
            survivors = keep_most_severe(survivors, self.capacity);
        }

        outcome.admitted = survivors
            .into_iter()
            .map(|candidate| candidate.into_event(next_seq(), created_at))
            .collect();

        for event in outcome.admitted.iter().rev() {
            self.entries.push_front(event.clone());
        }

        if self.entries.len() > self.capacity {
            outcome.evicted += self.entries.len() - self.capacity;
            self.entries.truncate(self.capacity);
        }

        outcome
    }

    /// Mark one entry as read. Returns `false` if the id is unknown.
    pub fn mark_read(&mut self, id: &NotificationId) -> bool {
        match self.entries.iter_mut().find(|e| &e.id == id) {
            Some(event) => {
                event.is_read = true;
                true
            }
            None => false,
        }
    }

    /// Mark every entry as read. Returns how many changed.
    pub fn mark_all_read(&mut self) -> usize {
        let mut changed = 0;
        for event in self.entries.iter_mut().filter(|e| !e.is_read) {
            event.is_read = true;
            changed += 1;
        }
        changed
    }

    /// Remove one entry. Returns `false` if the id is unknown.
    pub fn remove(&mut self, id: &NotificationId) -> bool {
        match self.entries.iter().position(|e| &e.id == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove every entry. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }

    /// Clone the entries, newest first.
    pub fn to_vec(&self) -> Vec<NotificationEvent> {
        self.entries.iter().cloned().collect()
    }
}

/// Keep the `limit` most severe candidates, preserving their batch order.
fn keep_most_severe(candidates: Vec<Candidate>, limit: usize) -> Vec<Candidate> {
    let mut ranked: Vec<usize> = (0..candidates.len()).collect();
    // Stable sort, so equal severities keep batch order.
    ranked.sort_by_key(|&i| std::cmp::Reverse(candidates[i].kind.severity()));
    let kept: HashSet<usize> = ranked.into_iter().take(limit).collect();

    candidates
        .into_iter()
        .enumerate()
        .filter_map(|(i, candidate)| kept.contains(&i).then_some(candidate))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::classify::{Classification, classify};
    use crate::notification::kind::NotificationKind;
    use chrono::Duration;
    use stockwatch_core::types::InventoryItem;

    fn candidate(id: i64, stock: i64) -> Candidate {
        match classify(&InventoryItem::new(id, format!("Product {id}"), stock, 5)) {
            Classification::Alert(c) => c,
            other => panic!("expected alert, got {other:?}"),
        }
    }

    fn counter() -> impl FnMut() -> u64 {
        let mut seq = 0;
        move || {
            seq += 1;
            seq
        }
    }

    #[test]
    fn test_merge_prepends_in_batch_order() {
        let mut log = NotificationLog::new(10);
        let mut seq = counter();
        let now = Utc::now();

        log.merge(vec![candidate(1, 0)], now, &mut seq);
        log.merge(vec![candidate(2, 0), candidate(3, 1)], now, &mut seq);

        let products: Vec<_> = log.iter().map(|e| e.product_id.unwrap().get()).collect();
        assert_eq!(products, vec![2, 3, 1]);
    }

    #[test]
    fn test_merge_skips_existing_keys_even_when_read() {
        let mut log = NotificationLog::new(10);
        let mut seq = counter();
        let now = Utc::now();

        let first = log.merge(vec![candidate(1, 0)], now, &mut seq);
        assert!(log.mark_read(&first.admitted[0].id));

        let second = log.merge(vec![candidate(1, 0)], now, &mut seq);
        assert!(second.admitted.is_empty());
        assert_eq!(second.duplicates, 1);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_merge_dedups_within_batch() {
        let mut log = NotificationLog::new(10);
        let outcome = log.merge(vec![candidate(1, 0), candidate(1, 0)], Utc::now(), counter());
        assert_eq!(outcome.admitted.len(), 1);
        assert_eq!(outcome.duplicates, 1);
    }

    #[test]
    fn test_same_product_different_kind_is_not_duplicate() {
        let mut log = NotificationLog::new(10);
        let mut seq = counter();
        log.merge(vec![candidate(1, 2)], Utc::now(), &mut seq);
        let outcome = log.merge(vec![candidate(1, 0)], Utc::now(), &mut seq);
        assert_eq!(outcome.admitted.len(), 1);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_eviction_drops_oldest() {
        let mut log = NotificationLog::new(3);
        let mut seq = counter();
        let start = Utc::now();

        for i in 0..5 {
            log.merge(
                vec![candidate(i, 0)],
                start + Duration::seconds(i),
                &mut seq,
            );
        }

        assert_eq!(log.len(), 3);
        let products: Vec<_> = log.iter().map(|e| e.product_id.unwrap().get()).collect();
        assert_eq!(products, vec![4, 3, 2]);
    }

    #[test]
    fn test_eviction_reports_count() {
        let mut log = NotificationLog::new(2);
        let outcome = log.merge(
            vec![candidate(1, 0), candidate(2, 0), candidate(3, 0)],
            Utc::now(),
            counter(),
        );
        assert_eq!(outcome.admitted.len(), 2);
        assert_eq!(outcome.evicted, 1);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_oversized_batch_keeps_most_severe() {
        let mut log = NotificationLog::new(1);
        let outcome = log.merge(
            vec![candidate(1, 2), candidate(2, 0)],
            Utc::now(),
            counter(),
        );

        assert_eq!(outcome.admitted.len(), 1);
        assert_eq!(outcome.evicted, 1);
        assert_eq!(outcome.admitted[0].kind, NotificationKind::OutOfStock);
        assert_eq!(log.len(), 1);
        assert_eq!(log.iter().next().map(|e| &e.id), Some(&outcome.admitted[0].id));
    }

    #[test]
    fn test_oversized_batch_keeps_batch_order() {
        let mut log = NotificationLog::new(3);
        let mut seq = counter();
        let now = Utc::now();
        log.merge(vec![candidate(9, 0)], now, &mut seq);

        let outcome = log.merge(
            vec![candidate(1, 3), candidate(2, 0), candidate(3, 4), candidate(4, 0)],
            now,
            &mut seq,
        );

        // Two out-of-stock plus the first low-stock candidate survive; the
        // old entry is pushed out.
        let products: Vec<_> = log.iter().map(|e| e.product_id.unwrap().get()).collect();
        assert_eq!(products, vec![1, 2, 4]);
        assert_eq!(outcome.evicted, 2);
        let admitted: Vec<_> = outcome.admitted.iter().map(|e| e.id.clone()).collect();
        let in_log: Vec<_> = log.iter().map(|e| e.id.clone()).collect();
        assert_eq!(admitted, in_log);
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let mut log = NotificationLog::new(5);
        let missing = NotificationId::from("low_stock:1:99");
        assert!(!log.mark_read(&missing));
        assert!(!log.remove(&missing));
        assert_eq!(log.clear(), 0);
    }

    #[test]
    fn test_zero_capacity_is_raised() {
        assert_eq!(NotificationLog::new(0).capacity(), 1);
    }
}
