//! Day-bucketed list materialization.
//!
//! # Responsibility
//! - Turn a snapshot of timestamped records into header-annotated rows.
//!
//! # Invariants
//! - Every non-empty day bucket yields exactly one header, placed directly
//!   before that bucket's records.
//! - Header day numbers are contiguous from 0 in traversal order (ascending
//!   order counts down to 0, descending order counts up from 0).
//! - Within a bucket, records are stable-sorted by ascending timestamp and then
//!   reversed, for both orders.
//! - The build is pure: the same snapshot and order give the same rows.

use crate::listing::bucket::DayBucket;
use crate::listing::item::ListItem;
use crate::model::record::Timestamped;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outer traversal direction over day buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListOrder {
    /// Oldest day first; the newest day is last with day number 0.
    #[default]
    #[serde(alias = "asc")]
    Ascending,
    /// Newest day first with day number 0.
    #[serde(alias = "desc")]
    Descending,
}

impl ListOrder {
    pub fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Builds the presentation rows for one snapshot.
pub fn build_list<T>(records: &[T], order: ListOrder) -> Vec<ListItem<T>>
where
    T: Timestamped + Clone,
{
    let mut buckets: BTreeMap<DayBucket, Vec<&T>> = BTreeMap::new();
    for record in records {
        buckets
            .entry(DayBucket::of(record.timestamp()))
            .or_default()
            .push(record);
    }

    let bucket_count = buckets.len();
    let mut items = Vec::with_capacity(records.len() + bucket_count);
    let mut emit = |day_number: usize, mut members: Vec<&T>| {
        members.sort_by_key(|record| record.timestamp());
        members.reverse();
        items.push(ListItem::header(day_number));
        items.extend(members.into_iter().cloned().map(ListItem::record));
    };

    match order {
        ListOrder::Ascending => {
            for (position, members) in buckets.into_values().enumerate() {
                emit(bucket_count - position - 1, members);
            }
        }
        ListOrder::Descending => {
            for (position, members) in buckets.into_values().rev().enumerate() {
                emit(position, members);
            }
        }
    }

    items
}

#[cfg(test)]
mod tests {
    use super::{build_list, ListOrder};
    use crate::listing::item::ListItem;
    use crate::model::record::{EpochMillis, RecordId, Timestamped};

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Stamp {
        id: i64,
        at: u64,
    }

    impl Timestamped for Stamp {
        fn record_id(&self) -> RecordId {
            RecordId(self.id)
        }

        fn timestamp(&self) -> EpochMillis {
            EpochMillis(self.at)
        }
    }

    fn stamp(id: i64, at: u64) -> Stamp {
        Stamp { id, at }
    }

    fn shape(items: &[ListItem<Stamp>]) -> Vec<String> {
        items
            .iter()
            .map(|item| match item {
                ListItem::Header { day_number } => format!("H{day_number}"),
                ListItem::Record { record } => format!("R{}", record.at),
            })
            .collect()
    }

    #[test]
    fn empty_snapshot_has_no_rows() {
        let records: Vec<Stamp> = Vec::new();
        assert!(build_list(&records, ListOrder::Ascending).is_empty());
        assert!(build_list(&records, ListOrder::Descending).is_empty());
    }

    #[test]
    fn two_days_ascending() {
        let records = vec![stamp(1, 10), stamp(2, 86_400_010), stamp(3, 5)];
        assert_eq!(
            shape(&build_list(&records, ListOrder::Ascending)),
            ["H1", "R10", "R5", "H0", "R86400010"]
        );
    }

    #[test]
    fn two_days_descending() {
        let records = vec![stamp(1, 10), stamp(2, 86_400_010), stamp(3, 5)];
        assert_eq!(
            shape(&build_list(&records, ListOrder::Descending)),
            ["H0", "R86400010", "H1", "R10", "R5"]
        );
    }

    #[test]
    fn single_record_gets_day_zero() {
        let records = vec![stamp(9, 1_700_000_000_000)];
        for order in [ListOrder::Ascending, ListOrder::Descending] {
            assert_eq!(
                build_list(&records, order),
                vec![ListItem::header(0), ListItem::record(stamp(9, 1_700_000_000_000))]
            );
        }
    }

    #[test]
    fn equal_timestamps_come_out_in_reverse_input_order() {
        let records = vec![stamp(1, 50), stamp(2, 50), stamp(3, 40)];
        let ids: Vec<i64> = build_list(&records, ListOrder::Descending)
            .iter()
            .filter_map(|item| item.as_record().map(|record| record.id))
            .collect();
        assert_eq!(ids, [2, 1, 3]);
    }

    #[test]
    fn gaps_between_days_do_not_skip_day_numbers() {
        let day = 86_400_000;
        let records = vec![stamp(1, 0), stamp(2, 30 * day), stamp(3, 400 * day)];
        let headers: Vec<usize> = build_list(&records, ListOrder::Descending)
            .iter()
            .filter_map(ListItem::day_number)
            .collect();
        assert_eq!(headers, [0, 1, 2]);
    }

    #[test]
    fn reversed_order_flips_direction() {
        assert_eq!(ListOrder::Ascending.reversed(), ListOrder::Descending);
        assert_eq!(ListOrder::Descending.reversed(), ListOrder::Ascending);
    }
}
