//! Property checks for day-bucketed list materialization.

use std::collections::BTreeSet;

use proptest::prelude::*;

use reminder_core::{build_list, DayBucket, EpochMillis, ListItem, ListOrder, RecordId, Timestamped};

const MS_PER_DAY: u64 = 86_400_000;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    id: i64,
    at: u64,
}

impl Timestamped for Entry {
    fn record_id(&self) -> RecordId {
        RecordId(self.id)
    }

    fn timestamp(&self) -> EpochMillis {
        EpochMillis(self.at)
    }
}

/// Timestamps clustered into a handful of days so buckets hold several entries.
fn arb_entries() -> impl Strategy<Value = Vec<Entry>> {
    prop::collection::vec((0u64..12, 0u64..MS_PER_DAY), 0..40).prop_map(|stamps| {
        stamps
            .into_iter()
            .enumerate()
            .map(|(index, (day, offset))| Entry {
                id: index as i64 + 1,
                at: day * MS_PER_DAY + offset,
            })
            .collect()
    })
}

fn arb_order() -> impl Strategy<Value = ListOrder> {
    prop_oneof![Just(ListOrder::Ascending), Just(ListOrder::Descending)]
}

/// Splits rows into `(day_number, records)` groups, asserting a header leads.
fn groups(items: &[ListItem<Entry>]) -> Vec<(usize, Vec<Entry>)> {
    let mut out: Vec<(usize, Vec<Entry>)> = Vec::new();
    for item in items {
        match item {
            ListItem::Header { day_number } => out.push((*day_number, Vec::new())),
            ListItem::Record { record } => out
                .last_mut()
                .expect("record rows must follow a header")
                .1
                .push(record.clone()),
        }
    }
    out
}

proptest! {
    #[test]
    fn header_count_matches_distinct_days(entries in arb_entries(), order in arb_order()) {
        let days: BTreeSet<DayBucket> =
            entries.iter().map(|entry| DayBucket::of(entry.timestamp())).collect();
        let items = build_list(&entries, order);
        let headers = items.iter().filter(|item| item.is_header()).count();
        prop_assert_eq!(headers, days.len());
    }

    #[test]
    fn every_record_appears_exactly_once(entries in arb_entries(), order in arb_order()) {
        let items = build_list(&entries, order);
        let mut emitted: Vec<i64> = items
            .iter()
            .filter_map(|item| item.as_record().map(|entry| entry.id))
            .collect();
        emitted.sort_unstable();
        let mut expected: Vec<i64> = entries.iter().map(|entry| entry.id).collect();
        expected.sort_unstable();
        prop_assert_eq!(emitted, expected);
    }

    #[test]
    fn groups_are_nonempty_single_day_and_newest_first(
        entries in arb_entries(),
        order in arb_order(),
    ) {
        for (_, members) in groups(&build_list(&entries, order)) {
            prop_assert!(!members.is_empty());
            let (start, end) = DayBucket::of(members[0].timestamp()).range();
            for member in &members {
                prop_assert!(start <= member.timestamp() && member.timestamp() <= end);
            }
            for pair in members.windows(2) {
                prop_assert!(pair[0].at >= pair[1].at);
            }
        }
    }

    #[test]
    fn day_numbers_are_contiguous_from_zero(entries in arb_entries()) {
        let ascending: Vec<usize> = build_list(&entries, ListOrder::Ascending)
            .iter()
            .filter_map(ListItem::day_number)
            .collect();
        let descending: Vec<usize> = build_list(&entries, ListOrder::Descending)
            .iter()
            .filter_map(ListItem::day_number)
            .collect();

        let count = descending.len();
        prop_assert_eq!(&descending, &(0..count).collect::<Vec<_>>());
        prop_assert_eq!(&ascending, &(0..count).rev().collect::<Vec<_>>());
    }

    #[test]
    fn orders_mirror_each_other_at_bucket_level(
        entries in arb_entries(),
        order in arb_order(),
    ) {
        let mut forward = groups(&build_list(&entries, order));
        let backward = groups(&build_list(&entries, order.reversed()));
        forward.reverse();
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn building_is_idempotent(entries in arb_entries(), order in arb_order()) {
        prop_assert_eq!(build_list(&entries, order), build_list(&entries, order));
    }

    #[test]
    fn input_order_does_not_change_distinct_timestamp_output(
        entries in arb_entries(),
        order in arb_order(),
    ) {
        let mut unique = entries.clone();
        unique.sort_by_key(|entry| entry.at);
        unique.dedup_by_key(|entry| entry.at);
        let mut shuffled = unique.clone();
        shuffled.reverse();
        prop_assert_eq!(build_list(&unique, order), build_list(&shuffled, order));
    }
}

#[test]
fn documented_two_day_scenario() {
    let entries = vec![
        Entry { id: 1, at: 10 },
        Entry { id: 2, at: MS_PER_DAY + 10 },
        Entry { id: 3, at: 5 },
    ];

    assert_eq!(
        build_list(&entries, ListOrder::Ascending),
        vec![
            ListItem::header(1),
            ListItem::record(entries[0].clone()),
            ListItem::record(entries[2].clone()),
            ListItem::header(0),
            ListItem::record(entries[1].clone()),
        ]
    );
    assert_eq!(
        build_list(&entries, ListOrder::Descending),
        vec![
            ListItem::header(0),
            ListItem::record(entries[1].clone()),
            ListItem::header(1),
            ListItem::record(entries[0].clone()),
            ListItem::record(entries[2].clone()),
        ]
    );
}
