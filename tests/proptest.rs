//! Property-based tests for chatstat.
//!
//! These tests generate random inputs to find edge cases.

use proptest::prelude::*;

use chatstat::core::{Granularity, aggregate, bucket_key, full_range};
use chatstat::parser::extract;
use chatstat::MessageRecord;
use chrono::{Duration, NaiveDate, NaiveDateTime};

fn origin() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// A minute-precision timestamp within ~6 years of 2020-01-01.
fn arb_timestamp() -> impl Strategy<Value = NaiveDateTime> {
    (0i64..6 * 365 * 24 * 60).prop_map(|minutes| origin() + Duration::minutes(minutes))
}

fn arb_granularity() -> impl Strategy<Value = Granularity> {
    prop::sample::select(Granularity::all().to_vec())
}

/// Fast: select from predefined senders
fn arb_participant() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "Alice".to_string(),
        "Bob".to_string(),
        "Charlie".to_string(),
        "Иван".to_string(),
        "Mary Jane".to_string(),
        "+1 555 0100".to_string(),
        "🎉".to_string(),
    ])
}

fn arb_record() -> impl Strategy<Value = MessageRecord> {
    (arb_timestamp(), arb_participant()).prop_map(|(ts, who)| MessageRecord::new(ts, who))
}

fn arb_records(max_len: usize) -> impl Strategy<Value = Vec<MessageRecord>> {
    prop::collection::vec(arb_record(), 1..max_len)
}

/// Formats a record the way WhatsApp writes it, optionally without padding.
fn to_line(record: &MessageRecord, padded: bool) -> String {
    let format = if padded {
        "%d/%m/%Y, %H:%M"
    } else {
        "%-d/%-m/%Y, %H:%M"
    };
    format!(
        "{} - {}: some text",
        record.timestamp().format(format),
        record.participant()
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================
    // EXTRACTION PROPERTIES
    // ============================================

    /// Every well-formed line yields exactly its (timestamp, participant)
    #[test]
    fn extract_recovers_embedded_pair(records in arb_records(20), padded in any::<bool>()) {
        let lines: Vec<String> = records.iter().map(|r| to_line(r, padded)).collect();
        let extracted = extract(&lines).unwrap();
        prop_assert_eq!(extracted, records);
    }

    /// Noise lines between messages never change the result
    #[test]
    fn extract_ignores_noise(
        records in arb_records(10),
        noise in prop::collection::vec("[a-zA-Z ]{0,30}", 0..10),
    ) {
        let mut lines: Vec<String> = Vec::new();
        for (i, record) in records.iter().enumerate() {
            lines.push(to_line(record, true));
            if let Some(n) = noise.get(i) {
                lines.push(n.clone());
            }
        }
        let extracted = extract(&lines).unwrap();
        prop_assert_eq!(extracted, records);
    }

    /// Arbitrary text never panics the extractor
    #[test]
    fn extract_never_panics(lines in prop::collection::vec(".{0,60}", 0..20)) {
        let _ = extract(&lines);
    }

    // ============================================
    // BUCKET PROPERTIES
    // ============================================

    /// full_range contains both endpoints' buckets and has no gaps
    #[test]
    fn full_range_is_contiguous(
        a in arb_timestamp(),
        b in arb_timestamp(),
        granularity in arb_granularity(),
    ) {
        let (min, now) = if a <= b { (a, b) } else { (b, a) };
        let range = full_range(min, now, granularity);

        prop_assert_eq!(range[0], bucket_key(min, granularity));
        prop_assert_eq!(*range.last().unwrap(), bucket_key(now, granularity));
        for pair in range.windows(2) {
            prop_assert_eq!(pair[0].next(), pair[1]);
            prop_assert_eq!(pair[0].end().succ_opt().unwrap(), pair[1].start());
        }
    }

    /// A timestamp always lies inside its own bucket
    #[test]
    fn bucket_contains_timestamp(ts in arb_timestamp(), granularity in arb_granularity()) {
        let key = bucket_key(ts, granularity);
        prop_assert!(key.contains(ts.date()));
        prop_assert!(key.start() <= ts.date());
        prop_assert!(ts.date() <= key.end());
    }

    // ============================================
    // AGGREGATION PROPERTIES
    // ============================================

    /// Shape and totals of the dense table
    #[test]
    fn aggregate_shape_and_sum(records in arb_records(40), granularity in arb_granularity()) {
        let max = records.iter().map(MessageRecord::timestamp).max().unwrap();
        let min = records.iter().map(MessageRecord::timestamp).min().unwrap();
        let now = max + Duration::days(3);

        let table = aggregate(&records, granularity, now).unwrap();

        prop_assert_eq!(table.row_count(), full_range(min, now, granularity).len());

        let mut distinct: Vec<&str> = Vec::new();
        for record in &records {
            if !distinct.contains(&record.participant()) {
                distinct.push(record.participant());
            }
        }
        prop_assert_eq!(table.column_count(), distinct.len());
        prop_assert_eq!(table.participants(), distinct.as_slice());
        prop_assert_eq!(table.total(), records.len() as u64);
    }

    /// Every record's bucket is a row of the table
    #[test]
    fn aggregate_covers_every_record(records in arb_records(30), granularity in arb_granularity()) {
        let now = origin();
        let table = aggregate(&records, granularity, now).unwrap();
        for record in &records {
            let key = bucket_key(record.timestamp(), granularity);
            prop_assert!(table.count(&key, record.participant()).unwrap_or(0) >= 1);
        }
    }

    /// Same inputs, same table
    #[test]
    fn aggregate_is_idempotent(records in arb_records(30), granularity in arb_granularity()) {
        let now = origin() + Duration::days(7 * 365);
        let first = aggregate(&records, granularity, now).unwrap();
        let second = aggregate(&records, granularity, now).unwrap();
        prop_assert_eq!(first, second);
    }
}
