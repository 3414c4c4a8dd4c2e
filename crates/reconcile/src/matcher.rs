use std::collections::HashMap;

use chrono::NaiveDate;
use concilia_core::{
    normalize_date, parse_declared_range, DateRange, FileRecord, TransactionRecord,
};

/// Tunables for the range tier. Mirrors the shape of the auto-match engines
/// elsewhere in the product so callers can harden the buffer later without
/// an API change.
#[derive(Debug, Clone)]
pub struct MatchTolerance {
    /// Days added on each side of a file's declared range. Absorbs timezone
    /// drift in extraction and statements whose boundary transactions post
    /// just outside the declared window.
    pub range_buffer_days: u64,
}

impl Default for MatchTolerance {
    fn default() -> Self {
        Self {
            range_buffer_days: 2,
        }
    }
}

/// Outcome of assigning transactions to files: one bucket per registry
/// entry, aligned by index, plus the unmatched remainder. Each entry's
/// declared range is parsed once here and carried along so ranking can
/// reuse it instead of parsing again.
#[derive(Debug)]
pub struct MatchPartition<'a> {
    pub per_file: Vec<Vec<&'a TransactionRecord>>,
    pub ranges: Vec<Option<DateRange>>,
    pub orphans: Vec<&'a TransactionRecord>,
}

/// Assign each transaction to at most one file. Files are visited in
/// registry order and a claimed transaction is removed from further
/// consideration, so the partition is deterministic for identical inputs.
///
/// Per file, two tiers:
/// 1. strict — the transaction's source identity is a real reference equal
///    to the file's real identity (placeholders never collide);
/// 2. range — the file's declared range parsed cleanly and the transaction's
///    normalized date falls inside it, widened by the tolerance buffer.
pub fn match_transactions<'a>(
    registry: &[&'a FileRecord],
    transactions: &'a [TransactionRecord],
    tolerance: &MatchTolerance,
) -> MatchPartition<'a> {
    // Normalize every date once; the range tier scans remainders repeatedly.
    let normalized: Vec<Option<NaiveDate>> = transactions
        .iter()
        .map(|tx| normalize_date(&tx.date_text))
        .collect();

    // Strict-tier index keeps the common case near-linear.
    let mut by_source: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, tx) in transactions.iter().enumerate() {
        if let Some(source) = tx.source_identity.as_real() {
            by_source.entry(source).or_default().push(i);
        }
    }

    let mut claimed = vec![false; transactions.len()];
    let mut per_file = Vec::with_capacity(registry.len());
    let mut ranges = Vec::with_capacity(registry.len());

    for file in registry {
        let mut bucket: Vec<&TransactionRecord> = Vec::new();

        if let Some(file_id) = file.identity.as_real() {
            if let Some(indices) = by_source.get(file_id) {
                for &i in indices {
                    if !claimed[i] {
                        claimed[i] = true;
                        bucket.push(&transactions[i]);
                    }
                }
            }
        }

        let range = parse_declared_range(&file.declared_range_text).ok();
        if let Some(range) = range {
            for (i, tx) in transactions.iter().enumerate() {
                if claimed[i] {
                    continue;
                }
                if let Some(date) = normalized[i] {
                    if range.contains_buffered(date, tolerance.range_buffer_days) {
                        claimed[i] = true;
                        bucket.push(tx);
                    }
                }
            }
        }

        per_file.push(bucket);
        ranges.push(range);
    }

    let orphans = transactions
        .iter()
        .enumerate()
        .filter(|(i, _)| !claimed[*i])
        .map(|(_, tx)| tx)
        .collect();

    MatchPartition {
        per_file,
        ranges,
        orphans,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concilia_core::{FileIdentity, Money};

    fn file(name: &str, range: &str, identity: FileIdentity) -> FileRecord {
        FileRecord {
            identity,
            original_name: name.to_string(),
            declared_range_text: range.to_string(),
            bank_name: None,
            account_number: None,
            account_name: None,
        }
    }

    fn tx(id: &str, date: &str, source: FileIdentity) -> TransactionRecord {
        TransactionRecord {
            identity: id.to_string(),
            date_text: date.to_string(),
            description: "Test".to_string(),
            amount: Money::from_cents(100),
            balance: None,
            source_identity: source,
        }
    }

    fn run<'a>(
        files: &'a [FileRecord],
        txs: &'a [TransactionRecord],
    ) -> MatchPartition<'a> {
        let registry: Vec<&FileRecord> = files.iter().collect();
        match_transactions(&registry, txs, &MatchTolerance::default())
    }

    #[test]
    fn strict_match_by_source_identity() {
        let files = [file("A", "garbage", FileIdentity::Real("drv1".into()))];
        let txs = [tx("t1", "nope", FileIdentity::Real("drv1".into()))];
        let p = run(&files, &txs);
        assert_eq!(p.per_file[0].len(), 1);
        assert!(p.orphans.is_empty());
    }

    #[test]
    fn placeholder_source_never_matches_strictly() {
        // File identity is also the placeholder; two placeholders must not collide.
        let files = [file("A", "garbage", FileIdentity::Placeholder)];
        let txs = [tx("t1", "nope", FileIdentity::Placeholder)];
        let p = run(&files, &txs);
        assert!(p.per_file[0].is_empty());
        assert_eq!(p.orphans.len(), 1);
    }

    #[test]
    fn absent_identities_never_collide() {
        let files = [file("A", "garbage", FileIdentity::Absent)];
        let txs = [tx("t1", "nope", FileIdentity::Absent)];
        let p = run(&files, &txs);
        assert_eq!(p.orphans.len(), 1);
    }

    #[test]
    fn range_match_within_declared_window() {
        let files = [file("A", "01 Jan 2024 - 31 Jan 2024", FileIdentity::Absent)];
        let txs = [tx("t1", "20/01/2024", FileIdentity::Placeholder)];
        let p = run(&files, &txs);
        assert_eq!(p.per_file[0].len(), 1);
    }

    #[test]
    fn range_tier_honors_two_day_buffer() {
        let files = [file("A", "10 Jan 2024 - 20 Jan 2024", FileIdentity::Absent)];
        let inside = [tx("t1", "08/01/2024", FileIdentity::Absent)];
        let outside = [tx("t2", "07/01/2024", FileIdentity::Absent)];
        assert_eq!(run(&files, &inside).per_file[0].len(), 1);
        assert_eq!(run(&files, &outside).orphans.len(), 1);
    }

    #[test]
    fn malformed_range_disables_range_tier() {
        let files = [file("A", "Unknown Date Range", FileIdentity::Real("drv1".into()))];
        let txs = [
            tx("t1", "15/01/2024", FileIdentity::Absent),
            tx("t2", "15/01/2024", FileIdentity::Real("drv1".into())),
        ];
        let p = run(&files, &txs);
        // Strict still works; date-only candidates stay orphaned.
        assert_eq!(p.per_file[0].len(), 1);
        assert_eq!(p.per_file[0][0].identity, "t2");
        assert_eq!(p.orphans.len(), 1);
    }

    #[test]
    fn first_file_wins_overlapping_ranges() {
        let files = [
            file("A", "01 Jan 2024 - 31 Jan 2024", FileIdentity::Absent),
            file("B", "15 Jan 2024 - 15 Feb 2024", FileIdentity::Absent),
        ];
        let txs = [tx("t1", "20/01/2024", FileIdentity::Absent)];
        let p = run(&files, &txs);
        assert_eq!(p.per_file[0].len(), 1);
        assert!(p.per_file[1].is_empty());
    }

    #[test]
    fn strict_claim_precedes_range_claim_in_same_file() {
        let files = [file("A", "01 Jan 2024 - 31 Jan 2024", FileIdentity::Real("drv1".into()))];
        let txs = [tx("t1", "15/01/2024", FileIdentity::Real("drv1".into()))];
        let p = run(&files, &txs);
        // Claimed exactly once.
        assert_eq!(p.per_file[0].len(), 1);
        assert!(p.orphans.is_empty());
    }

    #[test]
    fn unparseable_transaction_date_falls_through_to_orphans() {
        let files = [file("A", "01 Jan 2024 - 31 Jan 2024", FileIdentity::Absent)];
        let txs = [tx("t1", "ERROR: garbage", FileIdentity::Absent)];
        let p = run(&files, &txs);
        assert_eq!(p.orphans.len(), 1);
    }

    #[test]
    fn partition_carries_parsed_ranges_per_file() {
        use chrono::NaiveDate;
        let files = [
            file("A", "01 Jan 2024 - 31 Jan 2024", FileIdentity::Absent),
            file("B", "Unknown Date Range", FileIdentity::Absent),
        ];
        let p = run(&files, &[]);
        assert_eq!(p.ranges.len(), 2);
        assert_eq!(
            p.ranges[0].map(|r| r.end),
            NaiveDate::from_ymd_opt(2024, 1, 31)
        );
        assert_eq!(p.ranges[1], None);
    }

    #[test]
    fn file_order_does_not_move_uncontested_transactions() {
        let a = file("A", "01 Jan 2024 - 31 Jan 2024", FileIdentity::Absent);
        let b = file("B", "01 Mar 2024 - 31 Mar 2024", FileIdentity::Absent);
        let txs = [
            tx("jan", "15/01/2024", FileIdentity::Absent),
            tx("mar", "15/03/2024", FileIdentity::Absent),
        ];

        let forward = [a.clone(), b.clone()];
        let reversed = [b, a];
        let pf = run(&forward, &txs);
        let pr = run(&reversed, &txs);

        // Disjoint ranges: each transaction lands with the same file either way.
        assert_eq!(pf.per_file[0][0].identity, "jan");
        assert_eq!(pf.per_file[1][0].identity, "mar");
        assert_eq!(pr.per_file[0][0].identity, "mar");
        assert_eq!(pr.per_file[1][0].identity, "jan");
    }

    #[test]
    fn partition_is_deterministic() {
        let files = [
            file("A", "01 Jan 2024 - 31 Jan 2024", FileIdentity::Real("drv1".into())),
            file("B", "01 Feb 2024 - 29 Feb 2024", FileIdentity::Absent),
        ];
        let txs = [
            tx("t1", "15/01/2024", FileIdentity::Real("drv1".into())),
            tx("t2", "20/02/2024", FileIdentity::Absent),
            tx("t3", "15/06/2024", FileIdentity::Absent),
        ];
        let a = run(&files, &txs);
        let b = run(&files, &txs);
        let ids = |p: &MatchPartition| -> Vec<Vec<String>> {
            p.per_file
                .iter()
                .map(|b| b.iter().map(|t| t.identity.clone()).collect())
                .collect()
        };
        assert_eq!(ids(&a), ids(&b));
        assert_eq!(a.orphans.len(), b.orphans.len());
    }
}
