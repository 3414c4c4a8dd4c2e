use tracing::debug;

use concilia_core::{FileRecord, GroupTransaction, StatementGroup, TransactionRecord};

use crate::dedup::dedup_files;
use crate::matcher::{match_transactions, MatchTolerance};
use crate::orphan::bucket_orphans;
use crate::rank::{reference_date, sort_groups, sort_transactions};

/// Build the reconciled view with the default tolerance.
pub fn reconcile(
    files: &[FileRecord],
    transactions: &[TransactionRecord],
) -> Vec<StatementGroup> {
    reconcile_with(files, transactions, &MatchTolerance::default())
}

/// Build the reconciled view: deduplicate the file registry, assign every
/// transaction to at most one file, bucket the remainder into per-month
/// virtual groups, and order everything newest-first.
///
/// Pure and total: inputs are borrowed immutably, the output is rebuilt from
/// scratch on every call, and every edge case degrades to a well-defined
/// placement instead of an error. Re-running on unchanged inputs yields a
/// structurally identical result, so the UI may invoke this on every load.
pub fn reconcile_with(
    files: &[FileRecord],
    transactions: &[TransactionRecord],
    tolerance: &MatchTolerance,
) -> Vec<StatementGroup> {
    let registry = dedup_files(files);
    debug!(
        raw = files.len(),
        surviving = registry.len(),
        "deduplicated file registry"
    );

    let partition = match_transactions(&registry, transactions, tolerance);
    debug!(
        matched = transactions.len() - partition.orphans.len(),
        orphans = partition.orphans.len(),
        "assigned transactions to files"
    );

    let mut groups: Vec<StatementGroup> = Vec::with_capacity(registry.len() + 4);

    let buckets = partition.per_file.into_iter().zip(&partition.ranges);
    for (file, (matched, range)) in registry.iter().zip(buckets) {
        let enriched: Vec<GroupTransaction> =
            matched.iter().map(|tx| GroupTransaction::enrich(tx)).collect();
        let mut group = StatementGroup::bound(file, enriched);
        let declared_end = range.as_ref().map(|r| r.end);
        group.reference_date = reference_date(&group.transactions, declared_end);
        groups.push(group);
    }

    for mut group in bucket_orphans(&partition.orphans) {
        group.reference_date = reference_date(&group.transactions, None);
        groups.push(group);
    }

    for group in &mut groups {
        sort_transactions(&mut group.transactions);
    }
    sort_groups(&mut groups);

    debug!(groups = groups.len(), "reconciled view ready");
    groups
}
