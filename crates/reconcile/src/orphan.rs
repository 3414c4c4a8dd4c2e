use chrono::{Datelike, NaiveDate};
use concilia_core::{display_date, GroupTransaction, StatementGroup, TransactionRecord};

/// Label for the bucket holding transactions whose date never normalized.
/// Same wording the ingestion side uses for an undetermined statement range.
pub const UNKNOWN_BUCKET_LABEL: &str = "Unknown Date Range";

/// Bucket unmatched transactions into synthetic per-month groups.
///
/// One virtual group per distinct `(year, month)` of the normalized date,
/// in first-encounter order of the keys; the ranker owns the final order.
/// Transactions whose date fails to normalize land in a single unknown
/// bucket rather than being dropped. Labels are computed from each bucket's
/// own members, never from any upstream declared range.
pub fn bucket_orphans(orphans: &[&TransactionRecord]) -> Vec<StatementGroup> {
    let mut months: Vec<((i32, u32), Vec<GroupTransaction>)> = Vec::new();
    let mut unknown: Vec<GroupTransaction> = Vec::new();

    for tx in orphans {
        let enriched = GroupTransaction::enrich(tx);
        match enriched.normalized_date {
            Some(date) => {
                let key = (date.year(), date.month());
                match months.iter_mut().find(|(k, _)| *k == key) {
                    Some((_, bucket)) => bucket.push(enriched),
                    None => months.push((key, vec![enriched])),
                }
            }
            None => unknown.push(enriched),
        }
    }

    let mut groups: Vec<StatementGroup> = months
        .into_iter()
        .map(|(_, txs)| StatementGroup::virtual_group(span_label(&txs), txs))
        .collect();

    if !unknown.is_empty() {
        groups.push(StatementGroup::virtual_group(
            UNKNOWN_BUCKET_LABEL.to_string(),
            unknown,
        ));
    }

    groups
}

fn span_label(txs: &[GroupTransaction]) -> String {
    let dates: Vec<NaiveDate> = txs.iter().filter_map(|t| t.normalized_date).collect();
    match (dates.iter().min(), dates.iter().max()) {
        (Some(&earliest), Some(&latest)) => {
            format!("{} – {}", display_date(earliest), display_date(latest))
        }
        _ => UNKNOWN_BUCKET_LABEL.to_string(),
    }
}
