use std::cmp::Ordering;

use chrono::NaiveDate;
use concilia_core::{GroupTransaction, StatementGroup};

/// Newest-first ordering where undated entries sink to the end. Used with a
/// stable sort so equal keys keep their encounter order.
fn newest_first(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// The instant a group sorts by: the newest normalized transaction date,
/// falling back to `fallback` (a bound group's declared-range end) when the
/// group is empty or fully unparseable. `None` means rank last.
pub fn reference_date(
    transactions: &[GroupTransaction],
    fallback: Option<NaiveDate>,
) -> Option<NaiveDate> {
    transactions
        .iter()
        .filter_map(|tx| tx.normalized_date)
        .max()
        .or(fallback)
}

pub fn sort_transactions(transactions: &mut [GroupTransaction]) {
    transactions.sort_by(|a, b| newest_first(a.normalized_date, b.normalized_date));
}

pub fn sort_groups(groups: &mut [StatementGroup]) {
    groups.sort_by(|a, b| newest_first(a.reference_date, b.reference_date));
}
