use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::normalize_date;
use crate::money::Money;
use crate::record::{FileIdentity, FileRecord, TransactionRecord};

/// Display metadata carried over from a surviving file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMeta {
    pub identity: FileIdentity,
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
    pub account_name: Option<String>,
}

impl FileMeta {
    pub fn from_record(file: &FileRecord) -> Self {
        FileMeta {
            identity: file.identity.clone(),
            bank_name: file.bank_name.clone(),
            account_number: file.account_number.clone(),
            account_name: file.account_name.clone(),
        }
    }
}

/// A transaction as handed to the presentation layer: the input record plus
/// the normalized date and the inflow/outflow split the dashboard renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupTransaction {
    pub identity: String,
    pub date_text: String,
    pub normalized_date: Option<NaiveDate>,
    pub description: String,
    pub amount: Money,
    pub money_in: Money,
    pub money_out: Money,
    pub balance: Option<Money>,
}

impl GroupTransaction {
    pub fn enrich(tx: &TransactionRecord) -> Self {
        GroupTransaction {
            identity: tx.identity.clone(),
            date_text: tx.date_text.clone(),
            normalized_date: normalize_date(&tx.date_text),
            description: tx.description.clone(),
            amount: tx.amount,
            money_in: tx.amount.inflow(),
            money_out: tx.amount.outflow(),
            balance: tx.balance,
        }
    }
}

/// One entry in the reconciled view. Bound groups wrap a surviving file
/// record; virtual groups are synthesized for orphaned transactions. The
/// dashboard renders both through the same shape, keyed off `is_virtual`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementGroup {
    pub is_virtual: bool,
    pub label: String,
    pub reference_date: Option<NaiveDate>,
    pub file_meta: Option<FileMeta>,
    pub transactions: Vec<GroupTransaction>,
}

impl StatementGroup {
    pub fn bound(file: &FileRecord, transactions: Vec<GroupTransaction>) -> Self {
        StatementGroup {
            is_virtual: false,
            label: file.original_name.clone(),
            reference_date: None,
            file_meta: Some(FileMeta::from_record(file)),
            transactions,
        }
    }

    pub fn virtual_group(label: String, transactions: Vec<GroupTransaction>) -> Self {
        StatementGroup {
            is_virtual: true,
            label,
            reference_date: None,
            file_meta: None,
            transactions,
        }
    }
}
