use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Value the ingestion pipeline writes when a file never received a real
/// external storage reference.
pub const PLACEHOLDER_SENTINEL: &str = "TEMP_UPLOAD";

/// External storage reference of a statement file, or the transaction-side
/// back-reference to one.
///
/// Modeled as an explicit variant set instead of comparing against the raw
/// sentinel string everywhere: two `Placeholder`s must never be treated as
/// equal identities, and `Absent` must never match anything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FileIdentity {
    #[default]
    Absent,
    Placeholder,
    Real(String),
}

impl FileIdentity {
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => FileIdentity::Absent,
            Some(s) if s == PLACEHOLDER_SENTINEL => FileIdentity::Placeholder,
            Some(s) => FileIdentity::Real(s.to_string()),
        }
    }

    pub fn is_real(&self) -> bool {
        matches!(self, FileIdentity::Real(_))
    }

    /// The underlying reference, only for `Real` identities. Placeholders
    /// and absent identities never participate in strict matching.
    pub fn as_real(&self) -> Option<&str> {
        match self {
            FileIdentity::Real(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl Serialize for FileIdentity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FileIdentity::Absent => serializer.serialize_none(),
            FileIdentity::Placeholder => serializer.serialize_some(PLACEHOLDER_SENTINEL),
            FileIdentity::Real(s) => serializer.serialize_some(s),
        }
    }
}

impl<'de> Deserialize<'de> for FileIdentity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(FileIdentity::from_raw(raw.as_deref()))
    }
}

/// Metadata describing one uploaded bank-statement source, as supplied by
/// the file registry. Read-only input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    #[serde(default)]
    pub identity: FileIdentity,
    pub original_name: String,
    pub declared_range_text: String,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub account_name: Option<String>,
}

/// One parsed ledger line, as supplied by the transaction store. Read-only
/// input; `source_identity` is a weak back-reference into the file registry,
/// not an ownership relation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub identity: String,
    pub date_text: String,
    pub description: String,
    pub amount: Money,
    #[serde(default)]
    pub balance: Option<Money>,
    #[serde(default)]
    pub source_identity: FileIdentity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_variants() {
        assert_eq!(FileIdentity::from_raw(None), FileIdentity::Absent);
        assert_eq!(FileIdentity::from_raw(Some("")), FileIdentity::Absent);
        assert_eq!(FileIdentity::from_raw(Some("  ")), FileIdentity::Absent);
        assert_eq!(
            FileIdentity::from_raw(Some("TEMP_UPLOAD")),
            FileIdentity::Placeholder
        );
        assert_eq!(
            FileIdentity::from_raw(Some("drv1")),
            FileIdentity::Real("drv1".to_string())
        );
    }

    #[test]
    fn placeholders_are_not_real() {
        assert!(!FileIdentity::Placeholder.is_real());
        assert!(!FileIdentity::Absent.is_real());
        assert_eq!(FileIdentity::Placeholder.as_real(), None);
        assert!(FileIdentity::Real("x".into()).is_real());
    }

    #[test]
    fn deserialize_file_record_with_sentinel() {
        let json = r#"{
            "identity": "TEMP_UPLOAD",
            "originalName": "STMT_A.pdf",
            "declaredRangeText": "01 Jan 2024 - 31 Jan 2024"
        }"#;
        let rec: FileRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.identity, FileIdentity::Placeholder);
        assert_eq!(rec.original_name, "STMT_A.pdf");
        assert_eq!(rec.bank_name, None);
    }

    #[test]
    fn deserialize_file_record_missing_identity() {
        let json = r#"{"originalName": "A", "declaredRangeText": "x"}"#;
        let rec: FileRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.identity, FileIdentity::Absent);
    }

    #[test]
    fn deserialize_transaction_record() {
        let json = r#"{
            "identity": "tx1",
            "dateText": "15/01/2024",
            "description": "WIRE IN",
            "amount": "1250.00",
            "sourceIdentity": "drv1"
        }"#;
        let tx: TransactionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(tx.source_identity, FileIdentity::Real("drv1".into()));
        assert_eq!(tx.amount, Money::from_cents(125000));
        assert_eq!(tx.balance, None);
    }

    #[test]
    fn identity_serializes_back_to_sentinel() {
        let json = serde_json::to_string(&FileIdentity::Placeholder).unwrap();
        assert_eq!(json, r#""TEMP_UPLOAD""#);
        let json = serde_json::to_string(&FileIdentity::Absent).unwrap();
        assert_eq!(json, "null");
    }
}
