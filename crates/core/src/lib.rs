pub mod date;
pub mod group;
pub mod money;
pub mod period;
pub mod record;

pub use date::{display_date, normalize_date};
pub use group::{FileMeta, GroupTransaction, StatementGroup};
pub use money::Money;
pub use period::{parse_declared_range, DateRange, RangeError};
pub use record::{FileIdentity, FileRecord, TransactionRecord, PLACEHOLDER_SENTINEL};
