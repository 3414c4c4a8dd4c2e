pub mod dedup;
pub mod engine;
pub mod matcher;
pub mod orphan;
pub mod rank;

pub use dedup::dedup_files;
pub use engine::{reconcile, reconcile_with};
pub use matcher::{match_transactions, MatchPartition, MatchTolerance};
pub use orphan::bucket_orphans;
