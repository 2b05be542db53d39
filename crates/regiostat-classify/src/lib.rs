//! Legislative statistics: status taxonomy, the region × law matrix and
//! summary totals.

pub mod laws;
pub mod status;

pub use laws::{LawData, LawTotals, OwnInitiatives, ProcessedLawData, normalize_laws, normalize_laws_str};
pub use status::{InitiativeScope, NotSubmittedReason, StatusBucket, classify_status};
