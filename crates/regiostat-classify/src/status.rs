//! Legislative status taxonomy.
//!
//! Free-text statuses from the legislative feed are mapped into a fixed set
//! of buckets by a priority-ordered prefix/substring rule chain. Matching is
//! case-insensitive and ignores runs of whitespace and line breaks.

use std::fmt;

use serde::Serialize;

/// Whether an LDPR initiative was carried alone or together with other factions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InitiativeScope {
    LdprOnly,
    CrossParty,
}

impl InitiativeScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LdprOnly => "only",
            Self::CrossParty => "cross_party",
        }
    }
}

/// Why a model law was not submitted in a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotSubmittedReason {
    /// Another party submitted it first.
    SubmittedByOtherParty,
    /// Another party's version was already adopted.
    AdoptedByOtherParty,
    /// No longer relevant in the region.
    NotRelevant,
    Other,
}

impl NotSubmittedReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SubmittedByOtherParty => "submitted_by_other_party",
            Self::AdoptedByOtherParty => "adopted_by_other_party",
            Self::NotRelevant => "not_relevant",
            Self::Other => "other",
        }
    }
}

/// Classified status of one model law in one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "bucket", rename_all = "snake_case")]
pub enum StatusBucket {
    NoData,
    AdoptedLdpr { scope: InitiativeScope },
    SubmittedLdpr { scope: InitiativeScope },
    Pending,
    ByOtherParty,
    NotSubmitted { reason: NotSubmittedReason },
}

impl StatusBucket {
    /// Display label of the top-level bucket.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NoData => "Нет данных",
            Self::AdoptedLdpr { .. } => "Принят ЛДПР",
            Self::SubmittedLdpr { .. } => "Внесен ЛДПР",
            Self::Pending => "На рассмотрении",
            Self::ByOtherParty => "Принят/Внесен другими",
            Self::NotSubmitted { .. } => "Не внесен",
        }
    }

    /// Machine name including the sub-bucket, e.g. `adopted_ldpr_cross_party`.
    pub fn slug(&self) -> &'static str {
        use InitiativeScope::*;
        use NotSubmittedReason::*;
        match self {
            Self::NoData => "no_data",
            Self::AdoptedLdpr { scope: LdprOnly } => "adopted_ldpr_only",
            Self::AdoptedLdpr { scope: CrossParty } => "adopted_ldpr_cross_party",
            Self::SubmittedLdpr { scope: LdprOnly } => "submitted_ldpr_only",
            Self::SubmittedLdpr { scope: CrossParty } => "submitted_ldpr_cross_party",
            Self::Pending => "pending",
            Self::ByOtherParty => "by_other_party",
            Self::NotSubmitted { reason: SubmittedByOtherParty } => {
                "not_submitted_submitted_by_other_party"
            }
            Self::NotSubmitted { reason: AdoptedByOtherParty } => {
                "not_submitted_adopted_by_other_party"
            }
            Self::NotSubmitted { reason: NotRelevant } => "not_submitted_not_relevant",
            Self::NotSubmitted { reason: Other } => "not_submitted_other",
        }
    }
}

impl fmt::Display for StatusBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lowercase and collapse every whitespace run (including line breaks) to one space.
pub fn normalize_status(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn initiative_scope(status: &str) -> InitiativeScope {
    if status.contains("по инициативе только лдпр") {
        InitiativeScope::LdprOnly
    } else if status.contains("межфракционная инициатива") {
        InitiativeScope::CrossParty
    } else {
        InitiativeScope::LdprOnly
    }
}

fn not_submitted_reason(status: &str) -> NotSubmittedReason {
    if status.contains("внесен по инициативе другой партии") {
        NotSubmittedReason::SubmittedByOtherParty
    } else if status.contains("принят по инициативе другой партии") {
        NotSubmittedReason::AdoptedByOtherParty
    } else if status.contains("неактуально") {
        NotSubmittedReason::NotRelevant
    } else {
        NotSubmittedReason::Other
    }
}

/// Classify a raw status string. `None` (absent or non-string) is "no data".
///
/// The `не внесен` prefix is checked before the "other party" substring, so
/// `"Не внесен (внесен по инициативе другой партии)"` lands in the
/// not-submitted bucket with its sub-reason. Unrecognised text falls through
/// to not-submitted/other.
pub fn classify_status(raw: Option<&str>) -> StatusBucket {
    let Some(raw) = raw else {
        return StatusBucket::NoData;
    };
    let status = normalize_status(raw);

    if status.is_empty() || status == "-" {
        StatusBucket::NoData
    } else if status.starts_with("принят по инициативе лдпр") {
        StatusBucket::AdoptedLdpr {
            scope: initiative_scope(&status),
        }
    } else if status.starts_with("внесен лдпр") {
        StatusBucket::SubmittedLdpr {
            scope: initiative_scope(&status),
        }
    } else if status.starts_with("ожидает") {
        StatusBucket::Pending
    } else if status.starts_with("не внесен") {
        StatusBucket::NotSubmitted {
            reason: not_submitted_reason(&status),
        }
    } else if status.contains("по инициативе другой партии") {
        StatusBucket::ByOtherParty
    } else {
        StatusBucket::NotSubmitted {
            reason: NotSubmittedReason::Other,
        }
    }
}
