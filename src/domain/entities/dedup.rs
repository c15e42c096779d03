//! Deduplication policy for re-submitted long URLs.

use std::str::FromStr;

use super::principal::PrincipalId;

/// Which existing records count as "already shortened" for a long URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupScope {
    /// Any record with the same long URL, whoever created it.
    #[default]
    Global,
    /// Only records created by the same principal; anonymous submissions
    /// dedup against other anonymous submissions.
    PerOwner,
}

impl DedupScope {
    /// Builds the owner filter the repository applies for a given submitter.
    pub fn filter_for(self, owner: Option<&PrincipalId>) -> OwnerFilter {
        match self {
            DedupScope::Global => OwnerFilter::Any,
            DedupScope::PerOwner => OwnerFilter::Exactly(owner.cloned()),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DedupScope::Global => "global",
            DedupScope::PerOwner => "owner",
        }
    }
}

impl FromStr for DedupScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(DedupScope::Global),
            "owner" | "per_owner" | "per-owner" => Ok(DedupScope::PerOwner),
            other => Err(format!("unknown dedup scope '{other}'")),
        }
    }
}

/// Owner restriction for a long-URL lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerFilter {
    Any,
    /// `Exactly(None)` matches anonymous records only.
    Exactly(Option<PrincipalId>),
}

impl OwnerFilter {
    pub fn matches(&self, owner: Option<&PrincipalId>) -> bool {
        match self {
            OwnerFilter::Any => true,
            OwnerFilter::Exactly(expected) => expected.as_ref() == owner,
        }
    }
}
