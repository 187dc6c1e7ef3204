use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Tag recorded on a related-bill edge by the subsystem that asserted it.
pub const IDENTIFIED_BY_BILLMAP: &str = "BillMap";

/// Why two bills were linked.
///
/// Ordering is total: known tags follow the fixed priority table below and any
/// tag the table does not know sorts after all of them, alphabetically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Reason {
    /// `identical` as asserted upstream by CRS; ranks ahead of every local tag
    UpstreamIdentical,
    Identical,
    NearlyIdentical,
    TitleMatch,
    MainTitleMatch,
    Includes,
    IncludedBy,
    Related,
    Unrelated,
    SomeSimilarity,
    Other(String),
}

const KNOWN_REASONS: &[Reason] = &[
    Reason::UpstreamIdentical,
    Reason::Identical,
    Reason::NearlyIdentical,
    Reason::TitleMatch,
    Reason::MainTitleMatch,
    Reason::Includes,
    Reason::IncludedBy,
    Reason::Related,
    Reason::Unrelated,
    Reason::SomeSimilarity,
];

impl Reason {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::UpstreamIdentical => "identical",
            Self::Identical => "bills-identical",
            Self::NearlyIdentical => "bills-nearly_identical",
            Self::TitleMatch => "bills-title_match",
            Self::MainTitleMatch => "bills-main_title_match",
            Self::Includes => "bills-includes",
            Self::IncludedBy => "bills-included_by",
            Self::Related => "related",
            Self::Unrelated => "bills-unrelated",
            Self::SomeSimilarity => "bills-some_similarity",
            Self::Other(tag) => tag,
        }
    }

    /// Priority rank; lower ranks sort first.
    #[must_use]
    pub const fn rank(&self) -> u8 {
        match self {
            Self::UpstreamIdentical => 0,
            Self::Identical => 1,
            Self::NearlyIdentical => 2,
            Self::TitleMatch => 3,
            Self::MainTitleMatch => 4,
            Self::Includes => 5,
            Self::IncludedBy => 6,
            Self::Related => 7,
            Self::Unrelated => 8,
            Self::SomeSimilarity => 9,
            Self::Other(_) => u8::MAX,
        }
    }

    #[must_use]
    pub fn parse(tag: &str) -> Self {
        let tag = tag.trim();
        KNOWN_REASONS
            .iter()
            .find(|known| known.as_str() == tag)
            .cloned()
            .unwrap_or_else(|| Self::Other(tag.to_string()))
    }
}

impl Ord for Reason {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank()
            .cmp(&other.rank())
            .then_with(|| self.as_str().cmp(other.as_str()))
    }
}

impl PartialOrd for Reason {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Reason {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for Reason {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<Reason> for String {
    fn from(value: Reason) -> Self {
        value.as_str().to_string()
    }
}

/// Parses the comma separated reason list used by upstream `data.json` files.
#[must_use]
pub fn parse_reason_list(raw: &str) -> Vec<Reason> {
    let mut reasons: Vec<Reason> = raw
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(Reason::parse)
        .collect();
    sort_reasons(&mut reasons);
    reasons
}

/// Sorts by priority and drops duplicates.
pub fn sort_reasons(reasons: &mut Vec<Reason>) {
    reasons.sort();
    reasons.dedup();
}

/// Adds `reason` to the list, keeping it sorted and duplicate free.
/// Returns `true` when the list changed.
pub fn merge_reason(reasons: &mut Vec<Reason>, reason: Reason) -> bool {
    if reasons.contains(&reason) {
        return false;
    }
    reasons.push(reason);
    sort_reasons(reasons);
    true
}

#[must_use]
pub fn join_reasons(reasons: &[Reason]) -> String {
    reasons
        .iter()
        .map(Reason::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
