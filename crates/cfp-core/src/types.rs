use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Identity of a problem on the judge: contest id plus the letter-style
/// index within the contest ("A", "B", "C1", ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProblemKey {
    pub contest_id: i64,
    pub index: String,
}

impl ProblemKey {
    pub fn new(contest_id: i64, index: impl Into<String>) -> Self {
        Self {
            contest_id,
            index: index.into(),
        }
    }
}

impl fmt::Display for ProblemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.contest_id, self.index)
    }
}

/// A catalog problem with its contest metadata already resolved.
/// Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub key: ProblemKey,
    pub name: String,
    /// Absent for problems the judge has not rated yet; such problems
    /// never match a requested rating.
    pub rating: Option<u32>,
    pub tags: Vec<String>,
    pub year: i32,
    pub contest_name: String,
}

impl Problem {
    /// Canonical problemset URL for this problem.
    pub fn url(&self) -> String {
        format!(
            "https://codeforces.com/problemset/problem/{}/{}",
            self.key.contest_id, self.key.index
        )
    }

    pub fn tags_lower(&self) -> Vec<String> {
        self.tags.iter().map(|t| t.to_lowercase()).collect()
    }
}

/// Contest metadata needed to resolve a problem's year and to test
/// name/id exclusions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestMeta {
    pub id: i64,
    pub name: String,
    pub year: i32,
}

/// Every problem identity appearing anywhere in any requested user's
/// submission history, independent of verdict.
pub type TouchedSet = HashSet<ProblemKey>;

/// Per-run selection constraints. Immutable for the run's duration.
///
/// `exclude_name_patterns` are matched as case-insensitive substrings of
/// the contest name; `tag_caps` keys are matched case-insensitively
/// against problem tags.
#[derive(Debug, Clone, Default)]
pub struct Constraints {
    pub year_min: i32,
    pub year_max: i32,
    pub exclude_contest_ids: HashSet<i64>,
    pub exclude_name_patterns: Vec<String>,
    pub distinct_contest: bool,
    pub distinct_tags: bool,
    pub tag_caps: HashMap<String, u32>,
    pub seed: Option<u64>,
}

impl Constraints {
    pub fn new(year_min: i32, year_max: i32) -> Self {
        Self {
            year_min,
            year_max,
            ..Self::default()
        }
    }
}

/// One entry of the selection result, in requested-rating order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Selection {
    Picked(Problem),
    Unsatisfiable { rating: u32 },
}

impl Selection {
    pub fn problem(&self) -> Option<&Problem> {
        match self {
            Selection::Picked(p) => Some(p),
            Selection::Unsatisfiable { .. } => None,
        }
    }
}
