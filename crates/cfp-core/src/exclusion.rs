use crate::types::{Constraints, Problem, TouchedSet};

/// Run-level eligibility predicate: touched history, year bounds, and
/// contest id/name exclusions folded into one check.
///
/// Depends only on immutable per-run inputs, so one instance is safely
/// reused across every rating's candidate search.
pub struct ExclusionEngine<'a> {
    touched: &'a TouchedSet,
    constraints: &'a Constraints,
    /// Lowercased copies of the configured name patterns, blanks dropped.
    patterns: Vec<String>,
}

impl<'a> ExclusionEngine<'a> {
    pub fn new(touched: &'a TouchedSet, constraints: &'a Constraints) -> Self {
        let patterns = constraints
            .exclude_name_patterns
            .iter()
            .map(|p| p.trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        Self {
            touched,
            constraints,
            patterns,
        }
    }

    /// True when the problem passes every run-level exclusion. Constraint
    /// counters (contest/tag reuse) are the selector's business, not ours.
    pub fn eligible(&self, problem: &Problem) -> bool {
        if self.touched.contains(&problem.key) {
            return false;
        }
        if problem.year < self.constraints.year_min || problem.year > self.constraints.year_max {
            return false;
        }
        if self
            .constraints
            .exclude_contest_ids
            .contains(&problem.key.contest_id)
        {
            return false;
        }
        if !self.patterns.is_empty() {
            let name = problem.contest_name.to_lowercase();
            if self.patterns.iter().any(|p| name.contains(p)) {
                return false;
            }
        }
        true
    }
}
