use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, HashSet};

use crate::exclusion::ExclusionEngine;
use crate::types::{Constraints, Problem, ProblemKey, Selection};

/// Accumulator threaded through the per-rating selection steps. Earlier
/// picks consume candidates, so its contents feed back into every later
/// rating's candidate filter.
#[derive(Debug, Default)]
struct SelectionState {
    used_keys: HashSet<ProblemKey>,
    used_contests: HashSet<i64>,
    tag_counts: HashMap<String, u32>,
}

impl SelectionState {
    /// Whether picking `problem` now would violate any active constraint
    /// counter. `caps` is empty when `distinct_tags` is active: the strict
    /// rule supersedes per-tag caps entirely.
    fn admits(&self, problem: &Problem, constraints: &Constraints, caps: &HashMap<String, u32>) -> bool {
        if self.used_keys.contains(&problem.key) {
            return false;
        }
        if constraints.distinct_contest && self.used_contests.contains(&problem.key.contest_id) {
            return false;
        }
        let tags = problem.tags_lower();
        if constraints.distinct_tags {
            if tags.iter().any(|t| self.tag_counts.get(t).is_some_and(|&n| n >= 1)) {
                return false;
            }
        } else {
            for tag in &tags {
                if let Some(&cap) = caps.get(tag) {
                    if self.tag_counts.get(tag).copied().unwrap_or(0) >= cap {
                        return false;
                    }
                }
            }
        }
        true
    }

    fn commit(&mut self, problem: &Problem) {
        self.used_keys.insert(problem.key.clone());
        self.used_contests.insert(problem.key.contest_id);
        for tag in problem.tags_lower() {
            *self.tag_counts.entry(tag).or_insert(0) += 1;
        }
    }
}

/// RNG for a run: reproducible when a seed is configured, else entropy-seeded.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Pick one problem per requested rating, in request order.
///
/// Each rating gets a uniform seeded draw from the candidates that remain
/// after the run-level eligibility predicate and the constraint counters
/// accumulated by earlier picks. A rating with no remaining candidate
/// yields `Selection::Unsatisfiable` and selection continues, so the
/// caller sees every gap at once.
pub fn select_problems<R: Rng>(
    ratings: &[u32],
    catalog: &[Problem],
    engine: &ExclusionEngine<'_>,
    constraints: &Constraints,
    rng: &mut R,
) -> Vec<Selection> {
    // distinct_tags is the stricter rule; caps only apply without it.
    let caps: HashMap<String, u32> = if constraints.distinct_tags {
        HashMap::new()
    } else {
        constraints
            .tag_caps
            .iter()
            .filter(|&(_, &cap)| cap >= 1)
            .map(|(tag, &cap)| (tag.to_lowercase(), cap))
            .collect()
    };

    let mut state = SelectionState::default();
    let mut picked = Vec::with_capacity(ratings.len());
    for &rating in ratings {
        let pool: Vec<&Problem> = catalog
            .iter()
            .filter(|p| p.rating == Some(rating))
            .filter(|p| engine.eligible(p))
            .filter(|p| state.admits(p, constraints, &caps))
            .collect();
        if pool.is_empty() {
            picked.push(Selection::Unsatisfiable { rating });
            continue;
        }
        let chosen = pool[rng.gen_range(0..pool.len())].clone();
        state.commit(&chosen);
        picked.push(Selection::Picked(chosen));
    }
    picked
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod tests;
