//! Domain model and selection logic: problems, run constraints, the
//! eligibility predicate, and the seeded one-problem-per-rating selector.
//! No I/O lives here.

pub mod exclusion;
pub mod selector;
pub mod types;

pub use exclusion::ExclusionEngine;
pub use selector::{seeded_rng, select_problems};
pub use types::{Constraints, ContestMeta, Problem, ProblemKey, Selection, TouchedSet};
