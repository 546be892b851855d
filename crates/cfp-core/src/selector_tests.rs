use super::*;
use crate::types::TouchedSet;

fn problem(contest_id: i64, index: &str, rating: u32, tags: &[&str]) -> Problem {
    Problem {
        key: ProblemKey::new(contest_id, index),
        name: format!("Problem {contest_id}{index}"),
        rating: Some(rating),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        year: 2022,
        contest_name: format!("Round {contest_id}"),
    }
}

fn run(
    ratings: &[u32],
    catalog: &[Problem],
    touched: &TouchedSet,
    constraints: &Constraints,
) -> Vec<Selection> {
    let engine = ExclusionEngine::new(touched, constraints);
    let mut rng = seeded_rng(Some(7));
    select_problems(ratings, catalog, &engine, constraints, &mut rng)
}

fn picked_keys(result: &[Selection]) -> Vec<ProblemKey> {
    result
        .iter()
        .filter_map(|s| s.problem().map(|p| p.key.clone()))
        .collect()
}

#[test]
fn test_result_preserves_length_and_order() {
    let catalog = vec![
        problem(1, "A", 800, &[]),
        problem(2, "A", 1200, &[]),
    ];
    let touched = TouchedSet::new();
    let constraints = Constraints::new(2000, 2030);

    let result = run(&[1200, 3500, 800], &catalog, &touched, &constraints);
    assert_eq!(result.len(), 3);
    assert_eq!(result[0].problem().unwrap().rating, Some(1200));
    assert_eq!(result[1], Selection::Unsatisfiable { rating: 3500 });
    assert_eq!(result[2].problem().unwrap().rating, Some(800));
}

#[test]
fn test_touched_problem_never_selected() {
    // Scenario: "a" submitted (100,"A"); the only other 1000-rated
    // candidate (200,"B") must win.
    let catalog = vec![
        problem(100, "A", 1000, &[]),
        problem(200, "B", 1000, &[]),
    ];
    let mut touched = TouchedSet::new();
    touched.insert(ProblemKey::new(100, "A"));
    let constraints = Constraints::new(2000, 2030);

    let result = run(&[1000], &catalog, &touched, &constraints);
    assert_eq!(picked_keys(&result), vec![ProblemKey::new(200, "B")]);
}

#[test]
fn test_repeated_rating_with_single_candidate() {
    let catalog = vec![problem(5, "C", 1200, &[])];
    let touched = TouchedSet::new();
    let constraints = Constraints::new(2000, 2030);

    let result = run(&[1200, 1200], &catalog, &touched, &constraints);
    assert_eq!(result[0].problem().unwrap().key, ProblemKey::new(5, "C"));
    assert_eq!(result[1], Selection::Unsatisfiable { rating: 1200 });
}

#[test]
fn test_no_duplicate_identities_across_positions() {
    let catalog: Vec<Problem> = (0..6).map(|i| problem(10 + i, "A", 900, &[])).collect();
    let touched = TouchedSet::new();
    let constraints = Constraints::new(2000, 2030);

    let result = run(&[900, 900, 900, 900], &catalog, &touched, &constraints);
    let keys = picked_keys(&result);
    assert_eq!(keys.len(), 4);
    let unique: std::collections::HashSet<_> = keys.iter().collect();
    assert_eq!(unique.len(), 4);
}

#[test]
fn test_distinct_contest() {
    let catalog = vec![
        problem(7, "A", 800, &[]),
        problem(7, "B", 900, &[]),
        problem(8, "A", 900, &[]),
    ];
    let touched = TouchedSet::new();
    let mut constraints = Constraints::new(2000, 2030);
    constraints.distinct_contest = true;

    let result = run(&[800, 900], &catalog, &touched, &constraints);
    let keys = picked_keys(&result);
    assert_eq!(keys[0], ProblemKey::new(7, "A"));
    // Contest 7 is spent, so the second pick must come from contest 8.
    assert_eq!(keys[1], ProblemKey::new(8, "A"));
}

#[test]
fn test_distinct_tags_blocks_any_overlap() {
    let catalog = vec![
        problem(1, "A", 800, &["math", "greedy"]),
        problem(2, "A", 900, &["greedy", "dp"]),
        problem(3, "A", 900, &["strings"]),
    ];
    let touched = TouchedSet::new();
    let mut constraints = Constraints::new(2000, 2030);
    constraints.distinct_tags = true;

    let result = run(&[800, 900], &catalog, &touched, &constraints);
    let keys = picked_keys(&result);
    assert_eq!(keys[0], ProblemKey::new(1, "A"));
    assert_eq!(keys[1], ProblemKey::new(3, "A"));
}

#[test]
fn test_tag_caps_block_when_no_alternative_exists() {
    let catalog = vec![
        problem(1, "A", 900, &["strings"]),
        problem(2, "A", 900, &["strings"]),
    ];
    let touched = TouchedSet::new();
    let mut constraints = Constraints::new(2000, 2030);
    constraints.tag_caps.insert("strings".to_string(), 1);

    let result = run(&[900, 900], &catalog, &touched, &constraints);
    assert!(result[0].problem().is_some());
    assert_eq!(result[1], Selection::Unsatisfiable { rating: 900 });
}

#[test]
fn test_tag_caps_prefer_uncapped_alternative() {
    let catalog = vec![
        problem(1, "A", 900, &["strings"]),
        problem(2, "A", 900, &["strings"]),
        problem(3, "A", 900, &["graphs"]),
    ];
    let touched = TouchedSet::new();
    let mut constraints = Constraints::new(2000, 2030);
    constraints.tag_caps.insert("strings".to_string(), 1);

    let result = run(&[900, 900], &catalog, &touched, &constraints);
    let keys = picked_keys(&result);
    assert_eq!(keys.len(), 2);
    // At most one of the two picks may carry the capped tag.
    let strings_count = result
        .iter()
        .filter_map(Selection::problem)
        .filter(|p| p.tags_lower().contains(&"strings".to_string()))
        .count();
    assert_eq!(strings_count, 1);
}

#[test]
fn test_tag_caps_match_case_insensitively() {
    let catalog = vec![
        problem(1, "A", 900, &["Strings"]),
        problem(2, "A", 900, &["STRINGS"]),
    ];
    let touched = TouchedSet::new();
    let mut constraints = Constraints::new(2000, 2030);
    constraints.tag_caps.insert("Strings".to_string(), 1);

    let result = run(&[900, 900], &catalog, &touched, &constraints);
    assert_eq!(result[1], Selection::Unsatisfiable { rating: 900 });
}

#[test]
fn test_distinct_tags_supersedes_tag_caps() {
    // With distinct_tags active a cap of 2 must not loosen the rule.
    let catalog = vec![
        problem(1, "A", 900, &["math"]),
        problem(2, "A", 900, &["math"]),
    ];
    let touched = TouchedSet::new();
    let mut constraints = Constraints::new(2000, 2030);
    constraints.distinct_tags = true;
    constraints.tag_caps.insert("math".to_string(), 2);

    let result = run(&[900, 900], &catalog, &touched, &constraints);
    assert_eq!(result[1], Selection::Unsatisfiable { rating: 900 });
}

#[test]
fn test_unrated_problem_never_matches() {
    let mut unrated = problem(1, "A", 900, &[]);
    unrated.rating = None;
    let catalog = vec![unrated];
    let touched = TouchedSet::new();
    let constraints = Constraints::new(2000, 2030);

    let result = run(&[900], &catalog, &touched, &constraints);
    assert_eq!(result[0], Selection::Unsatisfiable { rating: 900 });
}

#[test]
fn test_unsatisfiable_rating_does_not_abort_later_ratings() {
    let catalog = vec![problem(1, "A", 800, &[])];
    let touched = TouchedSet::new();
    let constraints = Constraints::new(2000, 2030);

    let result = run(&[2400, 800], &catalog, &touched, &constraints);
    assert_eq!(result[0], Selection::Unsatisfiable { rating: 2400 });
    assert!(result[1].problem().is_some());
}

#[test]
fn test_same_seed_is_deterministic() {
    let catalog: Vec<Problem> = (0..20)
        .map(|i| problem(100 + i, "A", 1100, &["dp"]))
        .collect();
    let touched = TouchedSet::new();
    let constraints = Constraints::new(2000, 2030);
    let engine = ExclusionEngine::new(&touched, &constraints);

    let mut rng_a = seeded_rng(Some(42));
    let mut rng_b = seeded_rng(Some(42));
    let a = select_problems(&[1100, 1100, 1100], &catalog, &engine, &constraints, &mut rng_a);
    let b = select_problems(&[1100, 1100, 1100], &catalog, &engine, &constraints, &mut rng_b);
    assert_eq!(a, b);
}

#[test]
fn test_different_seeds_draw_from_full_pool() {
    let catalog: Vec<Problem> = (0..50).map(|i| problem(100 + i, "A", 1100, &[])).collect();
    let touched = TouchedSet::new();
    let constraints = Constraints::new(2000, 2030);
    let engine = ExclusionEngine::new(&touched, &constraints);

    let mut seen = std::collections::HashSet::new();
    for seed in 0..20u64 {
        let mut rng = seeded_rng(Some(seed));
        let result = select_problems(&[1100], &catalog, &engine, &constraints, &mut rng);
        seen.insert(result[0].problem().unwrap().key.clone());
    }
    // 20 independent draws over 50 candidates should not collapse to one.
    assert!(seen.len() > 1);
}

#[test]
fn test_earlier_rating_consumes_candidate_first() {
    // Both positions want 1000; the first draw removes its pick from the
    // second draw's pool.
    let catalog = vec![
        problem(1, "A", 1000, &[]),
        problem(2, "A", 1000, &[]),
    ];
    let touched = TouchedSet::new();
    let constraints = Constraints::new(2000, 2030);

    let result = run(&[1000, 1000], &catalog, &touched, &constraints);
    let keys = picked_keys(&result);
    assert_eq!(keys.len(), 2);
    assert_ne!(keys[0], keys[1]);
}
