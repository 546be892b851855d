use anyhow::Result;
use cfp_core::Selection;
use serde_json::json;

/// Human-readable listing, one line per requested rating.
pub fn render_text(ratings: &[u32], picks: &[Selection]) -> String {
    let picked = picks.iter().filter(|s| s.problem().is_some()).count();
    let mut out = format!("Selected {picked} of {} problem(s):\n", ratings.len());
    for (rating, pick) in ratings.iter().zip(picks) {
        match pick.problem() {
            Some(p) => {
                out.push_str(&format!("- [{rating}] {} — {} — {}\n", p.key, p.name, p.url()));
            }
            None => {
                out.push_str(&format!(
                    "- [{rating}] no eligible problem under the active constraints\n"
                ));
            }
        }
    }
    out
}

/// Machine-readable listing in the same order.
pub fn render_json(ratings: &[u32], picks: &[Selection]) -> Result<String> {
    let entries: Vec<_> = ratings
        .iter()
        .zip(picks)
        .map(|(rating, pick)| match pick.problem() {
            Some(p) => json!({
                "rating": rating,
                "problem": {
                    "contest_id": p.key.contest_id,
                    "index": p.key.index,
                    "name": p.name,
                    "url": p.url(),
                },
            }),
            None => json!({
                "rating": rating,
                "problem": null,
            }),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}
