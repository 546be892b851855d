use super::*;

fn parse(raw: &str) -> Result<RunConfig> {
    let mut config: RunConfig = toml::from_str(raw)?;
    config.validate()?;
    Ok(config)
}

const MINIMAL: &str = r#"
handles = ["alice", "bob"]
ratings = [800, 1200, 1200]
year_min = 2018
year_max = 2024
"#;

#[test]
fn test_minimal_config_gets_defaults() {
    let config = parse(MINIMAL).unwrap();
    assert_eq!(config.handles, vec!["alice", "bob"]);
    assert_eq!(config.ratings, vec![800, 1200, 1200]);
    assert!(!config.distinct_contest);
    assert!(!config.distinct_tags);
    assert!(config.tag_caps.is_empty());
    assert_eq!(config.seed, None);

    assert_eq!(config.network.api_hosts.len(), 2);
    assert_eq!(config.network.min_interval_ms, 2200);
    assert_eq!(config.network.timeout_secs, 45);
    assert_eq!(config.network.page_size, 500);
    assert_eq!(config.network.max_pages_per_user, None);
    assert!(config.network.user_agent.starts_with("cf-picker/"));
}

#[test]
fn test_full_config_round_trip() {
    let config = parse(
        r#"
handles = ["alice"]
ratings = [900]
year_min = 2020
year_max = 2023
distinct_contest = true
distinct_tags = true
seed = 17
tag_caps = { strings = 2, "dp" = 1 }
exclude_contest_name_patterns = ["Kotlin", "April Fools"]
exclude_contest_ids = [1331, 1505]

[network]
api_hosts = ["https://mirror.example/api/"]
min_interval_ms = 500
timeout_secs = 10
page_size = 200
max_pages_per_user = 3
user_agent = "custom/1.0"
cookie_file = "cookies.txt"
"#,
    )
    .unwrap();

    assert!(config.distinct_contest);
    assert_eq!(config.seed, Some(17));
    assert_eq!(config.tag_caps["strings"], 2);
    assert_eq!(config.exclude_contest_ids, vec![1331, 1505]);
    // Trailing slash trimmed so URL joining stays clean.
    assert_eq!(config.network.api_hosts, vec!["https://mirror.example/api"]);
    assert_eq!(config.network.max_pages_per_user, Some(3));
    assert_eq!(config.network.user_agent, "custom/1.0");
    assert_eq!(
        config.network.cookie_file.as_deref(),
        Some(std::path::Path::new("cookies.txt"))
    );
}

#[test]
fn test_blank_handles_are_dropped_then_required() {
    let err = parse(
        r#"
handles = ["  ", ""]
ratings = [800]
year_min = 2020
year_max = 2021
"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("handles"));
}

#[test]
fn test_empty_ratings_rejected() {
    let err = parse(
        r#"
handles = ["a"]
ratings = []
year_min = 2020
year_max = 2021
"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("ratings"));
}

#[test]
fn test_zero_rating_rejected() {
    let err = parse(
        r#"
handles = ["a"]
ratings = [0]
year_min = 2020
year_max = 2021
"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("positive"));
}

#[test]
fn test_inverted_year_bounds_rejected() {
    let err = parse(
        r#"
handles = ["a"]
ratings = [800]
year_min = 2022
year_max = 2021
"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("year_min"));
}

#[test]
fn test_zero_tag_cap_rejected() {
    let err = parse(
        r#"
handles = ["a"]
ratings = [800]
year_min = 2020
year_max = 2021
tag_caps = { strings = 0 }
"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("tag_caps['strings']"));
}

#[test]
fn test_page_size_clamped_and_timeout_floored() {
    let config = parse(
        r#"
handles = ["a"]
ratings = [800]
year_min = 2020
year_max = 2021

[network]
page_size = 5
timeout_secs = 1
"#,
    )
    .unwrap();
    assert_eq!(config.network.page_size, 100);
    assert_eq!(config.network.timeout_secs, 5);

    let config = parse(
        r#"
handles = ["a"]
ratings = [800]
year_min = 2020
year_max = 2021

[network]
page_size = 4000
"#,
    )
    .unwrap();
    assert_eq!(config.network.page_size, 1000);
}

#[test]
fn test_load_reads_file_and_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cfp.toml");
    std::fs::write(&path, MINIMAL).unwrap();
    assert!(RunConfig::load(&path).is_ok());

    let missing = dir.path().join("absent.toml");
    let err = RunConfig::load(&missing).unwrap_err();
    assert!(format!("{err:#}").contains("absent.toml"));
}
