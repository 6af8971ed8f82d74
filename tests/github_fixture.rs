// tests/github_fixture.rs
// GitHub search response parsing against a canned page.

use research_scout::fetch::github::{parse_page, GithubFetcher};

const PAGE: &str = include_str!("fixtures/github_search.json");

#[test]
fn page_parses_into_repo_records() {
    let repos = parse_page(PAGE).unwrap();
    assert_eq!(repos.len(), 3);
    assert_eq!(repos[0].full_name, "rust-lang/rust");
    assert_eq!(repos[0].stars, 100000);
    assert_eq!(repos[0].language.as_deref(), Some("Rust"));
    // null description and language survive as None
    assert_eq!(repos[1].description, None);
    assert_eq!(repos[1].language, None);
}

#[tokio::test]
async fn fixture_fetch_respects_max_results() {
    let fetcher = GithubFetcher::from_fixture(PAGE);
    let repos = fetcher.fetch(2, "", "").await.unwrap();
    assert_eq!(repos.len(), 2);
    assert_eq!(repos[1].full_name, "octocat/Hello-World");
}
