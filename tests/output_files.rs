// tests/output_files.rs
// End-to-end persistence: fixture fetch -> summarize -> three JSON documents
// with agent_summary always present on the wire.

use research_scout::fetch::{arxiv::ArxivFetcher, github::GithubFetcher};
use research_scout::{output, Agent, BackendSelector};

#[tokio::test]
async fn envelope_round_trips_through_disk() {
    let papers = ArxivFetcher::from_fixture(include_str!("fixtures/arxiv_atom.xml"))
        .fetch(10, "", None)
        .await
        .unwrap();
    let repos = GithubFetcher::from_fixture(include_str!("fixtures/github_search.json"))
        .fetch(10, "", "")
        .await
        .unwrap();

    let agent = Agent::with_selector(BackendSelector::disabled());
    let envelope = agent.summarize_all(papers, repos).await;
    assert_eq!(envelope.meta.arxiv_count, 2);
    assert_eq!(envelope.meta.github_count, 3);

    let dir = tempfile::tempdir().unwrap();
    let stamp = output::utc_stamp();
    let (arxiv_path, github_path, meta_path) =
        output::save_envelope(dir.path(), &stamp, &envelope).unwrap();

    assert!(arxiv_path
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with(&stamp));

    let papers_json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&arxiv_path).unwrap()).unwrap();
    let papers_arr = papers_json.as_array().unwrap();
    assert_eq!(papers_arr.len(), 2);
    for p in papers_arr {
        // flattened record plus a non-empty agent_summary string
        assert!(p["agent_summary"].as_str().is_some_and(|s| !s.is_empty()));
        assert!(p["abstract"].is_string());
        assert!(p["title"].is_string());
    }

    let repos_json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&github_path).unwrap()).unwrap();
    for r in repos_json.as_array().unwrap() {
        assert!(r["agent_summary"].as_str().is_some_and(|s| !s.is_empty()));
    }

    let meta_json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&meta_path).unwrap()).unwrap();
    assert_eq!(meta_json["arxiv_count"], 2);
    assert_eq!(meta_json["github_count"], 3);
    assert!(meta_json["elapsed_secs"].as_f64().unwrap() >= 0.0);
}

#[test]
fn utc_stamp_is_filesystem_safe() {
    let stamp = output::utc_stamp();
    assert!(stamp.ends_with('Z'));
    assert!(!stamp.contains(':'));
}
