//! Smoke test against the live GitHub API.
//!
//! Unauthenticated requests are rate limited; set `GITHUB_TOKEN` to raise the
//! limit. Run with:
//! ```sh
//! cargo test --test smoke_test -- --ignored --nocapture
//! ```

use github_activity_sdk::presentation::bar_chart;
use github_activity_sdk::{FailureKind, GithubActivitySdk};

fn sdk() -> GithubActivitySdk {
    GithubActivitySdk::builder().token_from_env(true).build().unwrap()
}

#[test]
#[ignore]
fn smoke_test() {
    let sdk = sdk();

    let repos = sdk.repos().list("octocat").unwrap();
    eprintln!("octocat has {} public repositories", repos.len());
    assert!(!repos.is_empty());
    assert!(repos.len() <= 100);

    let report = sdk.activity().report("octocat");
    eprintln!(
        "selected={:?} days={} pending={:?} losses={}",
        report.selected,
        report.series.len(),
        report.pending,
        report.losses.len()
    );
    assert!(report.selected.len() <= 5);
    assert!(report.series.points().windows(2).all(|w| w[0].date < w[1].date));
    assert!(bar_chart(&report.series).len() <= 90);

    for probe in sdk.activity().probe("octocat", 3).unwrap() {
        eprintln!(
            "  {}: status={:?} weeks={} error={:?}",
            probe.repository, probe.status, probe.weeks, probe.error
        );
    }
}

#[test]
#[ignore]
fn smoke_unknown_user() {
    let err = sdk()
        .repos()
        .list("this-user-should-not-exist-0f9c2b7e")
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::NotFound);
}
