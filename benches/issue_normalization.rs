use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use timed::adapters::trackers::{normalize_github, normalize_redmine, GitHubIssue, RedmineIssueList};
use timed::domain::models::{Project, TrackerType};

const ISSUE_COUNT: usize = 500;

fn github_body() -> String {
    let issues: Vec<String> = (1..=ISSUE_COUNT)
        .map(|id| {
            let state = if id % 3 == 0 { "closed" } else { "open" };
            format!(r#"{{"id": {id}, "title": "Issue number {id}", "state": "{state}", "labels": []}}"#)
        })
        .collect();
    format!("[{}]", issues.join(","))
}

fn redmine_body() -> String {
    let issues: Vec<String> = (1..=ISSUE_COUNT)
        .map(|id| format!(r#"{{"id": {id}, "subject": "Ticket {id}", "status": {{"id": 1, "name": "IN PROGRESS"}}}}"#))
        .collect();
    format!(r#"{{"issues": [{}], "total_count": {ISSUE_COUNT}}}"#, issues.join(","))
}

fn bench_github(c: &mut Criterion) {
    let body = github_body();
    let project = Project::new("Timed", 1).with_tracker(TrackerType::GitHub, "adfinis/timed", "key");
    let issue_url = "https://github.com/{tracker_name}/issues/{issue_id}";

    c.bench_function("trackers.github.parse_and_normalize", |b| {
        b.iter(|| {
            let issues: Vec<GitHubIssue> = serde_json::from_str(black_box(&body)).unwrap();
            normalize_github(issues, issue_url, &project)
        });
    });

    let parsed: Vec<GitHubIssue> = serde_json::from_str(&body).unwrap();
    c.bench_function("trackers.github.normalize", |b| {
        b.iter_batched(
            || parsed.clone(),
            |issues| normalize_github(issues, issue_url, &project),
            BatchSize::SmallInput,
        );
    });
}

fn bench_redmine(c: &mut Criterion) {
    let body = redmine_body();
    let project = Project::new("Timed", 1).with_tracker(TrackerType::Redmine, "timed", "key");
    let issue_url = "https://redmine.example.com/issues/{issue_id}";

    c.bench_function("trackers.redmine.parse_and_normalize", |b| {
        b.iter(|| {
            let list: RedmineIssueList = serde_json::from_str(black_box(&body)).unwrap();
            normalize_redmine(list.issues, issue_url, &project)
        });
    });
}

criterion_group!(benches, bench_github, bench_redmine);
criterion_main!(benches);
