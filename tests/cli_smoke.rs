use assert_cmd::prelude::*;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

const TRENDS_HEADER: &str = "month,total_commits,unique_contributors,avg_commits_per_contributor";
const CONTRIBUTORS_HEADER: &str =
    "month,unique_contributors,total_commits,mean_commits_per_contributor";

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let mut f = File::create(&path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f.sync_all().unwrap();
    path
}

fn write_events(dir: &Path, commits: &str, prs: &str, issues: &str) {
    write_file(dir, "commits_2024.csv", commits);
    write_file(dir, "prs_2024.csv", prs);
    write_file(dir, "issues_2024.csv", issues);
}

fn actplot(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("actplot").unwrap();
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).unwrap()
}

fn column(v: &serde_json::Value, key: &str) -> Vec<u64> {
    v["buckets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b[key].as_u64().unwrap())
        .collect()
}

#[test]
fn weekly_json_aligns_sources_on_sunday_weeks() {
    let dir = tempdir().unwrap();
    write_events(dir.path(), "2024-01-01\n2024-01-03\n2024-01-10\n", "2024-01-02\n", "");

    let v = stdout_json(actplot(dir.path()).args(["weekly", "--json"]));

    let weeks: Vec<&str> = v["buckets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["week_ending"].as_str().unwrap())
        .collect();
    assert_eq!(weeks, vec!["2024-01-07", "2024-01-14"]);
    assert_eq!(column(&v, "commits"), vec![2, 1]);
    assert_eq!(column(&v, "prs"), vec![1, 0]);
    assert_eq!(column(&v, "issues"), vec![0, 0]);
    assert_eq!(v["week_ends_on"], "sunday");
}

#[test]
fn weekly_skips_malformed_timestamps() {
    let dir = tempdir().unwrap();
    write_events(
        dir.path(),
        "2024-01-01T09:00:00Z\nnot-a-date\n2024-01-02 10:30:00\n",
        "",
        "2024-01-04\n",
    );

    let v = stdout_json(actplot(dir.path()).args(["weekly", "--json"]));

    assert_eq!(column(&v, "commits"), vec![2]);
    assert_eq!(column(&v, "issues"), vec![1]);
    let commits_source = &v["sources"][0];
    assert_eq!(commits_source["kind"], "commits");
    assert_eq!(commits_source["events"], 2);
    assert_eq!(commits_source["dropped"], 1);
}

#[test]
fn weekly_since_filters_events() {
    let dir = tempdir().unwrap();
    write_events(dir.path(), "2023-12-20\n2024-01-03\n", "", "");

    let v = stdout_json(actplot(dir.path()).args(["--since", "2024-01-01", "weekly", "--json"]));
    assert_eq!(column(&v, "commits"), vec![1]);
    assert_eq!(v["since"], "2024-01-01");
}

#[test]
fn weekly_ndjson_emits_one_line_per_week() {
    let dir = tempdir().unwrap();
    write_events(dir.path(), "2024-01-01\n2024-01-15\n", "", "");

    let out = actplot(dir.path())
        .args(["weekly", "--ndjson"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let lines: Vec<&str> = std::str::from_utf8(&out).unwrap().lines().collect();
    // Two events two weeks apart leave a zero-filled week between them.
    assert_eq!(lines.len(), 3);
    let middle: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(middle["week_ending"], "2024-01-14");
    assert_eq!(middle["commits"], 0);
}

#[test]
fn weekly_without_terminal_prints_table() {
    let dir = tempdir().unwrap();
    write_events(dir.path(), "2024-01-01\n", "2024-01-02\n", "");

    let out = actplot(dir.path())
        .arg("weekly")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("2024-01-07"), "{text}");
}

#[test]
fn weekly_output_writes_image() {
    let dir = tempdir().unwrap();
    write_events(dir.path(), "2024-01-01\n2024-01-10\n", "2024-01-02\n", "2024-01-09\n");

    let out = actplot(dir.path())
        .args(["weekly", "--output", "charts/weekly.png", "--title", "GitHub Activity in 2024 (weekly)"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let image = dir.path().join("charts/weekly.png");
    assert!(fs::metadata(&image).unwrap().len() > 0);
    assert!(String::from_utf8(out).unwrap().contains("Plot saved to"));
}

#[test]
fn weekly_missing_source_fails() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "commits_2024.csv", "2024-01-01\n");

    actplot(dir.path()).args(["weekly", "--json"]).assert().failure();
}

#[test]
fn trends_writes_png_for_two_rows() {
    let dir = tempdir().unwrap();
    write_file(
        dir.path(),
        "final-report/average_commits_per_contributor.csv",
        &format!("{TRENDS_HEADER}\n2024-01,10,5,2.0\n2024-02,12,4,3.0\n"),
    );

    let out = actplot(dir.path())
        .args(["--width", "600", "--height", "480", "trends"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let image = dir.path().join("final-report/activity_trends.png");
    assert!(fs::metadata(&image).unwrap().len() > 0);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Plot saved to"));
    assert!(text.contains("activity_trends.png"));
}

#[test]
fn trends_output_is_idempotent() {
    let dir = tempdir().unwrap();
    let input = write_file(
        dir.path(),
        "monthly.csv",
        &format!("{TRENDS_HEADER}\n2024-02,12,4,3.0\n2024-01,10,5,2.0\n2024-03,9,3,3.0\n"),
    );

    let mut images = Vec::new();
    for name in ["first.png", "second.png"] {
        actplot(dir.path())
            .args(["--width", "400", "--height", "300", "trends", "--input"])
            .arg(&input)
            .args(["--output", name])
            .assert()
            .success();
        images.push(fs::read(dir.path().join(name)).unwrap());
    }
    assert!(!images[0].is_empty());
    assert_eq!(images[0], images[1]);
}

#[test]
fn trends_json_is_sorted_by_month() {
    let dir = tempdir().unwrap();
    let input = write_file(
        dir.path(),
        "monthly.csv",
        &format!("{TRENDS_HEADER}\n2024-03,9,3,3.0\n2023-11,4,2,2.0\n2024-01,10,5,2.0\n"),
    );

    let v = stdout_json(actplot(dir.path()).args(["trends", "--json", "--input"]).arg(&input));
    let months: Vec<&str> = v["records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["month"].as_str().unwrap())
        .collect();
    assert_eq!(months, vec!["2023-11-01", "2024-01-01", "2024-03-01"]);

    for r in v["records"].as_array().unwrap() {
        let total = r["total_commits"].as_f64().unwrap();
        let contributors = r["unique_contributors"].as_f64().unwrap();
        let avg = r["avg_commits_per_contributor"].as_f64().unwrap();
        assert!((total / contributors - avg).abs() < 1e-9);
    }
}

#[test]
fn trends_rejects_malformed_month() {
    let dir = tempdir().unwrap();
    let input = write_file(
        dir.path(),
        "monthly.csv",
        &format!("{TRENDS_HEADER}\n01/2024,10,5,2.0\n"),
    );

    actplot(dir.path())
        .args(["trends", "--input"])
        .arg(&input)
        .assert()
        .failure();
    assert!(!dir.path().join("final-report/activity_trends.png").exists());
}

#[test]
fn contributors_writes_svg_with_labels() {
    let dir = tempdir().unwrap();
    let input = write_file(
        dir.path(),
        "contributors.csv",
        &format!("{CONTRIBUTORS_HEADER}\n2024-01,5,10,2.0\n2024-02,4,12,3.0\n"),
    );

    actplot(dir.path())
        .args(["contributors", "--input"])
        .arg(&input)
        .args(["--output", "out/contributors.svg", "--max-labels", "4"])
        .assert()
        .success();

    let body = fs::read_to_string(dir.path().join("out/contributors.svg")).unwrap();
    assert!(body.contains("Mean Commits per Contributor"));
    assert!(body.contains("2024-02"));
}

#[test]
fn missing_monthly_input_fails() {
    let dir = tempdir().unwrap();
    actplot(dir.path()).arg("contributors").assert().failure();
}

#[test]
fn config_file_supplies_paths() {
    let dir = tempdir().unwrap();
    write_file(
        dir.path(),
        "data/monthly.csv",
        &format!("{TRENDS_HEADER}\n2024-01,10,5,2.0\n2024-02,12,4,3.0\n"),
    );
    write_file(
        dir.path(),
        "actplot.toml",
        "[trends]\ninput = \"data/monthly.csv\"\noutput = \"charts/trends.png\"\nwidth = 500\nheight = 400\n",
    );

    actplot(dir.path()).arg("trends").assert().success();
    assert!(dir.path().join("charts/trends.png").exists());
}

#[test]
fn inverted_date_range_fails() {
    let dir = tempdir().unwrap();
    write_events(dir.path(), "2024-01-01\n", "", "");

    actplot(dir.path())
        .args(["--since", "2024-02-01", "--until", "2024-01-01", "weekly", "--json"])
        .assert()
        .failure();
}

#[test]
fn weekly_until_date_covers_the_whole_day() {
    let dir = tempdir().unwrap();
    write_events(
        dir.path(),
        "2024-01-30T09:00:00Z\n2024-01-31T18:30:00Z\n2024-02-01T00:00:01Z\n",
        "",
        "",
    );

    let v = stdout_json(actplot(dir.path()).args(["--until", "2024-01-31", "weekly", "--json"]));
    assert_eq!(column(&v, "commits"), vec![2]);
}

#[test]
fn weekly_png_changes_with_title() {
    let dir = tempdir().unwrap();
    write_events(dir.path(), "2024-01-01\n2024-01-10\n", "2024-01-02\n", "");

    let mut images = Vec::new();
    for (name, title) in [("a.png", "A"), ("b.png", "Weekly commits")] {
        actplot(dir.path())
            .args(["--width", "500", "--height", "250", "weekly", "--output", name, "--title", title])
            .assert()
            .success();
        images.push(fs::read(dir.path().join(name)).unwrap());
    }
    assert!(!images[0].is_empty());
    assert_ne!(images[0], images[1]);
}

#[test]
fn contributors_default_png_is_written() {
    let dir = tempdir().unwrap();
    write_file(
        dir.path(),
        "final-report/monthly_contributor_metrics.csv",
        &format!("{CONTRIBUTORS_HEADER}\n2024-01,5,10,2.0\n2024-02,4,12,3.0\n"),
    );

    actplot(dir.path())
        .args(["--width", "600", "--height", "600", "contributors"])
        .assert()
        .success();
    let image = dir.path().join("final-report/contributor_metrics.png");
    assert!(fs::metadata(&image).unwrap().len() > 0);
}

const COMMIT_AUTHORS: &str = "\
author,date
alice,2024-01-03T10:00:00Z
alice,2024-01-20T10:00:00Z
bob,2024-01-31T23:00:00Z
carol,2024-01-15T12:00:00Z
bob,2024-02-10T08:00:00Z
,2024-02-11T08:00:00Z
";

#[test]
fn aggregate_writes_table_that_trends_reads() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "commit_authors.csv", COMMIT_AUTHORS);

    let out = actplot(dir.path())
        .arg("aggregate")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Metrics saved to"), "{text}");
    assert!(text.contains("Newcomer retention"), "{text}");

    let written = dir.path().join("final-report/average_commits_per_contributor.csv");
    let body = fs::read_to_string(&written).unwrap();
    assert!(body.starts_with(TRENDS_HEADER));
    assert!(body.contains("2024-01,4,3,1.33"), "{body}");
    assert!(body.contains("2024-02,1,1,1.00"), "{body}");

    let v = stdout_json(actplot(dir.path()).args(["trends", "--json"]));
    assert_eq!(v["records"].as_array().unwrap().len(), 2);
}

#[test]
fn aggregate_json_reports_retention_and_drops() {
    let dir = tempdir().unwrap();
    let input = write_file(dir.path(), "history.csv", COMMIT_AUTHORS);

    let v = stdout_json(actplot(dir.path()).args(["aggregate", "--json", "--commits"]).arg(&input));
    assert_eq!(v["commits"], 5);
    assert_eq!(v["dropped"], 1);
    assert_eq!(v["retention"]["contributors"], 3);
    assert_eq!(v["retention"]["returning"], 2);
    assert_eq!(v["last_commit"], "2024-02-10T08:00:00Z");
    assert!(!dir.path().join("final-report").exists());
}

#[test]
fn states_counts_pull_requests_and_issues() {
    let dir = tempdir().unwrap();
    let prs = write_file(
        dir.path(),
        "pr_states.csv",
        "state,merged_at\nopen,\nclosed,\nclosed,2024-03-01T12:00:00Z\nclosed,2024-03-02T12:00:00Z\n",
    );
    let issues = write_file(dir.path(), "issue_states.csv", "state\nopen\nclosed\nclosed\n");

    let v = stdout_json(
        actplot(dir.path())
            .args(["states", "--json", "--prs"])
            .arg(&prs)
            .arg("--issues")
            .arg(&issues),
    );
    assert_eq!(v["pull_requests"]["open"], 1);
    assert_eq!(v["pull_requests"]["closed"], 1);
    assert_eq!(v["pull_requests"]["merged"], 2);
    assert_eq!(v["issues"]["open"], 1);
    assert_eq!(v["issues"]["closed"], 2);
}

#[test]
fn states_without_inputs_fails() {
    let dir = tempdir().unwrap();
    actplot(dir.path()).arg("states").assert().failure();
}
