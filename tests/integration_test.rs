// tests/integration_test.rs
mod common;

use common::{system_git_available, Fixture};
use std::process::Command;
use tag_bump::cli::{
    run_bump_workflow, run_retag_workflow, PackageOutcome, RetagConfig, RunConfig,
    WorkflowSettings,
};
use tag_bump::domain::TagPattern;
use tag_bump::git::{Git2Repository, SystemGit, TagRepository};

fn settings(fixture: &Fixture) -> WorkflowSettings {
    WorkflowSettings {
        packages_root: fixture.packages_root(),
        pattern: TagPattern::new("ns").unwrap(),
        remote: "origin".to_string(),
        dry_run: false,
    }
}

fn run_all_minor<R: TagRepository>(repo: &R) {
    let fixture = Fixture::new(&["libA", "libB"]);
    fixture.seed_remote_tag("ns/libA@1.0.0");
    assert!(!fixture.local_has_tag("ns/libA@1.0.0"));

    let run = RunConfig::from_positional(Some("minor"), None, None).unwrap();
    let summary = run_bump_workflow(&run, &settings(&fixture), repo).unwrap();

    assert_eq!(summary.published_tags(), vec!["ns/libA@1.1.0"]);
    assert!(summary.outcomes.contains(&PackageOutcome::NoValidTag {
        package: "libB".to_string()
    }));
    assert!(fixture.local_has_tag("ns/libA@1.1.0"));
    assert!(fixture.remote_has_tag("ns/libA@1.1.0"));
    assert!(!fixture.remote_has_tag("ns/libB@0.0.1"));
}

#[test]
fn test_end_to_end_all_packages_git2() {
    run_all_minor(&Git2Repository::new());
}

#[test]
fn test_end_to_end_all_packages_system_git() {
    if !system_git_available() {
        eprintln!("git not on PATH, skipping");
        return;
    }
    run_all_minor(&SystemGit::new());
}

#[test]
fn test_single_package_major_git2() {
    let fixture = Fixture::new(&["libA", "libB"]);
    fixture.seed_remote_tag("ns/libA@2.3.4");
    fixture.seed_remote_tag("ns/libB@0.1.0");

    let run = RunConfig::from_positional(Some("major"), Some("libA"), None).unwrap();
    let summary = run_bump_workflow(&run, &settings(&fixture), &Git2Repository::new()).unwrap();

    assert_eq!(summary.published_tags(), vec!["ns/libA@3.0.0"]);
    assert!(fixture.remote_has_tag("ns/libA@3.0.0"));
    assert!(!fixture.remote_has_tag("ns/libB@1.0.0"));
}

#[test]
fn test_prerelease_bump_git2() {
    let fixture = Fixture::new(&["libA"]);
    fixture.seed_remote_tag("ns/libA@1.1.0");
    fixture.seed_remote_tag("ns/libA@1.2.0-alpha.3");

    let run = RunConfig::from_positional(Some("patch"), None, Some("TRUE")).unwrap();
    let summary = run_bump_workflow(&run, &settings(&fixture), &Git2Repository::new()).unwrap();

    assert_eq!(summary.published_tags(), vec!["ns/libA@1.2.0-alpha.4"]);
}

#[test]
fn test_missing_remote_is_soft_failure_git2() {
    let fixture = Fixture::new(&["libA"]);
    let mut settings = settings(&fixture);
    settings.remote = "nowhere".to_string();

    let summary =
        run_bump_workflow(&RunConfig::default(), &settings, &Git2Repository::new()).unwrap();

    assert_eq!(summary.no_tag_count(), 1);
    assert!(summary.published_tags().is_empty());
}

#[test]
fn test_system_git_orders_prereleases_by_semver() {
    if !system_git_available() {
        eprintln!("git not on PATH, skipping");
        return;
    }
    let fixture = Fixture::new(&["libA"]);
    for tag in [
        "ns/libA@1.9.0",
        "ns/libA@1.10.0-rc.1",
        "ns/libA@1.10.0",
        "ns/libA@1.10.0-rc.10",
    ] {
        fixture.seed_remote_tag(tag);
    }

    let git = SystemGit::new();
    let package = fixture.packages_root().join("libA");
    git.fetch_tags(&package, "origin").unwrap();

    assert_eq!(
        git.list_tags_descending(&package).unwrap(),
        vec![
            "ns/libA@1.10.0",
            "ns/libA@1.10.0-rc.10",
            "ns/libA@1.10.0-rc.1",
            "ns/libA@1.9.0",
        ]
    );
}

#[test]
fn test_system_git_prerelease_counter_bump() {
    if !system_git_available() {
        eprintln!("git not on PATH, skipping");
        return;
    }
    let fixture = Fixture::new(&["libA"]);
    for tag in ["ns/libA@2.0.0-rc.9", "ns/libA@2.0.0-rc.10", "ns/libA@2.0.0-rc.2"] {
        fixture.seed_remote_tag(tag);
    }

    let run = RunConfig::from_positional(Some("minor"), None, Some("true")).unwrap();
    let summary = run_bump_workflow(&run, &settings(&fixture), &SystemGit::new()).unwrap();

    assert_eq!(summary.published_tags(), vec!["ns/libA@2.0.0-rc.11"]);
    assert!(fixture.remote_has_tag("ns/libA@2.0.0-rc.11"));
}

// ---------------------------------------------------------------------------
// Retag
// ---------------------------------------------------------------------------

/// Tags on the first two commits, then a third commit standing in for the
/// rewritten one; moving tags that contain HEAD~1 must leave the first alone.
fn run_retag<R: TagRepository>(repo: &R) {
    let fixture = Fixture::new(&["libA", "libB"]);
    let first = fixture.head_id();
    fixture.seed_remote_tag("ns/libA@1.0.0");

    let second = fixture.commit("feat: second");
    fixture.seed_remote_tag("ns/libA@1.1.0");
    fixture.seed_remote_tag("ns/libB@0.3.0");
    fixture.seed_remote_tag("nightly");

    let third = fixture.commit("chore(release): squashed");

    let retag = RetagConfig {
        from: "HEAD~1".to_string(),
        to: "HEAD".to_string(),
        package_name: None,
    };
    let summary = run_retag_workflow(&retag, &settings(&fixture), repo).unwrap();

    assert_eq!(summary.moved_count(), 2);
    assert!(!summary.has_failures());
    assert_eq!(fixture.remote_tag_target("ns/libA@1.1.0"), Some(third));
    assert_eq!(fixture.remote_tag_target("ns/libB@0.3.0"), Some(third));
    assert_eq!(fixture.remote_tag_target("ns/libA@1.0.0"), Some(first));
    assert_eq!(fixture.remote_tag_target("nightly"), Some(second));
}

#[test]
fn test_retag_git2() {
    run_retag(&Git2Repository::new());
}

#[test]
fn test_retag_system_git() {
    if !system_git_available() {
        eprintln!("git not on PATH, skipping");
        return;
    }
    run_retag(&SystemGit::new());
}

// ---------------------------------------------------------------------------
// Binary
// ---------------------------------------------------------------------------

fn tag_bump(fixture: &Fixture, args: &[&str]) -> std::process::Output {
    let config_path = fixture.dir.path().join("tagbump.toml");
    std::fs::write(
        &config_path,
        format!(
            "namespace = \"ns\"\npackages_root = {:?}\nbackend = \"git2\"\n",
            fixture.packages_root().to_string_lossy()
        ),
    )
    .unwrap();

    Command::new(env!("CARGO_BIN_EXE_tag-bump"))
        .current_dir(fixture.work_path())
        .arg("--config")
        .arg(&config_path)
        .args(args)
        .output()
        .expect("Failed to execute tag-bump")
}

#[test]
fn test_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_tag-bump"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("tag-bump"));
    assert!(stdout.contains("RELEASE_LEVEL"));
}

#[test]
fn test_invalid_release_level_is_rejected_before_tagging() {
    let fixture = Fixture::new(&["libA"]);
    fixture.seed_remote_tag("ns/libA@1.0.0");

    let output = tag_bump(&fixture, &["gigantic"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown release level 'gigantic'"));
    assert!(!fixture.local_has_tag("ns/libA@1.0.1"));
}

#[test]
fn test_dry_run_prints_plan_and_creates_nothing() {
    let fixture = Fixture::new(&["libA"]);
    fixture.seed_remote_tag("ns/libA@1.0.0");

    let output = tag_bump(&fixture, &["minor", "--dry-run"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("would be tagged ns/libA@1.1.0"), "{}", stdout);
    assert!(!fixture.local_has_tag("ns/libA@1.1.0"));
    assert!(!fixture.remote_has_tag("ns/libA@1.1.0"));
}

#[test]
fn test_partial_failure_exit_code() {
    let fixture = Fixture::new(&["libA", "libB"]);
    fixture.seed_remote_tag("ns/libA@1.0.0");

    let lenient = tag_bump(&fixture, &["patch"]);
    assert!(lenient.status.success());
    let stdout = String::from_utf8_lossy(&lenient.stdout);
    assert!(stdout.contains("No valid tag found for package"), "{}", stdout);
    assert!(fixture.remote_has_tag("ns/libA@1.0.1"));

    let strict = tag_bump(&fixture, &["patch", "--strict"]);
    assert_eq!(strict.status.code(), Some(1));
    assert!(fixture.remote_has_tag("ns/libA@1.0.2"));
}

#[test]
fn test_retag_flag_moves_tags() {
    let fixture = Fixture::new(&["libA"]);
    fixture.seed_remote_tag("ns/libA@1.0.0");
    let third = fixture.commit("chore(release): squashed");

    let output = tag_bump(&fixture, &["--retag", "HEAD~1"]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Moved ns/libA@1.0.0 to HEAD"), "{}", stdout);
    assert_eq!(fixture.remote_tag_target("ns/libA@1.0.0"), Some(third));
}
