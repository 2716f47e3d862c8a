use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_missing_raw_data_fails_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let site = dir.path().join("site");

    cargo_bin_cmd!("sitebuild")
        .env_remove("TRACKER_RAW_DATA")
        .env_remove("OBSIDIAN_NOTES_PATH")
        .env_remove("SITE_DIR")
        .args(["--raw-data", dir.path().join("missing").to_str().unwrap()])
        .args(["--notes", dir.path().join("vault").to_str().unwrap()])
        .args(["--site-dir", site.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("raw data directory does not exist"));

    assert!(!site.exists(), "nothing should be written");
}

#[test]
fn test_build_from_env() {
    let dir = tempfile::tempdir().unwrap();
    let raw = dir.path().join("raw");
    let vault = dir.path().join("vault");
    let site = dir.path().join("site");
    std::fs::create_dir_all(&raw).unwrap();
    std::fs::create_dir_all(&vault).unwrap();

    std::fs::write(
        raw.join("goodreads_2024.json"),
        r#"[{"title": "Dune", "author": "F. Herbert", "percent": 42}]"#,
    )
    .unwrap();
    std::fs::write(
        raw.join("github_daily_2024.json"),
        r#"[{"repo": "a", "commits": 3}]"#,
    )
    .unwrap();
    std::fs::write(raw.join("linkedin.json"), r#"{"headline": "Dev"}"#).unwrap();
    std::fs::write(
        vault.join("nota.md"),
        "---\nstatus: publicar\ntitle: Nota\ndate: 2024-01-15\n---\nHola\n",
    )
    .unwrap();

    cargo_bin_cmd!("sitebuild")
        .env("TRACKER_RAW_DATA", &raw)
        .env("OBSIDIAN_NOTES_PATH", &vault)
        .env("SITE_DIR", &site)
        .assert()
        .success();

    // Data files
    for name in ["reading.yml", "studies.yml", "work.yml", "meta.yml"] {
        assert!(site.join("_data").join(name).exists(), "{name} should exist");
    }
    let reading: serde_yaml::Value =
        serde_yaml::from_str(&std::fs::read_to_string(site.join("_data/reading.yml")).unwrap())
            .unwrap();
    assert_eq!(reading[0]["titulo"].as_str(), Some("Dune"));
    assert_eq!(reading[0]["progress"].as_str(), Some("42"));

    // About page and logs
    let about = std::fs::read_to_string(site.join("about.md")).unwrap();
    assert!(about.contains("**Dev**"));
    let log = std::fs::read_to_string(site.join("_logs/2024-01-15-nota.md")).unwrap();
    assert!(log.contains("slug: nota"));
    assert!(!log.contains("status"));
}

#[test]
fn test_flags_override_env() {
    let dir = tempfile::tempdir().unwrap();
    let raw = dir.path().join("raw");
    let site = dir.path().join("site");
    std::fs::create_dir_all(&raw).unwrap();

    cargo_bin_cmd!("sitebuild")
        .env("TRACKER_RAW_DATA", dir.path().join("missing"))
        .env("OBSIDIAN_NOTES_PATH", dir.path().join("vault"))
        .env("SITE_DIR", dir.path().join("elsewhere"))
        .args(["--raw-data", raw.to_str().unwrap()])
        .args(["--site-dir", site.to_str().unwrap()])
        .assert()
        .success();

    assert!(site.join("_data/studies.yml").exists());
    assert!(!dir.path().join("elsewhere").exists());
}
