//! End-to-end build over a fixture raw data root and notes vault

use std::path::Path;

use sitebuild_core::SiteConfig;
use sitebuild_runtime::{Builder, PassOutcome};
use tempfile::TempDir;

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn read_yaml(path: &Path) -> serde_yaml::Value {
    serde_yaml::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

fn fixture() -> (TempDir, SiteConfig) {
    let dir = TempDir::new().unwrap();
    let raw = dir.path().join("raw");
    let notes = dir.path().join("vault");

    write(
        &raw.join("2024/05/goodreads_20240501.json"),
        r#"{"books": [
            {"title": "Rayuela", "authors": [{"name": "Julio Cortázar"}], "current_page": 50, "total_pages": 200},
            {"name": "Ficciones"}
        ]}"#,
    );
    write(
        &raw.join("coursera.json"),
        r#"[{"course_name": "ML", "progress": "85%"}]"#,
    );
    write(
        &raw.join("upso.json"),
        r#"{"materias": [
            {"nombre": "Álgebra", "estado": "En curso"},
            {"nombre": "Física", "estado": "Aprobada"}
        ]}"#,
    );
    write(
        &raw.join("github_daily.json"),
        r#"{"events": [{"repo": "site", "commits": 4}, {"repo": "tracker"}]}"#,
    );
    write(
        &raw.join("linkedin.json"),
        r#"{"headline": "Backend dev", "summary": "Hola.", "experience": [
            {"role": "Dev", "company": "Acme", "start_date": "2020", "description": "APIs"}
        ]}"#,
    );
    write(
        &notes.join("viaje.md"),
        "---\nstatus: publicar\ntitle: Viaje al sur\ndate: 2024-03-01\n---\nTexto.\n",
    );
    write(&notes.join("draft.md"), "---\nstatus: idea\n---\n");

    let config = SiteConfig::new(raw, notes, dir.path().join("site"));
    (dir, config)
}

#[test]
fn test_full_build_writes_every_output() {
    let (_dir, config) = fixture();

    let report = Builder::new(config.clone()).run().unwrap();
    assert!(report.is_success(), "failed: {:?}", report.failed());
    assert_eq!(report.passes.len(), 5);
    assert!(
        report
            .passes
            .iter()
            .all(|p| matches!(p.result, Ok(PassOutcome::Written { .. })))
    );

    let reading = read_yaml(&config.data_file("reading.yml"));
    let expected: serde_yaml::Value = serde_yaml::from_str(
        "- titulo: Rayuela\n  author: Julio Cortázar\n  progress: '25'\n\
         - titulo: Ficciones\n  author: Autor desconocido\n",
    )
    .unwrap();
    assert_eq!(reading, expected);

    let studies = read_yaml(&config.data_file("studies.yml"));
    let expected: serde_yaml::Value = serde_yaml::from_str(
        "coursera:\n- title: ML\n  percent: 85\nupso:\n  en_curso:\n  - nombre: Álgebra\n    estado: En curso\n",
    )
    .unwrap();
    assert_eq!(studies, expected);

    assert_eq!(
        std::fs::read_to_string(config.data_file("work.yml")).unwrap(),
        "commits: 5\nrepos: 2\n"
    );

    let about = std::fs::read_to_string(config.cv_file()).unwrap();
    assert!(about.contains("**Backend dev**"));
    assert!(about.contains("- **Dev - en Acme (2020 - Actualidad)**"));

    assert!(config.logs_dir().join("2024-03-01-viaje-al-sur.md").is_file());
    assert_eq!(std::fs::read_dir(config.logs_dir()).unwrap().count(), 1);

    let meta = read_yaml(&config.data_file("meta.yml"));
    assert_eq!(meta["last_update"].as_str(), Some(report.last_update.as_str()));
}

#[test]
fn test_absent_exports_only_write_studies_and_meta() {
    let dir = TempDir::new().unwrap();
    let raw = dir.path().join("raw");
    std::fs::create_dir_all(&raw).unwrap();
    let config = SiteConfig::new(raw, dir.path().join("vault"), dir.path().join("site"));

    let report = Builder::new(config.clone()).run().unwrap();
    assert!(report.is_success());

    let mut written: Vec<String> = std::fs::read_dir(config.data_dir())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    written.sort();
    assert_eq!(written, ["meta.yml", "studies.yml"]);
    assert!(!config.cv_file().exists());
}

#[test]
fn test_missing_raw_root_fails_without_writing() {
    let dir = TempDir::new().unwrap();
    let config = SiteConfig::new(
        dir.path().join("nope"),
        dir.path().join("vault"),
        dir.path().join("site"),
    );

    let err = Builder::new(config).run().unwrap_err();
    assert!(err.to_string().contains("nope"));
    assert!(!dir.path().join("site").exists());
}
