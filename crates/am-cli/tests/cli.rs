use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const LAB: &str = r#"{
  "id": "lab-1",
  "courseCode": "ENG6",
  "title": "Lab 1",
  "dueDate": "2025-05-02",
  "dueTime": "17:00",
  "preamble": "Show your work.",
  "problems": [
    {
      "name": "Kinematics",
      "subsections": [
        { "name": "Derive", "points": 3, "submissionType": "Text" },
        { "name": "Plot", "points": 4, "submissionType": "Image", "maxImages": 2 }
      ]
    },
    { "name": "Reflection", "subsections": [] }
  ]
}"#;

fn cli(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("assignment-maker").expect("bin");
    cmd.current_dir(dir.path())
        .arg("--no-color")
        .arg("--store-dir")
        .arg(dir.path().join("store"));
    cmd
}

fn import_lab(dir: &TempDir) {
    let file = dir.path().join("lab.json");
    fs::write(&file, LAB).unwrap();
    cli(dir)
        .args(["import", "--on-conflict", "copy"])
        .arg(&file)
        .assert()
        .success();
}

fn list_json(dir: &TempDir) -> Vec<serde_json::Value> {
    let output = cli(dir).args(["list", "--json"]).output().unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

fn zip_files(dir: &Path) -> Vec<String> {
    fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".zip"))
        .collect()
}

#[test]
fn help_lists_commands() {
    Command::cargo_bin("assignment-maker")
        .expect("bin")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("move-problem"));
}

#[test]
fn list_on_empty_store() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No assignments found"));
}

#[test]
fn example_is_listed() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .arg("example")
        .assert()
        .success()
        .stdout(predicate::str::contains("Example assignment loaded!"));

    cli(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("ENG6"));
}

#[test]
fn import_then_show() {
    let dir = TempDir::new().unwrap();
    import_lab(&dir);

    cli(&dir)
        .args(["show", "lab-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total points: 7"))
        .stdout(predicate::str::contains("(b) Plot [4 pts]"));
}

#[test]
fn import_conflict_as_copy() {
    let dir = TempDir::new().unwrap();
    import_lab(&dir);
    import_lab(&dir);

    let titles: Vec<String> = list_json(&dir)
        .iter()
        .map(|a| a["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles.len(), 2);
    assert!(titles.contains(&"Lab 1".to_string()));
    assert!(titles.contains(&"Lab 1 (Copy)".to_string()));
}

#[test]
fn import_conflict_overwrite() {
    let dir = TempDir::new().unwrap();
    import_lab(&dir);

    let file = dir.path().join("lab.json");
    fs::write(&file, LAB.replace("\"Lab 1\"", "\"Lab 1 revised\"")).unwrap();
    cli(&dir)
        .args(["import", "--on-conflict", "overwrite"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("replaced existing"));

    let all = list_json(&dir);
    assert_eq!(all.len(), 1);
    assert_eq!(all[0]["title"], "Lab 1 revised");
}

#[test]
fn invalid_import_is_rejected() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("bad.json");
    fs::write(&file, r#"{"title": "No id", "problems": []}"#).unwrap();

    cli(&dir)
        .arg("import")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required field 'id'"));

    assert!(list_json(&dir).is_empty());
}

#[test]
fn new_requires_due_date() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .args(["new", "--course", "ENG6", "--title", "Lab 2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Due Date"));

    cli(&dir)
        .args(["new", "--course", "ENG6", "--title", "Lab 2", "--due-date", "2025-06-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created ENG6 Lab 2"));
}

#[test]
fn new_from_template() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("lab.json");
    fs::write(&file, LAB).unwrap();

    cli(&dir)
        .args(["new", "--from-template"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Lab 1 (Template)"));

    let all = list_json(&dir);
    assert_eq!(all.len(), 1);
    assert_ne!(all[0]["id"], "lab-1");
}

#[test]
fn duplicate_and_delete() {
    let dir = TempDir::new().unwrap();
    import_lab(&dir);

    cli(&dir)
        .args(["duplicate", "lab-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lab 1 (Copy)"));
    assert_eq!(list_json(&dir).len(), 2);

    cli(&dir).args(["delete", "lab-1", "-y"]).assert().success();
    cli(&dir)
        .args(["show", "lab-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Assignment not found: lab-1"));
    assert_eq!(list_json(&dir).len(), 1);
}

#[test]
fn move_problem_swaps_neighbours() {
    let dir = TempDir::new().unwrap();
    import_lab(&dir);

    cli(&dir)
        .args(["move-problem", "lab-1", "2", "up"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved problem 2"));

    let output = cli(&dir).args(["show", "lab-1", "--json"]).output().unwrap();
    let shown: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(shown["problems"][0]["name"], "Reflection");

    cli(&dir)
        .args(["move-problem", "lab-1", "1", "up"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cannot move"));
}

#[test]
fn export_bundle() {
    let dir = TempDir::new().unwrap();
    import_lab(&dir);
    let out = dir.path().join("exports");

    cli(&dir)
        .args(["export", "lab-1", "--output-dir"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("ENG6_Lab_1_Export.zip"));

    assert_eq!(zip_files(&out), vec!["ENG6_Lab_1_Export.zip".to_string()]);
}

#[test]
fn export_unknown_id_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("exports");

    cli(&dir)
        .args(["export", "missing", "--output-dir"])
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Assignment not found"));

    assert!(!out.exists());
}

#[test]
fn export_single_format_to_stdout() {
    let dir = TempDir::new().unwrap();
    import_lab(&dir);

    let output = cli(&dir)
        .args(["export", "lab-1", "--format", "spec"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let spec: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(spec["assignment_title"], "Lab 1");
    assert_eq!(spec["total_points"], 7);
    assert_eq!(spec["problems"].as_array().unwrap().len(), 2);
}

#[test]
fn export_pdf_to_file() {
    let dir = TempDir::new().unwrap();
    import_lab(&dir);
    let file = dir.path().join("lab.pdf");

    cli(&dir)
        .args(["export", "lab-1", "--format", "template", "-o"])
        .arg(&file)
        .assert()
        .success();

    assert!(fs::read(&file).unwrap().starts_with(b"%PDF-"));
}

#[test]
fn config_init_and_show() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("conf").join("config.toml");

    cli(&dir)
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(config.exists());

    cli(&dir)
        .arg("--config")
        .arg(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[export]"))
        .stdout(predicate::str::contains("math_script_url"));
}

#[test]
fn missing_config_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .args(["--config", "nope.toml", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}
