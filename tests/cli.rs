use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

const MODEL: &str = r#"{
  "projectName": "Shop",
  "technology": "DotNet",
  "entities": [
    {
      "id": "0190a000-0000-7000-8000-000000000001",
      "name": "Customer",
      "columns": [
        { "name": "Id", "type": "int", "isRequired": true, "isPrimaryKey": true, "isForeignKey": false },
        { "name": "Name", "type": "string", "isRequired": true, "isPrimaryKey": false, "isForeignKey": false }
      ],
      "relationships": []
    },
    {
      "id": "0190a000-0000-7000-8000-000000000002",
      "name": "Product",
      "columns": [
        { "name": "Id", "type": "int", "isRequired": true, "isPrimaryKey": true, "isForeignKey": false },
        { "name": "Price", "type": "decimal", "isRequired": true, "isPrimaryKey": false, "isForeignKey": false }
      ],
      "relationships": [
        {
          "type": "ManyToOne",
          "fromEntity": "0190a000-0000-7000-8000-000000000002",
          "toEntity": "0190a000-0000-7000-8000-000000000001",
          "fromColumn": "Id",
          "toColumn": "Id"
        }
      ]
    }
  ]
}"#;

fn studio() -> Command {
    let mut cmd = Command::cargo_bin("scaffold-studio").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn write_model(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("model.json");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_preview_dotnet() {
    let dir = TempDir::new().unwrap();
    let model = write_model(&dir, MODEL);

    studio()
        .args(["preview", model.to_str().unwrap(), "--entity", "Product"])
        .assert()
        .success()
        .stdout(predicate::str::contains("public int Id"))
        .stdout(predicate::str::contains("[Key]"))
        .stdout(predicate::str::contains("[Required]"))
        .stdout(predicate::str::contains("public decimal Price"));
}

#[test]
fn test_preview_unknown_technology_prints_placeholder() {
    let dir = TempDir::new().unwrap();
    let model = write_model(&dir, MODEL);

    studio()
        .args(["preview", model.to_str().unwrap(), "-e", "Product", "-t", "NotARealTech"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not available"));
}

#[test]
fn test_preview_missing_entity_fails() {
    let dir = TempDir::new().unwrap();
    let model = write_model(&dir, MODEL);

    studio()
        .args(["preview", model.to_str().unwrap(), "--entity", "Invoice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Entity 'Invoice' not found"));
}

#[test]
fn test_layout_json() {
    let dir = TempDir::new().unwrap();
    let model = write_model(&dir, MODEL);

    let output = studio()
        .args(["layout", model.to_str().unwrap(), "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["nodes"][0]["position"]["x"], 40.0);
    assert_eq!(value["nodes"][1]["position"]["x"], 340.0);
    assert_eq!(value["connections"][0]["target_label"], "Customer");
}

#[test]
fn test_validate_exit_codes() {
    let dir = TempDir::new().unwrap();
    let model = write_model(&dir, MODEL);
    studio()
        .args(["validate", model.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"));

    let broken = MODEL.replace("\"name\": \"Customer\"", "\"name\": \"\"");
    let model = write_model(&dir, &broken);
    studio()
        .args(["validate", model.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Entity name cannot be empty"));
}

#[test]
fn test_invalid_model_file() {
    let dir = TempDir::new().unwrap();
    let model = write_model(&dir, "{ not json");
    studio()
        .args(["validate", model.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid model file format"));
}

#[test]
fn test_technologies() {
    studio()
        .arg("technologies")
        .assert()
        .success()
        .stdout(predicate::str::contains("DotNet"))
        .stdout(predicate::str::contains("Java"))
        .stdout(predicate::str::contains("NodeJs"));
}

#[test]
fn test_generate_requires_token() {
    let dir = TempDir::new().unwrap();
    let model = write_model(&dir, MODEL);
    let config = dir.path().join("studio.toml");
    std::fs::write(&config, "[api]\nbase_url = \"http://127.0.0.1:9\"\n").unwrap();

    studio()
        .env_remove("SCAFFOLD_API_TOKEN")
        .env_remove("SCAFFOLD_API_URL")
        .args([
            "generate",
            model.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Sign in"));
}
