//! HTTP API tests.
//!
//! Each test spawns `rmatch serve` on its own port, waits for `/health`,
//! and exercises the JSON and multipart endpoints with reqwest.

use std::fs;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::time::Duration;
use tempfile::TempDir;

fn rmatch_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop();
    path.pop();
    path.push("rmatch");
    path
}

/// Kills the server process when the test ends, pass or fail.
struct ServerGuard {
    child: Child,
}

impl Drop for ServerGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn spawn_server(port: u16) -> (TempDir, ServerGuard, String) {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("rmatch.toml");
    fs::write(
        &config_path,
        format!("[server]\nbind = \"127.0.0.1:{}\"\n", port),
    )
    .unwrap();

    let child = Command::new(rmatch_binary())
        .arg("--config")
        .arg(&config_path)
        .arg("serve")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .unwrap_or_else(|e| panic!("Failed to spawn rmatch serve: {}", e));

    let base = format!("http://127.0.0.1:{}", port);
    wait_for_health(&base);
    (tmp, ServerGuard { child }, base)
}

fn wait_for_health(base: &str) {
    let client = reqwest::blocking::Client::new();
    for _ in 0..100 {
        if let Ok(resp) = client.get(format!("{}/health", base)).send() {
            if resp.status().is_success() {
                return;
            }
        }
        std::thread::sleep(Duration::from_millis(100));
    }
    panic!("server did not become healthy at {}", base);
}

/// Minimal docx (ZIP) containing word/document.xml with the given text.
fn minimal_docx_with_text(phrase: &str) -> Vec<u8> {
    use std::io::Write;
    let mut buf = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(std::io::Cursor::new(&mut buf));
        zip.start_file("word/document.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        let xml = format!(
            "<?xml version=\"1.0\"?><w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\"><w:body><w:p><w:r><w:t>{}</w:t></w:r></w:p></w:body></w:document>",
            phrase
        );
        zip.write_all(xml.as_bytes()).unwrap();
        zip.finish().unwrap();
    }
    buf
}

#[test]
fn health_reports_version() {
    let (_tmp, _guard, base) = spawn_server(17791);
    let client = reqwest::blocking::Client::new();

    let resp = client.get(format!("{}/health", base)).send().unwrap();
    assert!(resp.status().is_success());
    let body: serde_json::Value = resp.json().unwrap();
    assert_eq!(body["status"], "ok");
    assert!(!body["version"].as_str().unwrap().is_empty());
}

#[test]
fn match_endpoint_ranks_and_sorts() {
    let (_tmp, _guard, base) = spawn_server(17792);
    let client = reqwest::blocking::Client::new();

    let resp = client
        .post(format!("{}/match", base))
        .json(&serde_json::json!({
            "job_description": "Senior Rust engineer with tokio experience",
            "resumes": [
                {"name": "john.txt", "text": "Graphic designer, Photoshop and Illustrator"},
                {"name": "jane.txt", "text": "Rust engineer, five years of tokio and async"},
                {"text": "Pastry chef"}
            ]
        }))
        .send()
        .unwrap();
    assert!(resp.status().is_success());

    let report: serde_json::Value = resp.json().unwrap();
    let results = report["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["identifier"], "jane.txt");
    let scores: Vec<f64> = results
        .iter()
        .map(|r| r["score"].as_f64().unwrap())
        .collect();
    assert!(scores[0] >= scores[1] && scores[1] >= scores[2]);
    // The unnamed resume gets a positional identifier.
    assert!(results
        .iter()
        .any(|r| r["identifier"] == "resume-3"));
}

#[test]
fn match_endpoint_splits_pasted_blob() {
    let (_tmp, _guard, base) = spawn_server(17793);
    let client = reqwest::blocking::Client::new();

    let resp = client
        .post(format!("{}/match", base))
        .json(&serde_json::json!({
            "job_description": "Rust developer",
            "pasted": "Rust developer---RESUME-SEPARATOR---Graphic designer"
        }))
        .send()
        .unwrap();
    assert!(resp.status().is_success());

    let report: serde_json::Value = resp.json().unwrap();
    let results = report["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["identifier"], "pasted-1");
}

#[test]
fn empty_job_description_is_bad_request() {
    let (_tmp, _guard, base) = spawn_server(17794);
    let client = reqwest::blocking::Client::new();

    let resp = client
        .post(format!("{}/match", base))
        .json(&serde_json::json!({
            "job_description": "   ",
            "resumes": [{"text": "Rust developer"}]
        }))
        .send()
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);

    let body: serde_json::Value = resp.json().unwrap();
    assert_eq!(body["error"]["code"], "bad_request");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("job description"));
}

#[test]
fn no_resumes_is_bad_request() {
    let (_tmp, _guard, base) = spawn_server(17795);
    let client = reqwest::blocking::Client::new();

    let resp = client
        .post(format!("{}/match", base))
        .json(&serde_json::json!({ "job_description": "Rust developer" }))
        .send()
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);

    let body: serde_json::Value = resp.json().unwrap();
    assert_eq!(body["error"]["code"], "bad_request");
}

#[test]
fn upload_endpoint_extracts_and_ranks() {
    let (_tmp, _guard, base) = spawn_server(17796);
    let client = reqwest::blocking::Client::new();

    let docx = minimal_docx_with_text("Rust engineer with tokio experience");
    let form = reqwest::blocking::multipart::Form::new()
        .text("job_description", "Rust engineer, tokio")
        .part(
            "resume",
            reqwest::blocking::multipart::Part::bytes(docx).file_name("jane.docx"),
        )
        .part(
            "resume",
            reqwest::blocking::multipart::Part::bytes(b"not a valid pdf".to_vec())
                .file_name("bad.pdf"),
        );

    let resp = client
        .post(format!("{}/match/upload", base))
        .multipart(form)
        .send()
        .unwrap();
    assert!(resp.status().is_success());

    let report: serde_json::Value = resp.json().unwrap();
    let results = report["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["identifier"], "jane.docx");
    assert!(results[0]["score"].as_f64().unwrap() > 0.5);

    let skipped = report["skipped"].as_array().unwrap();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0]["identifier"], "bad.pdf");
}

#[test]
fn upload_without_job_description_is_bad_request() {
    let (_tmp, _guard, base) = spawn_server(17797);
    let client = reqwest::blocking::Client::new();

    let form = reqwest::blocking::multipart::Form::new().part(
        "resume",
        reqwest::blocking::multipart::Part::bytes(b"Rust developer".to_vec())
            .file_name("r.txt"),
    );

    let resp = client
        .post(format!("{}/match/upload", base))
        .multipart(form)
        .send()
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);

    let body: serde_json::Value = resp.json().unwrap();
    assert_eq!(body["error"]["code"], "bad_request");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("job_description"));
}
