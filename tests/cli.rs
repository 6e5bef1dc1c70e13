//! End-to-end tests for the `gist` binary.

use std::io::{ErrorKind, Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::path::{Path, PathBuf};
use std::thread::JoinHandle;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Accepts one connection on a background thread and answers it.
fn serve_once(status_line: &'static str, body: &'static str) -> (SocketAddr, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = std::thread::spawn(move || {
        let (mut socket, _) = listener.accept().unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
                let content_length = head
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .map(|v| v.trim().parse::<usize>().unwrap())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + content_length {
                    break;
                }
            }
        }

        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).unwrap();
        String::from_utf8_lossy(&buf).into_owned()
    });

    (addr, handle)
}

fn write_config(dir: &Path, name: &str, api_url: &str) -> PathBuf {
    let path = dir.join(name);
    let log_file = dir.join("gist.log");
    let config = serde_json::json!({
        "log": { "level": "debug", "file": log_file, "type": "json" },
        "github_token": "ghp_test",
        "api_url": api_url,
    });
    std::fs::write(&path, config.to_string()).unwrap();
    path
}

/// A `gist` command isolated from the caller's environment.
fn gist(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gist").unwrap();
    cmd.env("HOME", home)
        .env("NO_PROXY", "*")
        .env_remove("HTTP_PROXY")
        .env_remove("http_proxy")
        .env_remove("ALL_PROXY")
        .env_remove("all_proxy")
        .env_remove("GITHUB_TOKEN");
    for var in [
        "GIST_LOG_LEVEL",
        "GIST_LOG_FILE",
        "GIST_LOG_TYPE",
        "GIST_GITHUB_TOKEN",
        "GIST_API_URL",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn no_files_prints_usage_and_exits_1() {
    let home = TempDir::new().unwrap();

    gist(home.path())
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Usage:"))
        .stderr(predicate::str::contains("--files"));
}

#[test]
fn no_files_exits_before_config_lookup() {
    // HOME has no config; the usage path must not care.
    let home = TempDir::new().unwrap();

    gist(home.path())
        .args(["-d", "description only"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no config file found").not());
}

#[test]
fn missing_config_fails_fast() {
    let home = TempDir::new().unwrap();
    let file = home.path().join("a.txt");
    std::fs::write(&file, "a").unwrap();

    gist(home.path())
        .arg("-f")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no config file found"));
}

#[test]
fn missing_input_file_fails_before_any_request() {
    let home = TempDir::new().unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let api_url = format!("http://{}/gists", listener.local_addr().unwrap());
    let config = write_config(home.path(), "config.json", &api_url);
    let missing = home.path().join("missing.txt");

    gist(home.path())
        .arg("--config")
        .arg(&config)
        .arg("-f")
        .arg(&missing)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("missing.txt"));

    let accepted = listener.accept();
    assert!(matches!(accepted, Err(e) if e.kind() == ErrorKind::WouldBlock));
}

#[test]
fn invalid_log_level_is_fatal() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("config.json");
    std::fs::write(&config, r#"{"log": {"level": "chatty"}}"#).unwrap();
    let file = home.path().join("a.txt");
    std::fs::write(&file, "a").unwrap();

    gist(home.path())
        .arg("--config")
        .arg(&config)
        .arg("-f")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid log level"));
}

#[test]
fn creates_gist_and_prints_url() {
    let home = TempDir::new().unwrap();
    let (addr, server) = serve_once(
        "201 Created",
        r#"{"id": "abc", "html_url": "https://gist.github.com/abc"}"#,
    );
    let config = write_config(home.path(), "config.json", &format!("http://{addr}/gists"));
    let a = home.path().join("a.txt");
    let b = home.path().join("b.txt");
    std::fs::write(&a, "alpha").unwrap();
    std::fs::write(&b, "beta").unwrap();

    gist(home.path())
        .arg("--config")
        .arg(&config)
        .arg("-d")
        .arg("two files")
        .arg("-f")
        .arg(format!("{},{}", a.display(), b.display()))
        .assert()
        .success()
        .stdout("https://gist.github.com/abc\n")
        .stderr(predicate::str::contains("Using config file:"));

    let request = server.join().unwrap();
    let (_, body) = request.split_once("\r\n\r\n").unwrap();
    let body: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(body["description"], "two files");
    assert_eq!(body["public"], true);
    assert_eq!(body["files"]["a.txt"]["content"], "alpha");
    assert_eq!(body["files"]["b.txt"]["content"], "beta");
    assert!(request.to_lowercase().contains("authorization: bearer ghp_test"));

    let log = std::fs::read_to_string(home.path().join("gist.log")).unwrap();
    assert!(log.contains("gist created successfully"));
    assert!(log.contains("\"hostname\""));
}

#[test]
fn explicit_config_wins_over_home_config() {
    let home = TempDir::new().unwrap();
    let (addr, server) = serve_once(
        "201 Created",
        r#"{"html_url": "https://gist.github.com/explicit"}"#,
    );
    // The home config points at a port nothing listens on.
    write_config(home.path(), ".gist.json", "http://127.0.0.1:9/gists");
    let explicit = write_config(home.path(), "explicit.json", &format!("http://{addr}/gists"));
    let file = home.path().join("a.txt");
    std::fs::write(&file, "a").unwrap();

    gist(home.path())
        .arg("--config")
        .arg(&explicit)
        .arg("-f")
        .arg(&file)
        .assert()
        .success()
        .stdout("https://gist.github.com/explicit\n");

    server.join().unwrap();
}

#[test]
fn home_config_is_used_without_flag() {
    let home = TempDir::new().unwrap();
    let (addr, server) = serve_once(
        "201 Created",
        r#"{"html_url": "https://gist.github.com/home"}"#,
    );
    write_config(home.path(), ".gist.json", &format!("http://{addr}/gists"));
    let file = home.path().join("a.txt");
    std::fs::write(&file, "a").unwrap();

    gist(home.path())
        .arg("-f")
        .arg(&file)
        .assert()
        .success()
        .stdout("https://gist.github.com/home\n");

    server.join().unwrap();
}

#[test]
fn environment_overrides_config_file() {
    let home = TempDir::new().unwrap();
    let (addr, server) = serve_once(
        "201 Created",
        r#"{"html_url": "https://gist.github.com/env"}"#,
    );
    let config = write_config(home.path(), "config.json", "http://127.0.0.1:9/gists");
    let file = home.path().join("a.txt");
    std::fs::write(&file, "a").unwrap();

    gist(home.path())
        .env("GIST_API_URL", format!("http://{addr}/gists"))
        .arg("--config")
        .arg(&config)
        .arg("-f")
        .arg(&file)
        .assert()
        .success()
        .stdout("https://gist.github.com/env\n");

    server.join().unwrap();
}

#[test]
fn rejected_request_reports_status() {
    let home = TempDir::new().unwrap();
    let (addr, server) = serve_once(
        "422 Unprocessable Entity",
        r#"{"message": "Validation Failed"}"#,
    );
    let config = write_config(home.path(), "config.json", &format!("http://{addr}/gists"));
    let file = home.path().join("a.txt");
    std::fs::write(&file, "a").unwrap();

    gist(home.path())
        .arg("--config")
        .arg(&config)
        .arg("-f")
        .arg(&file)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Validation Failed"))
        .stderr(predicate::str::contains("422 Unprocessable Entity"));

    server.join().unwrap();
}

#[test]
fn reject_duplicates_flag_stops_collisions() {
    let home = TempDir::new().unwrap();
    let config = write_config(home.path(), "config.json", "http://127.0.0.1:9/gists");
    let a = home.path().join("one").join("same.txt");
    let b = home.path().join("two").join("same.txt");
    for path in [&a, &b] {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "x").unwrap();
    }

    gist(home.path())
        .arg("--config")
        .arg(&config)
        .arg("--reject-duplicates")
        .arg("-f")
        .arg(&a)
        .arg("-f")
        .arg(&b)
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate file name"));
}
