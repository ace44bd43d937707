mod support;

use tempfile::tempdir;

use support::{describe, run_cli, spawn_json_server, stdout_of, write_collection};

const COLLECTION: &str = r#"{
  "info": { "name": "Landslide" },
  "variable": [ { "key": "serverId", "value": "1" } ],
  "item": [
    {
      "name": "Auth",
      "item": [
        {
          "name": "LS Login request",
          "request": {
            "method": "POST",
            "url": { "raw": "/api/login" },
            "auth": {
              "type": "basic",
              "basic": [
                { "key": "username", "value": "sms" },
                { "key": "password", "value": "a1b2c3d4" }
              ]
            }
          }
        }
      ]
    },
    {
      "name": "Servers",
      "item": [
        {
          "name": "testServers",
          "request": { "method": "GET", "url": "/api/testServers/{{serverId}}" }
        }
      ]
    }
  ]
}"#;

#[test]
fn e2e_list_prints_names_in_order() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let collection = write_collection(dir.path(), COLLECTION)?;

    let output = run_cli(dir.path(), ["-c", collection.as_str(), "--list"], &[])?;
    if !output.status.success() {
        return Err(describe(&output));
    }
    if stdout_of(&output) != "LS Login request\ntestServers\n" {
        return Err(describe(&output));
    }
    Ok(())
}

#[test]
fn e2e_run_prints_status_and_pretty_json() -> Result<(), String> {
    let (url, server) = spawn_json_server(r#"{"token":"abc","ok":true}"#)?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let collection = write_collection(dir.path(), COLLECTION)?;

    let output = run_cli(
        dir.path(),
        [
            "-c",
            collection.as_str(),
            "-b",
            url.as_str(),
            "--run",
            "LS Login request",
        ],
        &[],
    )?;
    if !output.status.success() {
        return Err(describe(&output));
    }
    let expected = "HTTP 200\n{\n  \"token\": \"abc\",\n  \"ok\": true\n}\n";
    if stdout_of(&output) != expected {
        return Err(describe(&output));
    }

    let requests = server.requests();
    let Some(head) = requests.first() else {
        return Err("Server saw no request".to_owned());
    };
    if !head.starts_with("post /api/login ") {
        return Err(format!("Unexpected request line: {}", head));
    }
    if !head.contains("authorization: basic c21zomexyjjjm2q0") {
        return Err(format!("Missing basic auth header: {}", head));
    }
    if !head.contains("accept: application/json") {
        return Err(format!("Missing default Accept header: {}", head));
    }
    Ok(())
}

#[test]
fn e2e_run_renders_variables() -> Result<(), String> {
    let (url, server) = spawn_json_server("[]")?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let collection = write_collection(dir.path(), COLLECTION)?;

    let output = run_cli(
        dir.path(),
        [
            "-c",
            collection.as_str(),
            "-b",
            url.as_str(),
            "--run",
            "testServers",
            "--var",
            "serverId=42",
        ],
        &[],
    )?;
    if !output.status.success() {
        return Err(describe(&output));
    }
    let requests = server.requests();
    if !requests
        .first()
        .is_some_and(|head| head.starts_with("get /api/testservers/42 "))
    {
        return Err(format!("Unexpected requests: {:?}", requests));
    }
    Ok(())
}

#[test]
fn e2e_list_wins_over_run() -> Result<(), String> {
    let (url, server) = spawn_json_server("{}")?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let collection = write_collection(dir.path(), COLLECTION)?;

    let output = run_cli(
        dir.path(),
        [
            "-c",
            collection.as_str(),
            "-b",
            url.as_str(),
            "--list",
            "--run",
            "testServers",
        ],
        &[],
    )?;
    if !output.status.success() || stdout_of(&output) != "LS Login request\ntestServers\n" {
        return Err(describe(&output));
    }
    if !server.requests().is_empty() {
        return Err(format!("Unexpected requests: {:?}", server.requests()));
    }
    Ok(())
}

#[test]
fn e2e_missing_collection_exits_with_failure() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let missing = dir.path().join("missing.json").to_string_lossy().into_owned();

    let output = run_cli(dir.path(), ["-c", missing.as_str(), "--list"], &[])?;
    if output.status.code() != Some(1) {
        return Err(describe(&output));
    }
    if !String::from_utf8_lossy(&output.stderr).contains("Failed to read collection") {
        return Err(describe(&output));
    }
    Ok(())
}

#[test]
fn e2e_unknown_name_exits_with_failure() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let collection = write_collection(dir.path(), COLLECTION)?;

    let output = run_cli(
        dir.path(),
        ["-c", collection.as_str(), "--run", "Nope"],
        &[],
    )?;
    if output.status.code() != Some(1) {
        return Err(describe(&output));
    }
    if !String::from_utf8_lossy(&output.stderr).contains("Request named 'Nope' not found") {
        return Err(describe(&output));
    }
    Ok(())
}

#[test]
fn e2e_without_action_prints_hint() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let collection = write_collection(dir.path(), COLLECTION)?;

    let output = run_cli(dir.path(), ["-c", collection.as_str()], &[])?;
    if !output.status.success() || !stdout_of(&output).starts_with("No action taken.") {
        return Err(describe(&output));
    }
    Ok(())
}

#[test]
fn e2e_credentials_trigger_login() -> Result<(), String> {
    let (url, server) = spawn_json_server(r#"{"a":1}"#)?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let collection = write_collection(dir.path(), COLLECTION)?;

    let output = run_cli(
        dir.path(),
        ["-c", collection.as_str()],
        &[
            ("API_BASE_URL", url.as_str()),
            ("API_USERNAME", "sms"),
            ("API_PASSWORD", "a1b2c3d4"),
        ],
    )?;
    if !output.status.success() || stdout_of(&output) != "Login -> HTTP 200\n{\"a\":1}\n" {
        return Err(describe(&output));
    }
    if !server
        .requests()
        .first()
        .is_some_and(|head| head.starts_with("post /api/login "))
    {
        return Err(format!("Unexpected requests: {:?}", server.requests()));
    }
    Ok(())
}

#[test]
fn e2e_config_file_supplies_base_url() -> Result<(), String> {
    let (url, server) = spawn_json_server("{}")?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let collection = write_collection(dir.path(), COLLECTION)?;
    std::fs::write(
        dir.path().join("landslide.toml"),
        format!("base_url = \"{}\"\nheaders = [\"X-Trace: e2e\"]\n", url),
    )
    .map_err(|err| format!("write config failed: {}", err))?;

    let output = run_cli(
        dir.path(),
        ["-c", collection.as_str(), "--run", "testServers"],
        &[],
    )?;
    if !output.status.success() || !stdout_of(&output).starts_with("HTTP 200\n") {
        return Err(describe(&output));
    }
    if !server
        .requests()
        .first()
        .is_some_and(|head| head.contains("x-trace: e2e"))
    {
        return Err(format!("Unexpected requests: {:?}", server.requests()));
    }
    Ok(())
}
