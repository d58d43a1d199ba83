use assert_cmd::prelude::*;
use chrono::Utc;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

const SERVICE_ACCOUNT: &str = include_str!("fixtures/service_account.json");

fn site() -> Value {
    json!({
        "roles": ["Anonymous", "Owner", "Member", "Manager"],
        "reports": [
            { "id": "site-visits-line", "title": "Site Visits", "categories": ["Site Wide"] },
            { "id": "top-pages-table", "title": "Top Pages", "categories": ["Portlet"] }
        ],
        "plugins": { "global": ["pageview", "external"], "local": ["pageview", "downloads"] }
    })
}

fn write_config(dir: &Path, settings: Value, extra: Value) -> PathBuf {
    let mut config = json!({ "settings": settings, "site": site() });
    if let (Some(config), Some(extra)) = (config.as_object_mut(), extra.as_object()) {
        for (k, v) in extra {
            config.insert(k.clone(), v.clone());
        }
    }

    let path = dir.join("config.yaml");
    fs::write(&path, serde_yaml::to_string(&config).unwrap()).expect("failed to write config");
    path
}

/// Service account whose token endpoint is `token_uri`
fn service_account(token_uri: &str) -> String {
    let mut key: Value = serde_json::from_str(SERVICE_ACCOUNT).unwrap();
    key["token_uri"] = json!(token_uri);
    key.to_string()
}

fn gavocab(config_path: &Path, cache_home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("gavocab"));
    cmd.arg("--config")
        .arg(config_path)
        .env("XDG_CACHE_HOME", cache_home)
        .env_remove("GAVOCAB_CONFIG")
        .env_remove("GAVOCAB_API_HOST")
        .env_remove("GAVOCAB_FORMAT")
        .env_remove("RUST_LOG");
    cmd
}

fn json_stdout(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

#[test]
fn status_uses_custom_config_path() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(
        temp.path(),
        json!({ "tracking_web_property": "UA-30481-22", "cache_interval": 15 }),
        json!({}),
    );

    let assert = gavocab(&config_path, temp.path())
        .arg("status")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains(&config_path.to_string_lossy().to_string()));
    assert!(stdout.contains("Tracked web property: UA-30481-22"));
    assert!(stdout.contains("Cache interval: 15 min"));
    assert!(stdout.contains("Service account not usable"));

    Ok(())
}

#[test]
fn status_reports_valid_service_account() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(
        temp.path(),
        json!({ "service_account": SERVICE_ACCOUNT }),
        json!({}),
    );

    gavocab(&config_path, temp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "reporter@gavocab-test.iam.gserviceaccount.com",
        ));

    Ok(())
}

#[test]
fn status_without_config_suggests_init() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    gavocab(&temp.path().join("missing.yaml"), temp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration not found"))
        .stdout(predicate::str::contains("gavocab init"));

    Ok(())
}

#[test]
fn vocab_without_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    gavocab(&temp.path().join("missing.yaml"), temp.path())
        .args(["vocab", "roles"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("gavocab init"));

    Ok(())
}

#[test]
fn vocab_roles_excludes_owner() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), json!({}), json!({}));

    let assert = gavocab(&config_path, temp.path())
        .args(["vocab", "roles", "--format", "json"])
        .assert()
        .success();

    let output = json_stdout(assert.get_output());
    let values: Vec<&str> = output["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["value"].as_str().unwrap())
        .collect();
    assert_eq!(values, vec!["Anonymous", "Manager", "Member"]);
    assert_eq!(output["meta"]["count"], 3);

    Ok(())
}

#[test]
fn vocab_reports_filters_by_category() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), json!({}), json!({}));

    gavocab(&config_path, temp.path())
        .args(["vocab", "reports", "--category", "Portlet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Top Pages"))
        .stdout(predicate::str::contains("top-pages-table"))
        .stdout(predicate::str::contains("Site Visits").not());

    gavocab(&config_path, temp.path())
        .args(["vocab", "site-wide-reports"])
        .assert()
        .success()
        .stdout(predicate::str::contains("site-visits-line"))
        .stdout(predicate::str::contains("top-pages-table").not());

    Ok(())
}

#[test]
fn vocab_tracking_plugins_listed_once() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), json!({}), json!({}));

    let assert = gavocab(&config_path, temp.path())
        .args(["vocab", "tracking-plugins", "--format", "json"])
        .assert()
        .success();

    let output = json_stdout(assert.get_output());
    assert_eq!(
        output["data"],
        json!([
            { "label": "downloads", "value": "downloads" },
            { "label": "external", "value": "external" },
            { "label": "pageview", "value": "pageview" }
        ])
    );

    Ok(())
}

#[test]
fn vocab_profiles_without_credentials_is_empty() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), json!({}), json!({}));

    let assert = gavocab(&config_path, temp.path())
        .args(["--no-cache", "vocab", "profiles", "--format", "json"])
        .assert()
        .success();

    let output = json_stdout(assert.get_output());
    assert_eq!(output["data"], json!([]));
    assert_eq!(output["meta"]["count"], 0);

    Ok(())
}

#[test]
fn revoke_without_token_is_noop() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), json!({}), json!({}));

    gavocab(&config_path, temp.path())
        .arg("revoke")
        .assert()
        .success()
        .stdout(predicate::str::contains("No access token to revoke"));

    Ok(())
}

#[cfg(target_os = "linux")]
#[test]
fn cache_path_follows_xdg_cache_home() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), json!({}), json!({}));
    let expected = temp.path().join("gavocab");

    gavocab(&config_path, temp.path())
        .args(["cache", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.to_string_lossy().to_string()));

    Ok(())
}

fn token_mock(server: &mut mockito::ServerGuard) -> mockito::Mock {
    server
        .mock("POST", "/token")
        .match_body(mockito::Matcher::UrlEncoded(
            "grant_type".into(),
            "urn:ietf:params:oauth:grant-type:jwt-bearer".into(),
        ))
        .with_status(200)
        .with_body(r#"{"access_token": "ya29.cli", "expires_in": 3600, "token_type": "Bearer"}"#)
        .create()
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn vocab_web_properties_via_api_host() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let api_host = server.url();

    let _token = token_mock(&mut server);
    let properties = server
        .mock("GET", "/analytics/v3/management/accounts/~all/webproperties")
        .match_header("authorization", "Bearer ya29.cli")
        .with_status(200)
        .with_body(
            r#"{"items": [
                {"id": "UA-1", "name": "Site A"},
                {"id": "UA-1", "name": "Site B"},
                {"id": "UA-2", "name": "Blog"}
            ]}"#,
        )
        .expect(1)
        .create();

    let temp = tempdir()?;
    let config_path = write_config(
        temp.path(),
        json!({ "service_account": service_account(&format!("{}/token", api_host)) }),
        json!({}),
    );

    for _ in 0..2 {
        let assert = gavocab(&config_path, temp.path())
            .args(["vocab", "web-properties", "--format", "json", "--api-host"])
            .arg(&api_host)
            .assert()
            .success();

        let output = json_stdout(assert.get_output());
        assert_eq!(
            output["data"],
            json!([
                { "label": "Blog", "value": "UA-2" },
                { "label": "Site A, Site B", "value": "UA-1" }
            ])
        );
    }

    // Second run is served from the on-disk cache
    properties.assert();

    let saved = fs::read_to_string(&config_path)?;
    assert!(saved.contains("ya29.cli"));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn vocab_profiles_unauthorized_shows_guidance() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let api_host = server.url();

    let _token = token_mock(&mut server);
    let _profiles = server
        .mock(
            "GET",
            "/analytics/v3/management/accounts/~all/webproperties/~all/profiles",
        )
        .with_status(401)
        .with_body(r#"{"error": {"code": 401, "message": "Invalid Credentials"}}"#)
        .create();

    let temp = tempdir()?;
    let config_path = write_config(
        temp.path(),
        json!({ "service_account": service_account(&format!("{}/token", api_host)) }),
        json!({}),
    );

    let assert = gavocab(&config_path, temp.path())
        .args(["--no-cache", "vocab", "profiles", "--format", "json"])
        .env("GAVOCAB_API_HOST", &api_host)
        .assert()
        .success();

    let output = json_stdout(assert.get_output());
    assert_eq!(
        output["data"],
        json!([{
            "label": "Please authorize with Google in the Google Analytics control panel.",
            "value": null
        }])
    );

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn accounts_http_error_prints_no_accounts() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let api_host = server.url();

    let _token = token_mock(&mut server);
    let _accounts = server
        .mock("GET", "/analytics/v3/management/accounts")
        .with_status(403)
        .with_body(r#"{"error": {"code": 403, "message": "User does not have any Google Analytics account."}}"#)
        .create();

    let temp = tempdir()?;
    let config_path = write_config(
        temp.path(),
        json!({ "service_account": service_account(&format!("{}/token", api_host)) }),
        json!({}),
    );

    gavocab(&config_path, temp.path())
        .arg("accounts")
        .env("GAVOCAB_API_HOST", &api_host)
        .assert()
        .success()
        .stdout(predicate::str::contains("No accounts available"));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn revoke_forgets_saved_token() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let api_host = server.url();

    let revoke = server
        .mock("POST", "/revoke")
        .match_body(mockito::Matcher::UrlEncoded(
            "token".into(),
            "ya29.saved".into(),
        ))
        .with_status(200)
        .create();

    let temp = tempdir()?;
    let expires_at = (Utc::now() + chrono::Duration::minutes(30)).to_rfc3339();
    let config_path = write_config(
        temp.path(),
        json!({ "service_account": service_account(&format!("{}/token", api_host)) }),
        json!({
            "api_host": api_host,
            "token": { "token": "ya29.saved", "expires_at": expires_at }
        }),
    );

    gavocab(&config_path, temp.path())
        .arg("revoke")
        .assert()
        .success()
        .stdout(predicate::str::contains("Access token revoked"));

    revoke.assert();
    let saved = fs::read_to_string(&config_path)?;
    assert!(!saved.contains("ya29.saved"));

    Ok(())
}
