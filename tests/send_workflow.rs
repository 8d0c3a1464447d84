//! End-to-end tests for the `current` commands against mocked HTTP endpoints.
//!
//! Each test gets its own settings file and an in-memory secret store, so
//! nothing touches the real keychain or config directory.

use std::collections::HashMap;
use std::sync::Arc;

use percent_encoding::percent_decode_str;
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use weekly_brief::app::{AppContext, BriefError};
use weekly_brief::cli::{commands, ConfigureArgs};
use weekly_brief::store::MemorySecretStore;

const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Swift Weekly Brief</title>
    <link>https://example.com/</link>
    <description>Issues</description>
    <item>
      <title>B</title>
      <link>https://example.com/b</link>
      <guid>issue-b</guid>
      <pubDate>Mon, 01 Feb 2021 00:00:00 GMT</pubDate>
    </item>
    <item>
      <title>A</title>
      <link>https://example.com/a</link>
      <guid>issue-a</guid>
      <pubDate>Fri, 01 Jan 2021 00:00:00 GMT</pubDate>
    </item>
  </channel>
</rss>"#;

const CONTENT: &str = "<html><body><h1>Issue B</h1><a href=\"https://example.com/?x=1&y=2\">link</a></body></html>";

async fn mount_get(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn mount_campaign(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/api/campaigns/create.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Campaign created and now sending"))
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn configured_context(server: &MockServer) -> (TempDir, AppContext) {
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = AppContext::with_secret_store(
        dir.path().join("settings.toml"),
        Arc::new(MemorySecretStore::new()),
    )
    .unwrap();

    let args = ConfigureArgs {
        sendy_api: Some("api-key".into()),
        rss_feed: format!("{}/feed.xml", server.uri()),
        content_url: format!("{}/latest.html", server.uri()),
        api_campaign_url: format!("{}/api/campaigns/create.php", server.uri()),
        production_list_id: Some("42".into()),
        test_list_id: Some("7".into()),
        secret: "s3cret".into(),
    };
    let mut out = Vec::new();
    commands::configure(&mut ctx, args, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "Config stored.\n");

    (dir, ctx)
}

async fn submitted_fields(server: &MockServer) -> HashMap<String, String> {
    let requests = server.received_requests().await.unwrap();
    let posts: Vec<_> = requests
        .iter()
        .filter(|r| r.method.as_str() == "POST")
        .collect();
    assert_eq!(posts.len(), 1);

    let body = std::str::from_utf8(&posts[0].body).unwrap();
    body.split('&')
        .map(|pair| {
            let (name, value) = pair.split_once('=').unwrap();
            (
                percent_decode_str(name).decode_utf8().unwrap().into_owned(),
                percent_decode_str(value).decode_utf8().unwrap().into_owned(),
            )
        })
        .collect()
}

#[tokio::test]
async fn show_prints_unique_id_of_latest_item() {
    let server = MockServer::start().await;
    mount_get(&server, "/feed.xml", ResponseTemplate::new(200).set_body_string(FEED)).await;
    let (_dir, ctx) = configured_context(&server).await;

    let mut out = Vec::new();
    commands::show_current(&ctx, &mut out).await.unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "issue-b\n");
}

#[tokio::test]
async fn load_writes_content_verbatim() {
    let server = MockServer::start().await;
    mount_get(&server, "/latest.html", ResponseTemplate::new(200).set_body_string(CONTENT)).await;
    let (_dir, ctx) = configured_context(&server).await;

    let mut out = Vec::new();
    commands::load_current(&ctx, &mut out).await.unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), CONTENT);
}

#[tokio::test]
async fn production_send_uses_production_list_and_plain_title() {
    let server = MockServer::start().await;
    mount_get(&server, "/feed.xml", ResponseTemplate::new(200).set_body_string(FEED)).await;
    mount_get(&server, "/latest.html", ResponseTemplate::new(200).set_body_string(CONTENT)).await;
    mount_campaign(&server, 1).await;
    let (_dir, ctx) = configured_context(&server).await;

    let mut out = Vec::new();
    commands::send(&ctx, true, &mut out).await.unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "Campaign created and now sending\n");

    let fields = submitted_fields(&server).await;
    assert_eq!(fields["list_ids"], "42");
    assert_eq!(fields["title"], "B");
    assert_eq!(fields["subject"], "Swift Weekly Brief: B");
    assert_eq!(fields["html_text"], CONTENT);
    assert_eq!(fields["for_real"], "1");
    assert_eq!(fields["api_key"], "api-key");
    assert_eq!(fields["secret"], "s3cret");
    assert_eq!(
        fields["query_string"],
        "utm_source=Swift_Weekly_Brief&utm_medium=email&utm_campaign=B"
    );
}

#[tokio::test]
async fn test_send_uses_test_list_and_prefixed_title() {
    let server = MockServer::start().await;
    mount_get(&server, "/feed.xml", ResponseTemplate::new(200).set_body_string(FEED)).await;
    mount_get(&server, "/latest.html", ResponseTemplate::new(200).set_body_string(CONTENT)).await;
    mount_campaign(&server, 1).await;
    let (_dir, ctx) = configured_context(&server).await;

    let mut out = Vec::new();
    commands::send(&ctx, false, &mut out).await.unwrap();

    let fields = submitted_fields(&server).await;
    assert_eq!(fields["list_ids"], "7");
    assert_eq!(fields["title"], "Test: B");
    assert_eq!(fields["subject"], "Swift Weekly Brief: B");
    assert_eq!(fields["for_real"], "0");
}

#[tokio::test]
async fn failed_content_fetch_never_publishes() {
    let server = MockServer::start().await;
    mount_get(&server, "/feed.xml", ResponseTemplate::new(200).set_body_string(FEED)).await;
    mount_get(&server, "/latest.html", ResponseTemplate::new(500)).await;
    mount_campaign(&server, 0).await;
    let (_dir, ctx) = configured_context(&server).await;

    let mut out = Vec::new();
    let err = commands::send(&ctx, true, &mut out).await.unwrap_err();

    assert!(matches!(err, BriefError::Http(_)));
    assert!(out.is_empty());
}

#[tokio::test]
async fn failed_feed_fetch_never_publishes() {
    let server = MockServer::start().await;
    mount_get(&server, "/feed.xml", ResponseTemplate::new(200)).await;
    mount_get(&server, "/latest.html", ResponseTemplate::new(200).set_body_string(CONTENT)).await;
    mount_campaign(&server, 0).await;
    let (_dir, ctx) = configured_context(&server).await;

    let mut out = Vec::new();
    let err = commands::send(&ctx, false, &mut out).await.unwrap_err();

    assert!(matches!(err, BriefError::MissingData));
}

#[tokio::test]
async fn send_without_configuration_reports_missing_setting() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = AppContext::with_secret_store(
        dir.path().join("settings.toml"),
        Arc::new(MemorySecretStore::new()),
    )
    .unwrap();

    let mut out = Vec::new();
    let err = commands::send(&ctx, false, &mut out).await.unwrap_err();

    assert!(matches!(err, BriefError::MissingSetting("rss_feed_url")));
}

#[tokio::test]
async fn configure_persists_settings_for_next_invocation() {
    let server = MockServer::start().await;
    let (dir, ctx) = configured_context(&server).await;

    let reloaded = AppContext::with_secret_store(
        dir.path().join("settings.toml"),
        Arc::new(MemorySecretStore::new()),
    )
    .unwrap();

    assert_eq!(reloaded.settings, ctx.settings);
    assert_eq!(
        reloaded.settings.rss_feed().unwrap().as_str(),
        format!("{}/feed.xml", server.uri())
    );
}

#[tokio::test]
async fn configure_replaces_unparsable_settings_file() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let settings_path = dir.path().join("settings.toml");
    std::fs::write(&settings_path, "rss_feed_url = [").unwrap();

    let err = AppContext::with_secret_store(settings_path.clone(), Arc::new(MemorySecretStore::new()))
        .err()
        .unwrap();
    assert!(matches!(err, BriefError::Settings(_)));

    let mut ctx = AppContext::for_configure_with_secret_store(
        settings_path.clone(),
        Arc::new(MemorySecretStore::new()),
    )
    .unwrap();
    let args = ConfigureArgs {
        sendy_api: None,
        rss_feed: format!("{}/feed.xml", server.uri()),
        content_url: format!("{}/latest.html", server.uri()),
        api_campaign_url: format!("{}/api/campaigns/create.php", server.uri()),
        production_list_id: None,
        test_list_id: None,
        secret: "s3cret".into(),
    };
    let mut out = Vec::new();
    commands::configure(&mut ctx, args, &mut out).unwrap();

    let reloaded =
        AppContext::with_secret_store(settings_path, Arc::new(MemorySecretStore::new())).unwrap();
    assert_eq!(
        reloaded.settings.content().unwrap().as_str(),
        format!("{}/latest.html", server.uri())
    );
}
