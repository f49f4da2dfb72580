//! Gateway Ingest and Alert API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{body_json, guild_create, voice_update, TestApp, ALERT_CHANNEL, TEST_GUILD};

const WATCHED: &[&str] = &["@Leon3To", "cl4upy", "luigineto"];

#[tokio::test]
async fn test_watched_join_dispatches_to_idle_members() {
    let app = TestApp::new(WATCHED);
    app.send_event(guild_create()).await;

    let ack = app.send_event(voice_update("10", Some("100"))).await;

    assert_eq!(ack["event"], "VOICE_STATE_UPDATE");
    assert_eq!(ack["outcome"]["outcome"], "dispatched");
    assert_eq!(ack["outcome"]["watch_key"], "leon3to");
    assert_eq!(ack["outcome"]["recipients"], json!(["20", "30"]));
}

#[tokio::test]
async fn test_dispatched_alert_is_listed_in_history() {
    let app = TestApp::new(WATCHED);
    app.send_event(guild_create()).await;
    app.send_event(voice_update("10", Some("100"))).await;

    let response = app.get("/api/v1/alerts/recent").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let alerts = json["alerts"].as_array().unwrap();
    assert_eq!(alerts.len(), 1);

    let alert = &alerts[0];
    assert_eq!(alert["channel_id"], ALERT_CHANNEL.to_string());
    assert_eq!(alert["content"], "<@20> <@30>");
    assert_eq!(alert["embed"]["title"], "Player in voice");
    assert_eq!(
        alert["embed"]["description"],
        "<@10> joined <#100>.\nNotify: <@20> <@30>"
    );
    assert_eq!(alert["embed"]["footer"]["text"], "Watcher Bot");
    assert_eq!(alert["allowed_mentions"]["users"], json!(["20", "30"]));
}

#[tokio::test]
async fn test_members_in_voice_are_not_pinged() {
    let app = TestApp::new(WATCHED);
    app.send_event(guild_create()).await;
    app.send_event(voice_update("20", Some("200"))).await;

    let ack = app.send_event(voice_update("10", Some("100"))).await;

    assert_eq!(ack["outcome"]["recipients"], json!(["30"]));
}

#[tokio::test]
async fn test_move_is_ignored() {
    let app = TestApp::new(WATCHED);
    app.send_event(guild_create()).await;
    app.send_event(voice_update("10", Some("100"))).await;

    let ack = app.send_event(voice_update("10", Some("101"))).await;

    assert_eq!(ack["outcome"]["outcome"], "ignored");
    assert_eq!(ack["outcome"]["reason"], "move");
}

#[tokio::test]
async fn test_unwatched_join_sends_nothing() {
    let app = TestApp::new(WATCHED);
    app.send_event(guild_create()).await;

    let ack = app.send_event(voice_update("40", Some("100"))).await;

    assert_eq!(ack["outcome"]["outcome"], "unwatched");
    let json = body_json(app.get("/api/v1/alerts/recent").await).await;
    assert_eq!(json["alerts"], json!([]));
}

#[tokio::test]
async fn test_everyone_in_voice_means_no_recipients() {
    let app = TestApp::new(WATCHED);
    app.send_event(guild_create()).await;
    app.send_event(voice_update("20", Some("200"))).await;
    app.send_event(voice_update("30", Some("200"))).await;

    let ack = app.send_event(voice_update("10", Some("100"))).await;

    assert_eq!(ack["outcome"]["outcome"], "no_recipients");
}

#[tokio::test]
async fn test_presence_lists_watched_members() {
    let app = TestApp::new(WATCHED);
    app.send_event(guild_create()).await;
    app.send_event(voice_update("20", Some("200"))).await;

    let response = app.get(&format!("/api/v1/guilds/{}/watch", TEST_GUILD)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["guild_id"], TEST_GUILD);
    assert_eq!(json["watched"].as_array().unwrap().len(), 3);
    assert_eq!(json["in_voice"], json!(["cl4upy"]));
}

#[tokio::test]
async fn test_presence_of_unknown_guild_is_not_found() {
    let app = TestApp::new(WATCHED);

    let response = app.get("/api/v1/guilds/999/watch").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_presence_with_invalid_guild_id_is_bad_request() {
    let app = TestApp::new(WATCHED);

    let response = app.get("/api/v1/guilds/abc/watch").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_event_is_rejected() {
    let app = TestApp::new(WATCHED);

    let response = app
        .post_json("/api/v1/events", r#"{"t": "VOICE_STATE_UPDATE", "d": {}}"#)
        .await;

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_unknown_event_is_rejected() {
    let app = TestApp::new(WATCHED);

    let response = app
        .post_json("/api/v1/events", r#"{"t": "TYPING_START", "d": {}}"#)
        .await;

    assert!(response.status().is_client_error());
}
