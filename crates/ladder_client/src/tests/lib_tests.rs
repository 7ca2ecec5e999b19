use super::*;
use axum::{extract::Path, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use shared::error::{ApiError, ErrorCode};
use tokio::net::TcpListener;

async fn ladder_handler(Path(mode): Path<String>) -> axum::response::Response {
    match mode.as_str() {
        "1v1" => Json(vec![CharacterRecord::new(1, "A"), CharacterRecord::new(2, "B")])
            .into_response(),
        "envelope" => Json(serde_json::json!({
            "characters": [
                { "rank": 1, "name": "Zed", "class": "necromancer", "level": 92, "experience": 2500000000u64 }
            ]
        }))
        .into_response(),
        "season 3" => Json(vec![CharacterRecord::new(1, mode.clone())]).into_response(),
        "garbage" => (StatusCode::OK, "<html>oops</html>").into_response(),
        "slow" => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(Vec::<CharacterRecord>::new()).into_response()
        }
        "maintenance" => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiError::new(ErrorCode::Unavailable, "ladder reset in progress")),
        )
            .into_response(),
        "hidden" => (
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(ErrorCode::UnknownMode, "no such ladder")),
        )
            .into_response(),
        _ => (StatusCode::NOT_FOUND, "").into_response(),
    }
}

async fn spawn_ladder_server() -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new().route("/api/ladder/:mode", get(ladder_handler));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}/api/")
}

fn client_for(base_url: &str) -> HttpLadderClient {
    let config = LadderClientConfig::new(base_url).expect("config");
    HttpLadderClient::new(config).expect("client")
}

#[tokio::test]
async fn fetches_characters_in_backend_order() {
    let base_url = spawn_ladder_server().await;
    let client = client_for(&base_url);

    let characters = client
        .fetch_characters(&LadderMode::from("1v1"))
        .await
        .expect("fetch");

    assert_eq!(
        characters,
        vec![CharacterRecord::new(1, "A"), CharacterRecord::new(2, "B")]
    );
}

#[tokio::test]
async fn accepts_enveloped_payloads() {
    let base_url = spawn_ladder_server().await;
    let client = client_for(&base_url);

    let characters = client
        .fetch_characters(&LadderMode::from("envelope"))
        .await
        .expect("fetch");

    assert_eq!(characters.len(), 1);
    assert_eq!(characters[0].class.as_deref(), Some("necromancer"));
    assert_eq!(characters[0].experience, Some(2_500_000_000));
}

#[tokio::test]
async fn encodes_mode_as_a_single_path_segment() {
    let base_url = spawn_ladder_server().await;
    let client = client_for(&base_url);

    let characters = client
        .fetch_characters(&LadderMode::from("season 3"))
        .await
        .expect("fetch");

    assert_eq!(characters[0].name, "season 3");
}

#[tokio::test]
async fn not_found_maps_to_unknown_mode() {
    let base_url = spawn_ladder_server().await;
    let client = client_for(&base_url);

    let err = client
        .fetch_characters(&LadderMode::from("ironman"))
        .await
        .expect_err("unknown mode should fail");

    assert!(
        matches!(err, LadderClientError::UnknownMode { ref mode } if mode == "ironman"),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn structured_unknown_mode_body_maps_to_unknown_mode() {
    let base_url = spawn_ladder_server().await;
    let client = client_for(&base_url);

    let err = client
        .fetch_characters(&LadderMode::from("hidden"))
        .await
        .expect_err("hidden mode should fail");

    assert!(matches!(err, LadderClientError::UnknownMode { .. }));
}

#[tokio::test]
async fn server_errors_carry_backend_message() {
    let base_url = spawn_ladder_server().await;
    let client = client_for(&base_url);

    let err = client
        .fetch_characters(&LadderMode::from("maintenance"))
        .await
        .expect_err("maintenance should fail");

    match err {
        LadderClientError::Status { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "ladder reset in progress");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let base_url = spawn_ladder_server().await;
    let client = client_for(&base_url);

    let err = client
        .fetch_characters(&LadderMode::from("garbage"))
        .await
        .expect_err("html body should fail");

    assert!(matches!(err, LadderClientError::Decode(_)));
}

#[tokio::test]
async fn slow_backend_is_bounded_by_timeout() {
    let base_url = spawn_ladder_server().await;
    let config = LadderClientConfig::new(&base_url)
        .expect("config")
        .with_timeout(Duration::from_millis(200));
    let client = HttpLadderClient::new(config).expect("client");

    let err = client
        .fetch_characters(&LadderMode::from("slow"))
        .await
        .expect_err("slow backend should time out");

    assert!(err.is_timeout(), "expected timeout, got {err:?}");
}

#[tokio::test]
async fn blank_mode_is_rejected_without_io() {
    let client = client_for("http://127.0.0.1:9/");

    let err = client
        .fetch_characters(&LadderMode::from("   "))
        .await
        .expect_err("blank mode should fail");

    assert!(matches!(err, LadderClientError::InvalidMode));
}

#[test]
fn rejects_non_base_urls() {
    assert!(matches!(
        LadderClientConfig::new("mailto:ladder@example.com"),
        Err(LadderClientError::InvalidUrl { .. })
    ));
    assert!(matches!(
        LadderClientConfig::new("not a url"),
        Err(LadderClientError::InvalidUrl { .. })
    ));
}

#[test]
fn ladder_url_appends_to_base_path() {
    let config = LadderClientConfig::new("https://ladder.example.com/v2").expect("config");
    let client = HttpLadderClient::new(config).expect("client");

    let url = client.ladder_url(&LadderMode::from("hc/ladder")).expect("url");

    assert_eq!(
        url.as_str(),
        "https://ladder.example.com/v2/ladder/hc%2Fladder"
    );
}

#[test]
fn plain_text_error_bodies_are_truncated_into_message() {
    let body = "x".repeat(500);
    match LadderClientError::from_response("1v1", 500, &body) {
        LadderClientError::Status { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message.len(), 200);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
