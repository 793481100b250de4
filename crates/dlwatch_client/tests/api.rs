use std::time::Duration;

use dlwatch_client::{ApiError, ApiSettings, JobApi, ReqwestApi};
use dlwatch_core::{JobId, JobStatus};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestApi {
    ReqwestApi::new(ApiSettings {
        base_url: server.uri(),
        ..ApiSettings::default()
    })
    .expect("build client")
}

#[tokio::test]
async fn submit_posts_the_url_and_returns_the_job_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/download"))
        .and(body_string_contains("url=https"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "download_id": "1700000000",
            "message": "Download started"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let id = api.submit("https://example.com/v").await.expect("submit ok");
    assert_eq!(id, JobId::new("1700000000"));
}

#[tokio::test]
async fn submit_surfaces_the_server_error_as_logical() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/download"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "Unsupported site"
        })))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let err = api.submit("https://example.com/v").await.unwrap_err();
    assert_eq!(err, ApiError::Logical("Unsupported site".to_string()));
}

#[tokio::test]
async fn submit_rejects_blank_input_without_a_network_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/download"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let err = api.submit("   ").await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

#[tokio::test]
async fn status_decodes_the_snapshot_and_rounds_progress() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/download-status/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "downloading",
            "title": "Some Video",
            "progress": 42.6,
            "url": "https://example.com/v",
            "file_path": null,
            "error": null
        })))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let snapshot = api.status(&JobId::new("42")).await.expect("status ok");
    assert_eq!(snapshot.status, JobStatus::Downloading);
    assert_eq!(snapshot.title.as_deref(), Some("Some Video"));
    assert_eq!(snapshot.progress, Some(43));
    assert_eq!(snapshot.file_path, None);
}

#[tokio::test]
async fn status_maps_404_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/download-status/42"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "Download not found"})),
        )
        .mount(&server)
        .await;

    let api = api_for(&server);
    let err = api.status(&JobId::new("42")).await.unwrap_err();
    assert_eq!(err, ApiError::NotFound);
}

#[tokio::test]
async fn status_keeps_unrecognized_values_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/download-status/42"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "postprocessing"})),
        )
        .mount(&server)
        .await;

    let api = api_for(&server);
    let snapshot = api.status(&JobId::new("42")).await.expect("status ok");
    assert_eq!(
        snapshot.status,
        JobStatus::Unknown("postprocessing".to_string())
    );
}

#[tokio::test]
async fn list_decodes_every_entry_including_orphan_files() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/downloads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "downloads": [
                {
                    "id": "1700000000",
                    "title": "Some Video",
                    "status": "downloading",
                    "progress": 30,
                    "file_path": null
                },
                {
                    "id": "file_old.mp4",
                    "title": "old.mp4",
                    "status": "completed",
                    "progress": 100,
                    "file_path": "./downloads/old.mp4",
                    "file_size": 1024
                }
            ]
        })))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let jobs = api.list().await.expect("list ok");
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].status, JobStatus::Downloading);
    assert_eq!(jobs[1].title, "old.mp4");
    assert_eq!(jobs[1].file_path.as_deref(), Some("./downloads/old.mp4"));
}

#[tokio::test]
async fn delete_posts_the_file_path_and_reports_logical_failures() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/delete-download"))
        .and(body_string_contains("file_path="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    api.delete("./downloads/old.mp4").await.expect("delete ok");

    server.reset().await;
    Mock::given(method("POST"))
        .and(path("/api/delete-download"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"error": "Invalid file path"})),
        )
        .mount(&server)
        .await;

    let err = api.delete("/etc/passwd").await.unwrap_err();
    assert_eq!(err, ApiError::Logical("Invalid file path".to_string()));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let api = ReqwestApi::new(ApiSettings {
        // Reserved port, nothing listens here.
        base_url: "http://127.0.0.1:1".to_string(),
        connect_timeout: Duration::from_millis(200),
        request_timeout: Duration::from_millis(500),
    })
    .expect("build client");

    let err = api.list().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn undecodable_body_is_a_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/downloads"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let err = api.list().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

#[test]
fn artifact_urls_percent_encode_the_final_segment() {
    let api = ReqwestApi::new(ApiSettings {
        base_url: "http://localhost:5000/".to_string(),
        ..ApiSettings::default()
    })
    .expect("build client");

    assert_eq!(
        api.download_url("./downloads/My Clip.mp4"),
        "http://localhost:5000/download/My%20Clip.mp4"
    );
    assert_eq!(
        api.stream_url("./downloads/My Clip.mp4"),
        "http://localhost:5000/stream/My%20Clip.mp4"
    );
}
