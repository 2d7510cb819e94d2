use super::*;
use axum::{body, body::Body, http::Request};
use config::Settings;
use shared::error::{ApiError, ErrorCode};
use std::{
    env, fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

fn temp_static_dir() -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let root = env::temp_dir().join(format!("page_server_routes_{suffix}"));
    fs::create_dir_all(root.join("css")).expect("static dir");
    fs::write(root.join("css").join("style.css"), ".fade-in { opacity: 1; }").expect("css");
    root
}

fn test_app(static_dir: PathBuf) -> Router {
    build_router(Arc::new(AppState {
        settings: Settings {
            server_bind: "127.0.0.1:0".into(),
            static_dir,
            site_name: "Test Site".into(),
        },
    }))
}

async fn body_text(response: Response) -> String {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf8")
}

#[tokio::test]
async fn healthz_reports_ok() {
    let app = test_app(PathBuf::from("./missing"));
    let request = Request::get("/healthz")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn pages_render_with_site_name() {
    let app = test_app(PathBuf::from("./missing"));
    for path in ["/", "/about", "/contact"] {
        let request = Request::get(path).body(Body::empty()).expect("request");
        let response = app.clone().oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK, "{path}");
        let html = body_text(response).await;
        assert!(html.contains("Test Site"), "{path}");
    }
}

#[tokio::test]
async fn api_data_returns_payload_in_order() {
    let app = test_app(PathBuf::from("./missing"));
    let request = Request::get("/api/data")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let raw = body_text(response).await;
    assert!(raw.starts_with(r#"{"message":"#));
    let payload: ApiData = serde_json::from_str(&raw).expect("json");
    assert_eq!(payload.data, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn contact_post_renders_success_notice() {
    let app = test_app(PathBuf::from("./missing"));
    let request = Request::post("/contact")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from("name=Ada&email=ada%40example.com&message=Hello+there+friend"))
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Thank you for your message!"));
    assert!(html.contains("alert-dismissible fade show"));
}

#[tokio::test]
async fn contact_post_accepts_missing_fields() {
    let app = test_app(PathBuf::from("./missing"));
    let request = Request::post("/contact")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from("name=A"))
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_page_renders_html_404() {
    let app = test_app(PathBuf::from("./missing"));
    let request = Request::get("/nowhere")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let html = body_text(response).await;
    assert!(html.contains("Page Not Found"));
}

#[tokio::test]
async fn unknown_api_route_returns_json_404() {
    let app = test_app(PathBuf::from("./missing"));
    let request = Request::get("/api/nowhere")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ApiError = serde_json::from_str(&body_text(response).await).expect("json");
    assert_eq!(error.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn static_assets_are_served_from_configured_dir() {
    let root = temp_static_dir();
    let app = test_app(root.clone());
    let request = Request::get("/static/css/style.css")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("fade-in"));
    fs::remove_dir_all(root).expect("cleanup");
}
