//! Router assembly: page shell, fragment endpoints, WebSocket session, static
//! assets, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;
pub mod ws;

/// Build the application router with:
/// - page shell at `/`
/// - WebSocket page session at `/ws`
/// - HTML fragments under `/ui/...`
/// - health check at `/api/v1/health`
/// - static assets (style.css, app.js) under `/static` from the configured directory
pub fn build_router(state: Arc<AppState>) -> Router {
    let static_service = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/", get(http::http_index))
        .nest_service("/static", static_service)
        .route("/ws", get(ws::ws_upgrade))
        .route("/ui/tasks", get(http::http_ui_tasks))
        .route("/ui/task/:id", get(http::http_ui_task))
        .route("/ui/check-answer", post(http::http_ui_check_answer))
        .route("/api/v1/health", get(http::http_health))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::config::FrontendConfig;

    fn app_for(api_base: &str) -> Router {
        let config = FrontendConfig {
            api_base: api_base.to_string(),
            static_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/static").to_string(),
            ..FrontendConfig::default()
        };
        build_router(Arc::new(AppState::new(config).expect("state")))
    }

    async fn body_text(res: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.expect("body");
        String::from_utf8(bytes.to_vec()).expect("utf8")
    }

    #[tokio::test]
    async fn health_is_ok() {
        let res = app_for("http://127.0.0.1:9")
            .oneshot(Request::get("/api/v1/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_text(res).await, r#"{"ok":true}"#);
    }

    #[tokio::test]
    async fn index_serves_shell() {
        let res = app_for("http://127.0.0.1:9")
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert!(body_text(res).await.contains("id=\"disclaimer-modal\""));
    }

    #[tokio::test]
    async fn assets_are_served_under_static() {
        let app = app_for("http://127.0.0.1:9");
        for asset in ["/static/style.css", "/static/app.js"] {
            let res = app
                .clone()
                .oneshot(Request::get(asset).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(res.status(), StatusCode::OK, "{asset}");
        }

        let res = app
            .oneshot(Request::get("/style.css").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn index_links_assets_under_static() {
        let res = app_for("http://127.0.0.1:9")
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let html = body_text(res).await;
        assert!(html.contains("href=\"/static/style.css\""));
        assert!(html.contains("src=\"/static/app.js\""));
    }

    #[tokio::test]
    async fn task_fragment_is_escaped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/task/2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "task_text": "a <b> c" })))
            .mount(&server)
            .await;

        let res = app_for(&server.uri())
            .oneshot(Request::get("/ui/task/2").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_text(res).await, "<div class=\"task-text\">a &lt;b&gt; c</div>");
    }

    #[tokio::test]
    async fn check_fragment_renders_report() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/check-answer"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "overall_score": 72,
                "criteria_evaluation": { "criteria_5": { "score": 30 } }
            })))
            .mount(&server)
            .await;

        let req = Request::post("/ui/check-answer")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"answer":"ОАК, ОАМ","task_id":1}"#))
            .unwrap();
        let res = app_for(&server.uri()).oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let html = body_text(res).await;
        assert!(html.contains("score good"));
        assert!(html.contains("5. План диагностики"));
        assert!(html.contains("criterion-score poor"));
    }

    #[tokio::test]
    async fn blank_answer_is_rejected_without_backend_call() {
        let req = Request::post("/ui/check-answer")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"answer":"  ","task_id":1}"#))
            .unwrap();
        let res = app_for("http://127.0.0.1:9").oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unreachable_backend_gives_placeholder_option() {
        let res = app_for("http://127.0.0.1:9")
            .oneshot(Request::get("/ui/tasks").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
        let html = body_text(res).await;
        assert_eq!(html.matches("<option").count(), 1);
        assert!(html.contains("Сервер не запущен"));
    }
}
