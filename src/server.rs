//! Web endpoint serving the current report at `/`.

use crate::publish::ReportStore;
use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Builds the router: a single `GET /` route.
pub fn router(store: ReportStore) -> Router {
    Router::new()
        .route("/", get(serve_report))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(store))
}

/// Binds `listen` and serves until the process is stopped.
pub async fn serve(listen: &str, store: ReportStore) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .with_context(|| format!("Failed to bind {}", listen))?;

    info!(
        "Serving {} on http://{}",
        store.path().display(),
        listener.local_addr().context("Listener has no local address")?
    );

    axum::serve(listener, router(store)).await.context("Server error")
}

/// GET / - the report as last written
async fn serve_report(State(store): State<Arc<ReportStore>>) -> Response {
    match store.read().await {
        Ok(Some(html)) => Html(html).into_response(),
        Ok(None) => {
            (StatusCode::SERVICE_UNAVAILABLE, "Report has not been generated yet").into_response()
        }
        Err(e) => {
            error!("Failed to read {}: {}", store.path().display(), e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to read report").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use tempfile::TempDir;
    use tower::ServiceExt;

    async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
        let response =
            app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap()).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_serves_report() {
        let dir = TempDir::new().unwrap();
        let store = ReportStore::new(dir.path().join("list.html"));
        store.write("<p>Théière</p>").await.unwrap();

        let (status, content_type, body) = get(router(store), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(content_type.unwrap().starts_with("text/html"));
        assert_eq!(body, "<p>Théière</p>");
    }

    #[tokio::test]
    async fn test_missing_report() {
        let dir = TempDir::new().unwrap();
        let store = ReportStore::new(dir.path().join("list.html"));

        let (status, _, body) = get(router(store), "/").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body.contains("not been generated"));
    }

    #[tokio::test]
    async fn test_reads_latest_artifact_per_request() {
        let dir = TempDir::new().unwrap();
        let store = ReportStore::new(dir.path().join("list.html"));
        let app = router(store.clone());

        store.write("one").await.unwrap();
        assert_eq!(get(app.clone(), "/").await.2, "one");
        store.write("two").await.unwrap();
        assert_eq!(get(app, "/").await.2, "two");
    }

    #[tokio::test]
    async fn test_no_other_routes() {
        let dir = TempDir::new().unwrap();
        let store = ReportStore::new(dir.path().join("list.html"));
        store.write("x").await.unwrap();

        let (status, _, _) = get(router(store), "/api/report").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
