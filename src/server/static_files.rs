use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};

/// Serve built dashboard assets, falling back to `index.html` for client-side routes
pub fn serve_static(static_dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use std::fs;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_serves_assets_and_spa_fallback() {
        let tmp = tempfile::TempDir::new().unwrap();
        fs::write(tmp.path().join("index.html"), "<div id=\"root\"></div>").unwrap();
        fs::write(tmp.path().join("app.js"), "console.log(1)").unwrap();

        let response = serve_static(tmp.path())
            .oneshot(Request::builder().uri("/app.js").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = serve_static(tmp.path())
            .oneshot(Request::builder().uri("/history").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(Body::new(response.into_body()), usize::MAX)
            .await
            .unwrap();
        assert!(String::from_utf8_lossy(&body).contains("root"));
    }
}
