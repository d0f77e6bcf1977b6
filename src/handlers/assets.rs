use axum::{
    Json,
    extract::OriginalUri,
    http::{Method, header},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;
use serde_json::{Value, json};

use crate::FolioError;

/// Browser front-end, compiled into the binary.
#[derive(RustEmbed)]
#[folder = "public/"]
struct FrontendAssets;

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Router fallback: serve a front-end file for GETs, otherwise a JSON 404.
pub async fn static_or_not_found(method: Method, OriginalUri(uri): OriginalUri) -> Response {
    if method == Method::GET
        && let Some(resp) = serve_asset(uri.path())
    {
        return resp;
    }
    FolioError::RouteNotFound(uri.path().to_string()).into_response()
}

/// Known path, unsupported method.
pub async fn route_not_found(OriginalUri(uri): OriginalUri) -> FolioError {
    FolioError::RouteNotFound(uri.path().to_string())
}

fn serve_asset(path: &str) -> Option<Response> {
    let path = match path.trim_start_matches('/') {
        "" => "index.html",
        p => p,
    };
    let file = FrontendAssets::get(path)?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    Some(([(header::CONTENT_TYPE, mime.to_string())], file.data).into_response())
}
