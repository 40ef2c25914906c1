//! Static asset serving via rust-embed

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
};
use rust_embed::Embed;

#[derive(Embed)]
#[folder = "frontend/"]
struct Asset;

/// Fallback handler that serves embedded static files
pub async fn static_handler(req: Request<Body>) -> Response {
    let path = req.uri().path().trim_start_matches('/');

    // Default to index.html for root
    let path = if path.is_empty() { "index.html" } else { path };

    match Asset::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path)
                .first_or_octet_stream()
                .to_string();
            embedded(mime, content.data.into_owned())
        }
        // SPA fallback: serve index.html for any non-API, non-file path
        None if !path.contains('.') && !path.starts_with("api/") => {
            match Asset::get("index.html") {
                Some(content) => embedded("text/html".to_string(), content.data.into_owned()),
                None => not_found(),
            }
        }
        None => not_found(),
    }
}

fn embedded(mime: String, data: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, mime),
            (header::CACHE_CONTROL, "no-cache".to_string()),
        ],
        data,
    )
        .into_response()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not found").into_response()
}
