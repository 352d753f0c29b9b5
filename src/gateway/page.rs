use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use rust_embed::RustEmbed;

/// Static front end, compiled into the binary.
#[derive(RustEmbed)]
#[folder = "web/"]
struct Assets;

pub const INDEX: &str = "index.html";

/// Serve the chat page.
pub async fn index() -> Response {
    match Assets::get(INDEX) {
        Some(file) => {
            let mime = mime_guess::from_path(INDEX).first_or_octet_stream();
            (
                [(header::CONTENT_TYPE, format!("{}; charset=utf-8", mime.essence_str()))],
                file.data,
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "page not found").into_response(),
    }
}
