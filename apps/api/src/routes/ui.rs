use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use rust_embed::Embed;

#[derive(Embed)]
#[folder = "static/"]
struct Asset;

/// A file from the embedded `static/` folder, served with its guessed MIME type.
pub struct StaticFile(pub &'static str);

impl IntoResponse for StaticFile {
    fn into_response(self) -> Response {
        match Asset::get(self.0) {
            Some(content) => {
                let mime = mime_guess::from_path(self.0).first_or_octet_stream();
                ([(header::CONTENT_TYPE, mime.as_ref())], content.data).into_response()
            }
            None => (StatusCode::NOT_FOUND, "404 Not Found").into_response(),
        }
    }
}

/// GET /
pub async fn ui_index() -> StaticFile {
    StaticFile("index.html")
}
